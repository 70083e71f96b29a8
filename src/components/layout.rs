//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Search screen layout areas
pub struct SearchLayout {
    pub header: Rect,
    pub favorites: Rect,
    pub results: Rect,
    pub card: Rect,
    pub pagination: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Rows given to the favorites section: one per favorite plus borders,
/// capped so the results keep most of the screen
pub fn favorites_height(favorite_count: usize) -> u16 {
    let rows = favorite_count.clamp(1, 6) as u16;
    rows + 2
}

/// Calculate search screen layout
pub fn calculate_search_layout(area: Rect, has_status: bool, favorite_count: usize) -> SearchLayout {
    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    };

    // Lists on the left (65%), selected dog card on the right (35%)
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[1]);

    let list_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(favorites_height(favorite_count)),
            Constraint::Min(0),
        ])
        .split(horizontal_chunks[0]);

    let (status_area, help_area) = if has_status {
        (Some(main_chunks[3]), main_chunks[4])
    } else {
        (None, main_chunks[3])
    };

    SearchLayout {
        header: main_chunks[0],
        favorites: list_chunks[0],
        results: list_chunks[1],
        card: horizontal_chunks[1],
        pagination: main_chunks[2],
        status: status_area,
        help: help_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let small = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(small.width, 20);
        assert_eq!(small.height, 5);
    }

    #[test]
    fn test_favorites_height_is_capped() {
        assert_eq!(favorites_height(0), 3);
        assert_eq!(favorites_height(2), 4);
        assert_eq!(favorites_height(50), 8);
    }

    #[test]
    fn test_search_layout_status_row_optional() {
        let area = Rect::new(0, 0, 120, 40);
        let with_status = calculate_search_layout(area, true, 2);
        assert!(with_status.status.is_some());
        assert_eq!(with_status.favorites.height, 4);
        assert_eq!(with_status.help.height, 3);

        let without = calculate_search_layout(area, false, 2);
        assert!(without.status.is_none());
        assert_eq!(without.pagination.height, 1);
    }
}
