//! Search component - Main catalog screen
//!
//! Displays the favorites section, the current page of results, the
//! selected dog's card and the pagination bar. Owns list navigation state;
//! everything else is read from `AppState` at draw time.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_search_layout;
use crate::model::dog::Dog;
use crate::model::query::{page_window, PAGE_WINDOW};
use crate::model::state::{AppState, FetchStatus};
use crate::model::ui::Pane;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const FAVORITE_MARK: &str = "♥";
const NOT_FAVORITE_MARK: &str = "♡";

// ═══════════════════════════════════════════════════════════════════════════════
// Search Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct SearchComponent {
    /// Focused list
    pub pane: Pane,
    pub favorites_state: ListState,
    pub results_state: ListState,
    /// Page links currently shown, for digit shortcuts
    page_links: Vec<usize>,
}

impl Default for SearchComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchComponent {
    pub fn new() -> Self {
        Self {
            pane: Pane::Results,
            favorites_state: ListState::default(),
            results_state: ListState::default(),
            page_links: Vec::new(),
        }
    }

    fn focused_state(&mut self) -> &mut ListState {
        match self.pane {
            Pane::Favorites => &mut self.favorites_state,
            Pane::Results => &mut self.results_state,
        }
    }

    fn focused_len(&self, state: &AppState) -> usize {
        match self.pane {
            Pane::Favorites => state.favorites.len(),
            Pane::Results => state.visible_results().len(),
        }
    }

    /// Dog under the cursor in the focused list
    pub fn selected_dog<'a>(&self, state: &'a AppState) -> Option<&'a Dog> {
        match self.pane {
            Pane::Favorites => state
                .favorites
                .dogs()
                .get(self.favorites_state.selected()?),
            Pane::Results => state
                .visible_results()
                .get(self.results_state.selected()?)
                .copied(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, state: &AppState) {
        let len = self.focused_len(state);
        if len == 0 {
            return;
        }
        let list_state = self.focused_state();
        let next = match list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        list_state.select(Some(next));
    }

    pub fn previous(&mut self, state: &AppState) {
        let len = self.focused_len(state);
        if len == 0 {
            return;
        }
        let list_state = self.focused_state();
        let prev = match list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, state: &AppState) {
        let len = self.focused_len(state);
        self.focused_state().select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, state: &AppState) {
        let len = self.focused_len(state);
        self.focused_state().select(len.checked_sub(1));
    }

    /// Move focus to the other list; an empty favorites list cannot take focus
    pub fn switch_pane(&mut self, state: &AppState) {
        let target = self.pane.other();
        if target == Pane::Favorites && state.favorites.is_empty() {
            return;
        }
        self.pane = target;
        self.clamp_selection(state);
    }

    /// Keep both cursors inside their lists after the lists change
    pub fn clamp_selection(&mut self, state: &AppState) {
        if self.pane == Pane::Favorites && state.favorites.is_empty() {
            self.pane = Pane::Results;
        }
        clamp(&mut self.favorites_state, state.favorites.len());
        clamp(&mut self.results_state, state.visible_results().len());
    }

    /// Refresh the page links shown in the pagination bar
    pub fn sync(&mut self, state: &AppState) {
        self.page_links = page_window(state.page.current_page, state.page.total_pages, PAGE_WINDOW);
        self.clamp_selection(state);
    }

    fn page_for_digit(&self, digit: char) -> Option<usize> {
        let n = digit.to_digit(10)? as usize;
        self.page_links.get(n.checked_sub(1)?).copied()
    }
}

fn clamp(list_state: &mut ListState, len: usize) {
    match list_state.selected() {
        _ if len == 0 => list_state.select(None),
        Some(i) if i >= len => list_state.select(Some(len - 1)),
        None => list_state.select(Some(0)),
        Some(_) => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for SearchComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchPane),

            // Favorites & match
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') => {
                Some(Action::ToggleFavorite)
            }
            KeyCode::Char('m') => Some(Action::GenerateMatch),

            // Pagination
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('<') | KeyCode::Home => Some(Action::FirstPage),
            KeyCode::Char('>') | KeyCode::End => Some(Action::LastPage),
            KeyCode::Char(c @ '1'..='9') => self.page_for_digit(c).map(Action::GoToPage),

            // Filter & sort
            KeyCode::Char('b') => Some(Action::OpenBreedFilter),
            KeyCode::Char('s') => Some(Action::ToggleSortOrder),
            KeyCode::Char('R') => Some(Action::RefreshCatalog),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_search_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the search screen
pub struct SearchRenderContext<'a> {
    pub state: &'a AppState,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the search screen
pub fn draw_search_screen(
    frame: &mut Frame,
    area: Rect,
    search: &mut SearchComponent,
    ctx: &SearchRenderContext,
) -> Result<()> {
    search.sync(ctx.state);

    let has_status = ctx.error.is_some() || ctx.status_message.is_some() || ctx.state.match_pending;
    let layout = calculate_search_layout(area, has_status, ctx.state.favorites.len());

    render_header(frame, layout.header, ctx.state);
    render_favorites(frame, layout.favorites, search, ctx.state);
    render_results(frame, layout.results, search, ctx.state);
    render_card(frame, layout.card, search.selected_dog(ctx.state), ctx.state);
    render_pagination(frame, layout.pagination, ctx.state);

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help);

    Ok(())
}

/// Pad `text` with spaces to `width` terminal columns
fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn dog_line(dog: &Dog, is_favorite: bool) -> Line<'static> {
    let (mark, mark_style) = if is_favorite {
        (FAVORITE_MARK, Style::default().fg(Color::Red))
    } else {
        (NOT_FAVORITE_MARK, Style::default().fg(Color::DarkGray))
    };

    Line::from(vec![
        Span::styled(format!("{} ", mark), mark_style),
        Span::styled(
            pad(&dog.name, 16),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(pad(&dog.breed, 24), Style::default().fg(Color::Cyan)),
        Span::styled(pad(&dog.age_label(), 10), Style::default().fg(Color::Yellow)),
        Span::styled(dog.zip_code.clone(), Style::default().fg(Color::DarkGray)),
    ])
}

fn pane_border(search: &SearchComponent, pane: Pane) -> Style {
    if search.pane == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let breeds = if state.query.selected_breeds.is_empty() {
        "All breeds".to_string()
    } else {
        state.query.selected_breeds.join(", ")
    };

    let line = Line::from(vec![
        Span::styled(
            " Dog Shelter ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.query.sort_order.label(), Style::default().fg(Color::Yellow)),
        Span::styled("  Breeds: ", Style::default().fg(Color::DarkGray)),
        Span::styled(breeds, Style::default().fg(Color::Cyan)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_favorites(frame: &mut Frame, area: Rect, search: &mut SearchComponent, state: &AppState) {
    let title = format!(" Favorites ({}) ", state.favorites.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(pane_border(search, Pane::Favorites));

    if state.favorites.is_empty() {
        let hint = Paragraph::new(Span::styled(
            "No favorites yet. Press Space on a dog to add it.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .favorites
        .dogs()
        .iter()
        .map(|dog| ListItem::new(dog_line(dog, true)))
        .collect();

    let mut list = List::new(items).block(block);
    if search.pane == Pane::Favorites {
        list = list.highlight_style(highlight_style()).highlight_symbol("▶ ");
    }
    frame.render_stateful_widget(list, area, &mut search.favorites_state);
}

fn render_results(frame: &mut Frame, area: Rect, search: &mut SearchComponent, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Available Dogs ")
        .border_style(pane_border(search, Pane::Results));

    let message = match &state.catalog {
        FetchStatus::Idle => Some(Line::from("")),
        FetchStatus::Loading => Some(Line::from(Span::styled(
            "Loading dogs...",
            Style::default().fg(Color::Yellow),
        ))),
        FetchStatus::Failed(error) => Some(Line::from(vec![
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
            Span::styled("  (R to retry)", Style::default().fg(Color::DarkGray)),
        ])),
        FetchStatus::Ready(_) if state.visible_results().is_empty() => Some(Line::from(
            Span::styled("No dogs found", Style::default().fg(Color::DarkGray)),
        )),
        FetchStatus::Ready(_) => None,
    };

    if let Some(message) = message {
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .visible_results()
        .into_iter()
        .map(|dog| ListItem::new(dog_line(dog, false)))
        .collect();

    let mut list = List::new(items).block(block);
    if search.pane == Pane::Results {
        list = list.highlight_style(highlight_style()).highlight_symbol("▶ ");
    }
    frame.render_stateful_widget(list, area, &mut search.results_state);
}

fn render_card(frame: &mut Frame, area: Rect, dog: Option<&Dog>, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(dog) = dog else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let is_favorite = state.favorites.contains(&dog.id);
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                dog.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            if is_favorite {
                Span::styled(FAVORITE_MARK, Style::default().fg(Color::Red))
            } else {
                Span::styled(NOT_FAVORITE_MARK, label)
            },
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Breed: ", label),
            Span::styled(dog.breed.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Age: ", label),
            Span::raw(dog.age_label()),
        ]),
        Line::from(vec![
            Span::styled("Location: ", label),
            Span::raw(dog.zip_code.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Image:", label)),
        Line::from(Span::styled(dog.img.clone(), Style::default().fg(Color::Blue))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_pagination(frame: &mut Frame, area: Rect, state: &AppState) {
    let page = &state.page;
    if state.catalog.ready().is_none() || page.total_pages == 0 {
        frame.render_widget(Paragraph::new(""), area);
        return;
    }

    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);
    let prev_style = if page.has_prev() { enabled } else { disabled };
    let next_style = if page.has_next() { enabled } else { disabled };

    let mut spans = vec![
        Span::styled(
            format!(
                " Page {} of {} ({} dogs)  ",
                page.current_page, page.total_pages, page.total_results
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled("« ", prev_style),
        Span::styled("‹ ", prev_style),
    ];

    for number in page_window(page.current_page, page.total_pages, PAGE_WINDOW) {
        let style = if number == page.current_page {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", number), style));
    }

    spans.push(Span::styled(" ›", next_style));
    spans.push(Span::styled(" »", next_style));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &SearchRenderContext) {
    let mut spans = vec![];

    if ctx.state.match_pending {
        spans.push(Span::styled(
            " Finding your match... ",
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let help_spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" Space ", Color::Green),
        Span::raw("Favorite "),
        key(" m ", Color::Magenta),
        Span::raw("Match "),
        key(" b ", Color::Cyan),
        Span::raw("Breeds "),
        key(" s ", Color::Cyan),
        Span::raw("Sort "),
        key(" n/p ", Color::Cyan),
        Span::raw("Page "),
        key(" Tab ", Color::Cyan),
        Span::raw("Switch "),
        key(" ? ", Color::White),
        Span::raw("Help"),
    ];

    let paragraph = Paragraph::new(Line::from(help_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
