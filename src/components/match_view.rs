//! Match result screen
//!
//! Shows the matched dog's profile with adoption guidance. Only reachable
//! while a matched dog is set; the App redirects to search otherwise.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::dog::Dog;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct MatchComponent {
    /// Cached profile lines for the current match
    content: Vec<Line<'static>>,
}

impl MatchComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content for the matched dog
    pub fn set_dog(&mut self, dog: Option<&Dog>) {
        self.content = match dog {
            Some(dog) => render_profile(dog),
            None => Vec::new(),
        };
    }
}

impl Component for MatchComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Backspace => Some(Action::ClearMatch),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let card_area = centered_popup(area, 72, 22);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(card_area);

        let paragraph = Paragraph::new(self.content.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Your Match ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        frame.render_widget(paragraph, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Find another match  "),
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

fn render_profile(dog: &Dog) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", name), label),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Congratulations!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("You've been matched with the perfect companion!"),
        Line::from(""),
        Line::from(Span::styled(
            dog.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        field("Breed", dog.breed.clone()),
        field("Age", dog.age_label()),
        field("Location", dog.zip_code.clone()),
        Line::from(Span::styled(dog.img.clone(), Style::default().fg(Color::Blue))),
        Line::from(""),
        Line::from(format!(
            "We think {} would be a perfect addition to your family!",
            dog.name
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Contact the shelter using the location information above to proceed with the adoption process.",
            Style::default().fg(Color::Yellow),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_profile_mentions_dog() {
        let dog = Dog {
            id: "a".to_string(),
            img: "https://img.example/a.jpg".to_string(),
            name: "Rex".to_string(),
            age: 1,
            zip_code: "94110".to_string(),
            breed: "Beagle".to_string(),
        };
        let mut view = MatchComponent::new();
        view.set_dog(Some(&dog));

        let lines = text(&view.content);
        assert!(lines.contains(&"Congratulations!".to_string()));
        assert!(lines.contains(&"Age: 1 year".to_string()));
        assert!(lines.contains(&"Location: 94110".to_string()));
        assert!(lines
            .iter()
            .any(|l| l == "We think Rex would be a perfect addition to your family!"));
    }

    #[test]
    fn test_no_dog_renders_nothing() {
        let mut view = MatchComponent::new();
        view.set_dog(None);
        assert!(view.content.is_empty());
    }

    #[test]
    fn test_enter_clears_match() {
        let mut view = MatchComponent::new();
        let action = view
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::ClearMatch));
    }
}
