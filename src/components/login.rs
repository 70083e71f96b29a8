//! Login screen component
//!
//! Collects a name and an email and submits them to the session gate.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::state::LoginStatus;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email pattern"));

/// Input that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Email,
}

impl LoginField {
    fn other(&self) -> LoginField {
        match self {
            LoginField::Name => LoginField::Email,
            LoginField::Email => LoginField::Name,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginComponent {
    pub name: String,
    pub email: String,
    pub focus: LoginField,
    /// Form-level validation message
    pub validation_error: Option<String>,
    /// Submission status, synced from shared state before drawing
    status: LoginStatus,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

impl LoginComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &LoginStatus) {
        self.status = status.clone();
    }

    fn validate(&mut self) -> bool {
        let name = self.name.trim();
        let email = self.email.trim();

        self.validation_error = if name.is_empty() {
            Some("Name is required".to_string())
        } else if email.is_empty() {
            Some("Email is required".to_string())
        } else if !is_valid_email(email) {
            Some("Please enter a valid email address".to_string())
        } else {
            None
        };

        self.validation_error.is_none()
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if !self.validate() {
            // Jump to the field that needs fixing
            if self.name.trim().is_empty() {
                self.focus = LoginField::Name;
            } else {
                self.focus = LoginField::Email;
            }
            return None;
        }
        Some(Action::SubmitLogin {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

impl Component for LoginComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Inputs are disabled while the request is in flight
        if self.status.is_submitting() {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::OpenQuitDialog),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = self.focus.other();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Backspace => {
                self.focused_input().pop();
                self.validation_error = None;
                None
            }
            KeyCode::Char(c) => {
                self.focused_input().push(c);
                self.validation_error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let form_area = centered_popup(area, 60, 18);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Length(3), // Button
                Constraint::Min(1),    // Message
            ])
            .split(form_area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Welcome to Dog Shelter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Find your perfect furry friend. Please login to continue.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let submitting = self.status.is_submitting();
        self.draw_input(frame, chunks[1], " Name ", &self.name, LoginField::Name, submitting);
        self.draw_input(frame, chunks[2], " Email ", &self.email, LoginField::Email, submitting);

        let (label, style) = if submitting {
            ("Logging in...", Style::default().fg(Color::DarkGray))
        } else {
            (
                "Login",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let button = Paragraph::new(Line::from(Span::styled(label, style)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(button, chunks[3]);

        let mut message = Vec::new();
        if let Some(error) = self.validation_error.as_deref().or(self.status.error()) {
            message.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        message.push(Line::from(Span::styled(
            "Tab  Switch field   Enter  Login   Esc  Quit",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), chunks[4]);

        Ok(())
    }
}

impl LoginComponent {
    fn draw_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        field: LoginField,
        disabled: bool,
    ) {
        let focused = self.focus == field && !disabled;
        let border_color = if disabled {
            Color::DarkGray
        } else if focused {
            Color::Cyan
        } else {
            Color::White
        };
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };

        let input = Paragraph::new(Line::from(Span::raw(text))).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(input, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(login: &mut LoginComponent, text: &str) {
        for c in text.chars() {
            login.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a@b"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut login = LoginComponent::new();
        assert!(login.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert_eq!(login.validation_error.as_deref(), Some("Name is required"));

        type_str(&mut login, "Ada");
        login.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert!(login.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert_eq!(login.validation_error.as_deref(), Some("Email is required"));
    }

    #[test]
    fn test_submit_emits_trimmed_credentials() {
        let mut login = LoginComponent::new();
        type_str(&mut login, " Ada ");
        login.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut login, "ada@example.com");

        let action = login.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::SubmitLogin {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_email_focuses_email_field() {
        let mut login = LoginComponent::new();
        type_str(&mut login, "Ada");
        login.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut login, "nope");
        login.focus = LoginField::Name;

        assert!(login.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
        assert_eq!(login.focus, LoginField::Email);
        assert!(login.validation_error.is_some());
    }

    #[test]
    fn test_inputs_disabled_while_submitting() {
        let mut login = LoginComponent::new();
        login.set_status(&LoginStatus::Submitting);
        type_str(&mut login, "Ada");
        assert!(login.name.is_empty());
        assert!(login.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut login = LoginComponent::new();
        type_str(&mut login, "Ad");
        login.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut login, "x@y");
        login.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(login.name, "Ad");
        assert_eq!(login.email, "x@");
    }
}
