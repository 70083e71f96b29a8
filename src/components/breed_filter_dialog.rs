//! Breed filter dialog component
//!
//! Sort selector, a "Clear all" row, then one checkbox per breed in the
//! catalog. Loading and error states of the breed catalog render here,
//! independently of the results list.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::query::SortOrder;
use crate::model::state::{AppState, FetchStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Rows above the breed list
const SORT_ROW: usize = 0;
const CLEAR_ROW: usize = 1;
const FIRST_BREED_ROW: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum BreedList {
    #[default]
    Loading,
    Failed(String),
    Ready(Vec<String>),
}

pub struct BreedFilterDialog {
    pub selected_index: usize,
    pub list_state: ListState,
    breeds: BreedList,
    selected_breeds: Vec<String>,
    sort_order: SortOrder,
}

impl Default for BreedFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl BreedFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            breeds: BreedList::Loading,
            selected_breeds: Vec::new(),
            sort_order: SortOrder::default(),
        }
    }

    /// Put the cursor back on the sort row
    pub fn reset(&mut self) {
        self.selected_index = SORT_ROW;
        self.list_state.select(Some(SORT_ROW));
    }

    /// Copy what the dialog shows out of shared state
    pub fn sync(&mut self, state: &AppState) {
        let breeds = match &state.breeds {
            FetchStatus::Idle | FetchStatus::Loading => BreedList::Loading,
            FetchStatus::Failed(error) => BreedList::Failed(error.clone()),
            FetchStatus::Ready(breeds) => BreedList::Ready(breeds.clone()),
        };
        self.breeds = breeds;
        self.selected_breeds.clone_from(&state.query.selected_breeds);
        self.sort_order = state.query.sort_order;

        if self.selected_index > self.max_index() {
            self.selected_index = self.max_index();
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn breed_names(&self) -> &[String] {
        match &self.breeds {
            BreedList::Ready(breeds) => breeds,
            _ => &[],
        }
    }

    fn max_index(&self) -> usize {
        (FIRST_BREED_ROW + self.breed_names().len()).saturating_sub(1)
    }

    /// Action for the row under the cursor
    fn activate(&self) -> Option<Action> {
        match self.selected_index {
            SORT_ROW => Some(Action::ToggleSortOrder),
            CLEAR_ROW => Some(Action::ClearBreeds),
            row => self
                .breed_names()
                .get(row - FIRST_BREED_ROW)
                .map(|breed| Action::ToggleBreed(breed.clone())),
        }
    }

    fn select_next(&mut self) {
        if self.selected_index < self.max_index() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn is_selected(&self, breed: &str) -> bool {
        self.selected_breeds.iter().any(|b| b == breed)
    }
}

impl Component for BreedFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('s') => Some(Action::ToggleSortOrder),
            KeyCode::Char('c') => Some(Action::ClearBreeds),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = area.height.saturating_sub(4).clamp(12, 30);
        let popup_area = centered_popup(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Rows
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = if self.selected_breeds.is_empty() {
            "Showing all breeds".to_string()
        } else {
            format!("{} selected", self.selected_breeds.len())
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter by Breed ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        let mut items = vec![
            ListItem::new(Line::from(vec![
                Span::styled("Sort by Breed: ", Style::default().fg(Color::White)),
                Span::styled(
                    self.sort_order.label(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ])),
            ListItem::new(Line::from(Span::styled(
                "Clear all",
                Style::default().fg(Color::DarkGray),
            ))),
        ];

        match &self.breeds {
            BreedList::Loading => items.push(ListItem::new(Line::from(Span::styled(
                "Loading breeds...",
                Style::default().fg(Color::Yellow),
            )))),
            BreedList::Failed(error) => items.push(ListItem::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )))),
            BreedList::Ready(breeds) => {
                for breed in breeds {
                    let checked = self.is_selected(breed);
                    items.push(ListItem::new(Line::from(vec![
                        Span::styled(
                            if checked { "[x] " } else { "[ ] " },
                            Style::default().fg(Color::Green),
                        ),
                        Span::styled(
                            breed.clone(),
                            if checked {
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                    ])));
                }
            }
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, main_chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}
