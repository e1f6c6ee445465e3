//! Department filter dialog
//!
//! A list of departments with an "All departments" entry on top; choosing
//! one re-filters the report immediately.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use crate::model::snapshot::Department;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Department filter dialog
pub struct DeptFilterDialog {
    /// None is the "All departments" entry
    entries: Vec<(Option<u32>, String)>,
    selected_index: usize,
    list_state: ListState,
    current: Option<u32>,
}

impl Default for DeptFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeptFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            entries: vec![(None, "All departments".to_string())],
            selected_index: 0,
            list_state,
            current: None,
        }
    }

    /// Populate the list and highlight the active filter
    pub fn set_departments(&mut self, departments: &[Department], current: Option<u32>) {
        self.entries = std::iter::once((None, "All departments".to_string()))
            .chain(departments.iter().map(|d| (Some(d.id), d.name.clone())))
            .collect();
        self.current = current;
        self.selected_index = self
            .entries
            .iter()
            .position(|(id, _)| *id == current)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    pub fn selected_dept(&self) -> Option<u32> {
        self.entries
            .get(self.selected_index)
            .and_then(|(id, _)| *id)
    }

    pub fn popup_area(&self, area: Rect) -> Rect {
        let height = (self.entries.len() as u16 + 5)
            .max(8)
            .min(area.height.saturating_sub(2).max(1));
        centered_popup(area, 40, height)
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
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
}

impl Component for DeptFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('d') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetDeptFilter(self.selected_dept())),
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = self.popup_area(area);
        frame.render_widget(Clear, popup_area);

        let chunks = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Min(3),
                ratatui::layout::Constraint::Length(3),
            ])
            .split(popup_area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|(id, name)| {
                let is_current = *id == self.current;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        name.clone(),
                        if is_current {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Department ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn departments() -> Vec<Department> {
        vec![
            Department { id: 1, name: "Assembly".into() },
            Department { id: 2, name: "Packing".into() },
        ]
    }

    #[test]
    fn test_first_entry_clears_filter() {
        let mut dialog = DeptFilterDialog::new();
        dialog.set_departments(&departments(), None);
        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SetDeptFilter(None)));
    }

    #[test]
    fn test_select_department() {
        let mut dialog = DeptFilterDialog::new();
        dialog.set_departments(&departments(), None);
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SetDeptFilter(Some(2))));
    }

    #[test]
    fn test_cursor_starts_on_active_filter() {
        let mut dialog = DeptFilterDialog::new();
        dialog.set_departments(&departments(), Some(2));
        assert_eq!(dialog.selected_dept(), Some(2));
    }
}
