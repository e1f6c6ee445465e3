//! Summary column picker dialog
//!
//! Checkbox list over the column registry; confirming applies the checked
//! set and rebuilds the report.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use crate::model::columns::{all_columns, ColumnSelection};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Column picker dialog
pub struct ColumnPickerDialog {
    /// Checked state per registry entry, in registry order
    checked: Vec<bool>,
    cursor: usize,
    list_state: ListState,
}

impl Default for ColumnPickerDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnPickerDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            checked: all_columns().iter().map(|c| c.default_on).collect(),
            cursor: 0,
            list_state,
        }
    }

    /// Seed the checkboxes from the current selection
    pub fn set_selection(&mut self, selection: &ColumnSelection) {
        self.checked = all_columns()
            .iter()
            .map(|c| selection.is_enabled(c.key))
            .collect();
        self.cursor = 0;
        self.list_state.select(Some(0));
    }

    /// The selection the checked boxes describe
    pub fn selection(&self) -> ColumnSelection {
        ColumnSelection::from_keys(
            all_columns()
                .iter()
                .zip(&self.checked)
                .filter(|(_, on)| **on)
                .map(|(c, _)| c.key.to_string()),
        )
    }

    pub fn popup_area(&self, area: Rect) -> Rect {
        let height = (all_columns().len() as u16 + 7).min(area.height.saturating_sub(2));
        centered_popup(area, 44, height)
    }

    fn toggle_current(&mut self) {
        if let Some(on) = self.checked.get_mut(self.cursor) {
            *on = !*on;
        }
    }

    fn select_next(&mut self) {
        if self.cursor + 1 < all_columns().len() {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    fn select_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }
}

impl Component for ColumnPickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('c') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Char(' ') => {
                self.toggle_current();
                None
            }
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

        let items: Vec<ListItem> = all_columns()
            .iter()
            .zip(&self.checked)
            .map(|(col, on)| {
                let marker = if *on { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(col.title, Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  ({})", col.group.label()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Summary Columns ")
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
            Span::styled(" Space ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle  "),
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Apply  "),
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

    #[test]
    fn test_seeded_from_selection() {
        let mut dialog = ColumnPickerDialog::new();
        let current = ColumnSelection::from_keys(["present".to_string()]);
        dialog.set_selection(&current);
        assert_eq!(dialog.selection(), current);
    }

    #[test]
    fn test_space_toggles_under_cursor() {
        let mut dialog = ColumnPickerDialog::new();
        dialog.set_selection(&ColumnSelection::default());
        // First registry entry is "present", enabled by default
        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(!dialog.selection().is_enabled("present"));
        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(dialog.selection().is_enabled("present"));
    }

    #[test]
    fn test_navigation_clamps_at_ends() {
        let mut dialog = ColumnPickerDialog::new();
        dialog.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(dialog.cursor, 0);
        for _ in 0..100 {
            dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        }
        assert_eq!(dialog.cursor, all_columns().len() - 1);
    }

    #[test]
    fn test_enter_confirms_esc_closes() {
        let mut dialog = ColumnPickerDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ConfirmModal)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
