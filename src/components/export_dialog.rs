//! Export options dialog
//!
//! Two radio sections: output format (CSV preselected) and which per-day
//! columns to include. Enter submits, Esc or a backdrop click cancels.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use crate::model::export::{ExportFormat, ExportScope};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Focus section in the export dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ExportFocus {
    #[default]
    Format,
    Scope,
}

/// Export format/scope dialog
pub struct ExportDialog {
    format_index: usize,
    scope_index: usize,
    focus: ExportFocus,
}

impl Default for ExportDialog {
    fn default() -> Self {
        Self {
            format_index: 0,
            scope_index: 0,
            focus: ExportFocus::Format,
        }
    }
}

impl ExportDialog {
    /// Reset to defaults for a new invocation; an untouched dialog exports CSV
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected_format(&self) -> ExportFormat {
        ExportFormat::ALL
            .get(self.format_index)
            .copied()
            .unwrap_or_default()
    }

    pub fn selected_scope(&self) -> ExportScope {
        ExportScope::ALL
            .get(self.scope_index)
            .copied()
            .unwrap_or_default()
    }

    pub fn popup_area(&self, area: Rect) -> Rect {
        centered_popup(area, 44, 14)
    }

    fn select_next(&mut self) {
        match self.focus {
            ExportFocus::Format => {
                self.format_index = (self.format_index + 1) % ExportFormat::ALL.len();
            }
            ExportFocus::Scope => {
                self.scope_index = (self.scope_index + 1) % ExportScope::ALL.len();
            }
        }
    }

    fn select_prev(&mut self) {
        match self.focus {
            ExportFocus::Format => {
                self.format_index =
                    (self.format_index + ExportFormat::ALL.len() - 1) % ExportFormat::ALL.len();
            }
            ExportFocus::Scope => {
                self.scope_index =
                    (self.scope_index + ExportScope::ALL.len() - 1) % ExportScope::ALL.len();
            }
        }
    }

    fn radio_line(label: &str, selected: bool, focused: bool) -> Line<'static> {
        let marker = if selected { "● " } else { "○ " };
        let style = if focused && selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::raw("   "),
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(label.to_string(), style),
        ])
    }
}

impl Component for ExportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    ExportFocus::Format => ExportFocus::Scope,
                    ExportFocus::Scope => ExportFocus::Format,
                };
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
            KeyCode::Char(c @ '1'..='3') => {
                let index = (c as usize) - ('1' as usize);
                match self.focus {
                    ExportFocus::Format => self.format_index = index,
                    ExportFocus::Scope => self.scope_index = index,
                }
                Some(Action::ConfirmModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = self.popup_area(area);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Format",
                Style::default()
                    .fg(if self.focus == ExportFocus::Format {
                        Color::Magenta
                    } else {
                        Color::DarkGray
                    })
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        for (i, format) in ExportFormat::ALL.iter().enumerate() {
            content.push(Self::radio_line(
                format.label(),
                i == self.format_index,
                self.focus == ExportFocus::Format,
            ));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            " Daily columns",
            Style::default()
                .fg(if self.focus == ExportFocus::Scope {
                    Color::Magenta
                } else {
                    Color::DarkGray
                })
                .add_modifier(Modifier::BOLD),
        )));
        for (i, scope) in ExportScope::ALL.iter().enumerate() {
            content.push(Self::radio_line(
                scope.label(),
                i == self.scope_index,
                self.focus == ExportFocus::Scope,
            ));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Export  "),
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Section  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Export Report ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
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
    fn test_untouched_dialog_selects_csv() {
        let dialog = ExportDialog::default();
        assert_eq!(dialog.selected_format(), ExportFormat::Csv);
        assert_eq!(dialog.selected_scope(), ExportScope::All);
    }

    #[test]
    fn test_navigation_cycles_formats() {
        let mut dialog = ExportDialog::default();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(dialog.selected_format(), ExportFormat::Xls);
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(dialog.selected_format(), ExportFormat::Html);
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(dialog.selected_format(), ExportFormat::Csv);
        dialog.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(dialog.selected_format(), ExportFormat::Html);
    }

    #[test]
    fn test_tab_moves_focus_to_scope() {
        let mut dialog = ExportDialog::default();
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(dialog.selected_scope(), ExportScope::WorkOnly);
        // Format untouched while scope is focused
        assert_eq!(dialog.selected_format(), ExportFormat::Csv);
    }

    #[test]
    fn test_enter_confirms_esc_closes() {
        let mut dialog = ExportDialog::default();
        let confirm = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(confirm, Some(Action::ConfirmModal));
        let close = dialog.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(close, Some(Action::CloseModal));
    }

    #[test]
    fn test_digit_selects_and_confirms() {
        let mut dialog = ExportDialog::default();
        let action = dialog.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        assert_eq!(action, Some(Action::ConfirmModal));
        assert_eq!(dialog.selected_format(), ExportFormat::Xls);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut dialog = ExportDialog::default();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        dialog.reset();
        assert_eq!(dialog.selected_format(), ExportFormat::Csv);
    }
}
