//! Help dialog listing the keyboard shortcuts

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl HelpDialog {
    pub fn popup_area(&self, area: Rect) -> Rect {
        let margin = 4;
        Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        )
    }
}

fn key_line(keys: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", keys),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description.to_string()),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn build_help_content() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        section("Report"),
        key_line("n / p", "Next / previous month"),
        key_line("N / P", "Next / previous year"),
        key_line("d", "Filter by department"),
        key_line("/", "Search by badge or name"),
        key_line("c", "Choose summary columns"),
        key_line("r", "Reload the snapshot from disk"),
        Line::from(""),
        section("Grid"),
        key_line("j / k", "Scroll rows"),
        key_line("h / l", "Scroll days"),
        key_line("Ctrl-d/u", "Page down / up"),
        Line::from(""),
        section("Export"),
        key_line("e", "Open the export dialog"),
        Line::from(""),
        section("General"),
        key_line("?", "This help"),
        key_line("q", "Quit"),
    ]
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let dialog_area = self.popup_area(area);
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = content.len().saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);
        Ok(())
    }
}
