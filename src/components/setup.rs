//! First-run setup screen
//!
//! Asks for the snapshot path and the export directory, validates them and
//! saves the config. Shown whenever no config file exists yet.

use crate::action::Action;
use crate::component::Component;
use crate::config::Config;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupStep {
    SnapshotPath,
    ExportDir,
}

/// Setup screen component
pub struct SetupComponent {
    step: SetupStep,
    config: Config,
    input: String,
    error: Option<String>,
    complete: bool,
}

impl Default for SetupComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupComponent {
    pub fn new() -> Self {
        Self {
            step: SetupStep::SnapshotPath,
            config: Config::default(),
            input: String::new(),
            error: None,
            complete: false,
        }
    }

    /// The saved config once setup completed
    pub fn get_config(&self) -> Option<&Config> {
        if self.complete {
            Some(&self.config)
        } else {
            None
        }
    }

    fn advance(&mut self) -> Option<Action> {
        self.error = None;
        match self.step {
            SetupStep::SnapshotPath => {
                let path = std::path::Path::new(self.input.trim());
                if self.input.trim().is_empty() {
                    self.error = Some("Snapshot path is required".to_string());
                    return None;
                }
                if !path.is_file() {
                    self.error = Some(format!("No such file: {}", self.input.trim()));
                    return None;
                }
                self.config.snapshot_path = self.input.trim().to_string();
                self.input = self.config.export_dir.clone();
                self.step = SetupStep::ExportDir;
                None
            }
            SetupStep::ExportDir => {
                if !self.input.trim().is_empty() {
                    self.config.export_dir = self.input.trim().to_string();
                }
                if let Err(e) = self.config.save() {
                    self.error = Some(format!("Failed to save config: {}", e));
                    return None;
                }
                self.complete = true;
                Some(Action::SetupConfirm)
            }
        }
    }
}

impl Component for SetupComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::ForceQuit),
            KeyCode::Enter => self.advance(),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(9),
                Constraint::Min(0),
            ])
            .split(area);

        let (title, prompt) = match self.step {
            SetupStep::SnapshotPath => (
                " Setup 1/2 - Snapshot ",
                "Path to the attendance snapshot JSON:",
            ),
            SetupStep::ExportDir => (" Setup 2/2 - Exports ", "Directory for exported reports:"),
        };

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", self.input),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
        ];
        if let Some(ref error) = self.error {
            content.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            content.push(Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Continue  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Quit"),
            ]));
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, chunks[1]);
        Ok(())
    }
}
