//! Main report screen
//!
//! Owns the search state and the main-screen key map; the grid itself is a
//! child component. Changing the period, department or query anywhere on
//! this screen re-derives the report immediately - there is no separate
//! "apply" step.

use crate::action::Action;
use crate::component::Component;
use crate::components::grid::GridComponent;
use crate::model::columns::ColumnSelection;
use crate::model::period::Period;
use crate::model::report::ReportModel;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Search input state for the main screen
#[derive(Default)]
pub struct HomeComponent {
    pub search_mode: bool,
    pub query: String,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('e') => Some(Action::OpenExportDialog),
            KeyCode::Char('c') => Some(Action::OpenColumnPicker),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::Char('d') => Some(Action::OpenDeptFilter),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('n') => Some(Action::NextMonth),
            KeyCode::Char('p') => Some(Action::PrevMonth),
            KeyCode::Char('N') => Some(Action::NextYear),
            KeyCode::Char('P') => Some(Action::PrevYear),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::DaysLeft),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::DaysRight),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs the full context; see draw_home_screen
        Ok(())
    }
}

/// Everything the main screen needs to render
pub struct HomeRenderContext<'a> {
    pub report: Option<&'a ReportModel>,
    pub columns: &'a ColumnSelection,
    pub period: Period,
    pub dept_name: Option<&'a str>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    grid: &mut GridComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    draw_top_bar(frame, chunks[0], home, ctx);

    match (ctx.report, ctx.error) {
        (_, Some(error)) => draw_message(frame, chunks[1], error, Color::Red),
        (Some(report), None) => grid.draw_with_report(frame, chunks[1], report, ctx.columns)?,
        (None, None) => draw_message(
            frame,
            chunks[1],
            "No snapshot loaded. Press 'r' to reload.",
            Color::DarkGray,
        ),
    }

    draw_status_line(frame, chunks[2], ctx);
    draw_help_bar(frame, chunks[3]);
    Ok(())
}

fn draw_top_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let mut spans = vec![
        Span::styled(
            " Attendance ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            ctx.period.label(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Dept: "),
        Span::styled(
            ctx.dept_name.unwrap_or("All").to_string(),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   Search: "),
    ];
    if home.search_mode {
        spans.push(Span::styled(
            format!("{}_", home.query),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else if home.query.is_empty() {
        spans.push(Span::styled("-", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            home.query.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(bar, area);
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(color))))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_status_line(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let line = if let Some(status) = ctx.status_message {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let hint = |keys: &str, label: &str| {
        vec![
            Span::styled(
                format!(" {} ", keys),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{}  ", label)),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(hint("n/p", "Month"));
    spans.extend(hint("N/P", "Year"));
    spans.extend(hint("d", "Dept"));
    spans.extend(hint("/", "Search"));
    spans.extend(hint("c", "Columns"));
    spans.extend(hint("e", "Export"));
    spans.extend(hint("?", "Help"));
    spans.extend(hint("q", "Quit"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_map_period_and_modals() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('n'))).unwrap(),
            Some(Action::NextMonth)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('P'))).unwrap(),
            Some(Action::PrevYear)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('e'))).unwrap(),
            Some(Action::OpenExportDialog)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('/'))).unwrap(),
            Some(Action::EnterSearchMode)
        );
    }

    #[test]
    fn test_ctrl_d_pages_instead_of_dept() {
        let mut home = HomeComponent::new();
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(home.handle_key_event(ctrl_d).unwrap(), Some(Action::PageDown));
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::OpenDeptFilter)
        );
    }

    #[test]
    fn test_search_editing() {
        let mut home = HomeComponent::new();
        home.enter_search_mode();
        home.search_input('l');
        home.search_input('i');
        assert_eq!(home.query, "li");
        home.search_backspace();
        assert_eq!(home.query, "l");
        home.exit_search_mode();
        assert!(!home.search_mode);
        // Query survives leaving search mode
        assert_eq!(home.query, "l");
    }
}
