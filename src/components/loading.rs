//! Loading overlay
//!
//! Shown when a rebuild or export is submitted. Two independent safety nets
//! hide it again: a fixed 2000 ms timeout checked on each tick, and the
//! terminal regaining focus (the user coming back after the export landed).
//! Both hides are unconditional and hiding twice is a no-op, so neither
//! needs to know about the other.

use crate::components::layout::centered_popup;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const AUTO_HIDE: Duration = Duration::from_millis(2000);

/// Loading indicator with timed auto-hide
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    shown_at: Option<Instant>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self { shown_at: None }
    }

    /// Show the overlay and arm the auto-hide timer
    pub fn show(&mut self) {
        self.shown_at = Some(Instant::now());
    }

    /// Hide the overlay; a no-op when already hidden
    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.is_some()
    }

    /// Whether the auto-hide delay has elapsed since the last show
    pub fn is_expired(&self) -> bool {
        self.shown_at
            .map(|t| t.elapsed() >= AUTO_HIDE)
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn backdate(&mut self, by: Duration) {
        if let Some(t) = self.shown_at {
            self.shown_at = t.checked_sub(by);
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if !self.is_visible() {
            return;
        }
        let popup_area = centered_popup(area, 24, 5);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Processing...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hide_idempotent() {
        let mut loading = LoadingOverlay::new();
        assert!(!loading.is_visible());

        loading.show();
        assert!(loading.is_visible());

        loading.hide();
        assert!(!loading.is_visible());
        // Hiding again is harmless
        loading.hide();
        assert!(!loading.is_visible());
    }

    #[test]
    fn test_not_expired_right_after_show() {
        let mut loading = LoadingOverlay::new();
        loading.show();
        assert!(!loading.is_expired());
    }

    #[test]
    fn test_expired_after_delay() {
        let mut loading = LoadingOverlay::new();
        loading.show();
        loading.backdate(Duration::from_millis(2001));
        assert!(loading.is_expired());
    }

    #[test]
    fn test_hidden_overlay_never_expires() {
        let loading = LoadingOverlay::new();
        assert!(!loading.is_expired());
    }

    #[test]
    fn test_reshow_rearms_timer() {
        let mut loading = LoadingOverlay::new();
        loading.show();
        loading.backdate(Duration::from_millis(2001));
        assert!(loading.is_expired());
        loading.show();
        assert!(!loading.is_expired());
    }
}
