//! Layout helpers

use ratatui::layout::Rect;

/// Calculate a centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Whether a terminal cell position falls inside `rect`
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_centers_and_clamps() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let clamped = centered_popup(area, 200, 90);
        assert_eq!(clamped.width, 100);
        assert_eq!(clamped.height, 40);
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10, 5, 20, 4);
        assert!(contains(rect, 10, 5));
        assert!(contains(rect, 29, 8));
        assert!(!contains(rect, 30, 8));
        assert!(!contains(rect, 9, 5));
        assert!(!contains(rect, 10, 9));
    }
}
