//! Layout calculations for the dossier TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub menu_bar: Rect,
    pub content_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Menu bar
                Constraint::Min(6),    // Screen content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            menu_bar: chunks[0],
            content_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
        }
    }
}

/// Split the menu screen into banner and item list
pub fn menu_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(10)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Calculate centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_popup_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect_fixed(60, 8, area);
        assert_eq!(popup, Rect::new(0, 1, 40, 8));
    }

    #[test]
    fn test_layout_rows() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.menu_bar.height, 1);
        assert_eq!(layout.content_area.height, 21);
        assert_eq!(layout.hotkey_bar.y, 23);
    }
}
