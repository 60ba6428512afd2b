//! Layout calculations for the site TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub banner: Option<Rect>,
    pub footer: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size.
    ///
    /// `banner_height` reserves a strip above the footer for the consent
    /// banner.
    pub fn calculate(area: Rect, banner_height: Option<u16>) -> Self {
        let banner = banner_height.unwrap_or(0);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Header
                Constraint::Min(5),         // Page body
                Constraint::Length(banner), // Consent banner
                Constraint::Length(3),      // Footer
                Constraint::Length(1),      // Status bar
                Constraint::Length(1),      // Hotkey bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            body: chunks[1],
            banner: banner_height.map(|_| chunks[2]),
            footer: chunks[3],
            status_bar: chunks[4],
            hotkey_bar: chunks[5],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
