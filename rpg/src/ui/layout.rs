//! Screen layout

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the main screen, top to bottom
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub title_area: Rect,
    pub narrative_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            narrative_area: chunks[1],
            status_bar: chunks[2],
            hotkey_bar: chunks[3],
            input_area: chunks[4],
        }
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
