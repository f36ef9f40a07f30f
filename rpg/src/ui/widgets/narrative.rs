//! Scrolling game log

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use crate::screen::{EntryKind, NarrativeItem};
use crate::ui::theme::GameTheme;

pub struct NarrativeWidget<'a> {
    items: &'a [NarrativeItem],
    scroll: usize,
    theme: &'a GameTheme,
    title: &'a str,
    typing: bool,
    frame: u8,
}

impl<'a> NarrativeWidget<'a> {
    pub fn new(items: &'a [NarrativeItem], theme: &'a GameTheme) -> Self {
        Self {
            items,
            scroll: 0,
            theme,
            title: " Adventure Log ",
            typing: false,
            frame: 0,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Show a blinking cursor while more output is queued
    pub fn typing(mut self, typing: bool, frame: u8) -> Self {
        self.typing = typing;
        self.frame = frame;
        self
    }

    fn build_lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line> = Vec::new();
        for item in self.items {
            let style = self.theme.entry_style(item.kind);
            // Keep art and tables on their own lines instead of reflowing them
            for line in item.content.lines() {
                lines.push(Line::from(Span::styled(line, style)));
            }
            if item.kind != EntryKind::Echo {
                lines.push(Line::from(""));
            }
        }
        if self.typing && self.frame % 4 < 2 {
            lines.push(Line::from(Span::styled(
                "▌",
                self.theme
                    .entry_style(EntryKind::Narration)
                    .add_modifier(Modifier::DIM),
            )));
        }
        lines
    }
}

fn draw_hint(buf: &mut Buffer, inner: Rect, y: u16, hint: &str) {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let limit = inner.x + inner.width.saturating_sub(2);
    for (i, ch) in hint.chars().enumerate() {
        let x = inner.x + i as u16;
        if x < limit {
            buf[(x, y)].set_char(ch).set_style(style);
        }
    }
}

impl Widget for NarrativeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines();
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(inner, buf);

        if total_lines <= visible_height {
            return;
        }

        let scrollbar_area = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .symbols(scrollbar::VERTICAL)
            .thumb_style(Style::default().fg(Color::DarkGray))
            .track_style(Style::default().fg(Color::Black))
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .render(scrollbar_area, buf, &mut scrollbar_state);

        if scroll > 0 {
            draw_hint(buf, inner, inner.y, &format!(" ↑{scroll} "));
        }
        if scroll < max_scroll {
            let remaining = max_scroll - scroll;
            let bottom = inner.y + inner.height.saturating_sub(1);
            draw_hint(buf, inner, bottom, &format!(" ↓{remaining} more "));
        }
    }
}
