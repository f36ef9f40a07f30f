//! Command line widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;

/// Split `text` around the character at `cursor`, which is shown as a space
/// when the cursor sits past the end.
fn split_at_cursor(text: &str, cursor: usize) -> (String, String, String) {
    let before: String = text.chars().take(cursor).collect();
    let at = text
        .chars()
        .nth(cursor)
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());
    let after: String = text.chars().skip(cursor + 1).collect();
    (before, at, after)
}

pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a GameTheme,
    placeholder: &'a str,
    is_active: bool,
    is_command_mode: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a GameTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Type a command...",
            is_active: true,
            is_command_mode: false,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn command_mode(mut self, is_command: bool) -> Self {
        self.is_command_mode = is_command;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt_style = self.theme.entry_style(crate::screen::EntryKind::Echo);

        let line = if self.content.is_empty() && !self.is_command_mode {
            Line::from(vec![
                Span::styled("> ", prompt_style),
                Span::styled(
                    self.placeholder,
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        } else {
            let (prefix, text, cursor) = match self.content.strip_prefix(':') {
                Some(rest) if self.is_command_mode => {
                    (":", rest, self.cursor_position.saturating_sub(1))
                }
                _ => ("> ", self.content, self.cursor_position),
            };
            let (before, at, after) = split_at_cursor(text, cursor);
            let cursor_style = if self.is_active {
                Style::default()
                    .fg(self.theme.echo_text)
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(vec![
                Span::styled(prefix, prompt_style),
                Span::raw(before),
                Span::styled(at, cursor_style),
                Span::raw(after),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_cursor() {
        assert_eq!(
            split_at_cursor("gö", 1),
            ("g".to_string(), "ö".to_string(), String::new())
        );
        assert_eq!(
            split_at_cursor("go", 2),
            ("go".to_string(), " ".to_string(), String::new())
        );
    }
}
