//! Colors and styles for the terminal UI

use ratatui::style::{Color, Modifier, Style};

use crate::screen::EntryKind;

#[derive(Debug, Clone)]
pub struct GameTheme {
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Meter colors
    pub hp_healthy: Color,
    pub hp_wounded: Color,
    pub hp_critical: Color,
    pub mana: Color,
    pub hunger: Color,
    pub gold: Color,

    // Narrative text
    pub echo_text: Color,
    pub narration_text: Color,
    pub combat_text: Color,
    pub system_text: Color,

    pub danger: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            hp_healthy: Color::Green,
            hp_wounded: Color::Yellow,
            hp_critical: Color::Red,
            mana: Color::LightBlue,
            hunger: Color::LightYellow,
            gold: Color::Yellow,

            echo_text: Color::Cyan,
            narration_text: Color::White,
            combat_text: Color::LightRed,
            system_text: Color::DarkGray,

            danger: Color::LightRed,
        }
    }
}

impl GameTheme {
    /// Style for a narrative entry of the given kind
    pub fn entry_style(&self, kind: EntryKind) -> Style {
        match kind {
            EntryKind::Echo => Style::default()
                .fg(self.echo_text)
                .add_modifier(Modifier::ITALIC),
            EntryKind::Narration => Style::default().fg(self.narration_text),
            EntryKind::Combat => Style::default().fg(self.combat_text),
            EntryKind::System => Style::default()
                .fg(self.system_text)
                .add_modifier(Modifier::DIM),
        }
    }

    /// Meter color for a current/max pair
    pub fn hp_color(&self, current: i32, max: i32) -> Color {
        let ratio = if max > 0 {
            current as f32 / max as f32
        } else {
            0.0
        };
        if ratio > 0.5 {
            self.hp_healthy
        } else if ratio > 0.25 {
            self.hp_wounded
        } else {
            self.hp_critical
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn title_style(&self, danger: bool) -> Style {
        Style::default()
            .fg(if danger { self.danger } else { self.foreground })
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_color_thresholds() {
        let theme = GameTheme::default();
        assert_eq!(theme.hp_color(100, 100), Color::Green);
        assert_eq!(theme.hp_color(40, 100), Color::Yellow);
        assert_eq!(theme.hp_color(25, 100), Color::Red);
        assert_eq!(theme.hp_color(5, 0), Color::Red);
    }
}
