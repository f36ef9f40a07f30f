//! Status bar and hotkey hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use rpg_core::display::meter;
use rpg_core::{GameState, StatusLine};

use crate::app::InputMode;
use crate::ui::theme::GameTheme;

fn mode_span(mode: InputMode) -> Span<'static> {
    let (label, color) = match mode {
        InputMode::Normal => (" NORMAL ", Color::Blue),
        InputMode::Insert => (" INSERT ", Color::Green),
        InputMode::Command => (" COMMAND ", Color::Magenta),
    };
    Span::styled(
        label,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

/// Player vitals plus the current input mode
pub struct StatusBarWidget<'a> {
    status: &'a StatusLine,
    mode: InputMode,
    theme: &'a GameTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(status: &'a StatusLine, mode: InputMode, theme: &'a GameTheme) -> Self {
        Self {
            status,
            mode,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    fn vitals(&self) -> Vec<Span<'a>> {
        let s = self.status;
        let hp_color = self.theme.hp_color(s.hp, s.max_hp);
        let hunger_color = if s.hunger * 5 <= s.max_hunger {
            self.theme.hp_critical
        } else {
            self.theme.hunger
        };

        vec![
            Span::styled(
                format!("{} Lv{}", s.name, s.level),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("HP {} {}/{}", meter(s.hp, s.max_hp), s.hp, s.max_hp),
                Style::default().fg(hp_color),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("MP {}/{}", s.mp, s.max_mp),
                Style::default().fg(self.theme.mana),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("Food {}/{}", s.hunger, s.max_hunger),
                Style::default().fg(hunger_color),
            ),
            Span::raw(" │ "),
            Span::styled(
                format!("{}g", s.gold),
                Style::default().fg(self.theme.gold),
            ),
        ]
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let mut spans = vec![mode_span(self.mode), Span::raw(" ")];
        match self.message {
            Some(message) => spans.push(Span::styled(
                message.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            None => spans.extend(self.vitals()),
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

/// One-line list of the keys that do something right now
pub struct HotkeyBarWidget {
    state: GameState,
    mode: InputMode,
}

impl HotkeyBarWidget {
    pub fn new(state: GameState, mode: InputMode) -> Self {
        Self { state, mode }
    }

    fn hints(&self) -> &'static str {
        match (self.mode, self.state) {
            (InputMode::Insert, _) => {
                "Enter send │ ↑/↓ history │ PgUp/PgDn scroll │ Esc normal"
            }
            (InputMode::Command, _) => ":q quit │ :w save │ :load │ :seed │ Esc cancel",
            (InputMode::Normal, GameState::Menu) => {
                "S start │ i type │ : command │ ? help │ q quit"
            }
            (InputMode::Normal, GameState::Playing) => {
                "L look │ T travel │ D dive │ W wait │ I pack │ C stats │ U use │ i type │ ? help"
            }
            (InputMode::Normal, GameState::Combat) => {
                "A attack │ c cast │ b ability │ U use │ I pack │ i type │ ? help"
            }
            (InputMode::Normal, GameState::Dead) => "R restart │ : command │ q quit",
        }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(
            format!(" {}", self.hints()),
            Style::default().add_modifier(Modifier::DIM),
        ));
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_text() {
        let theme = GameTheme::default();
        let status = StatusLine {
            name: "Mira".into(),
            level: 2,
            hp: 60,
            max_hp: 120,
            mp: 40,
            max_mp: 60,
            hunger: 90,
            max_hunger: 100,
            gold: 15,
            location: "Dark Forest".into(),
        };
        let widget = StatusBarWidget::new(&status, InputMode::Insert, &theme);
        let text: String = widget.vitals().iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(
            text,
            "Mira Lv2 │ HP [█████░░░░░] 60/120 │ MP 40/60 │ Food 90/100 │ 15g"
        );
    }

    #[test]
    fn test_hints_follow_state() {
        let combat = HotkeyBarWidget::new(GameState::Combat, InputMode::Normal);
        assert!(combat.hints().starts_with("A attack"));
        let dead = HotkeyBarWidget::new(GameState::Dead, InputMode::Normal);
        assert!(dead.hints().starts_with("R restart"));
    }
}
