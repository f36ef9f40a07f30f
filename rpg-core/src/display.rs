//! Output sinks.
//!
//! The engine never prints. It pushes lines, a status snapshot and the
//! game-over notice into a [`GameDisplay`], which the front-end implements.

use crate::world::Player;

/// Snapshot shown in the status bar after every command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub hunger: i32,
    pub max_hunger: i32,
    pub gold: i32,
    pub location: String,
}

impl StatusLine {
    pub fn new(player: &Player, location: impl Into<String>) -> Self {
        Self {
            name: player.name.clone(),
            level: player.level,
            hp: player.hp,
            max_hp: player.max_hp,
            mp: player.mp,
            max_mp: player.max_mp,
            hunger: player.hunger,
            max_hunger: player.max_hunger,
            gold: player.gold,
            location: location.into(),
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Lv {} | HP {}/{} | MP {}/{} | Hunger {}/{} | Gold {} | {}",
            self.name,
            self.level,
            self.hp,
            self.max_hp,
            self.mp,
            self.max_mp,
            self.hunger,
            self.max_hunger,
            self.gold,
            self.location
        )
    }
}

/// Where the game writes everything the player sees.
pub trait GameDisplay {
    /// Append one block of text to the output log.
    fn append(&mut self, text: &str);

    /// Replace the status bar contents.
    fn set_status(&mut self, status: &StatusLine);

    /// Show the end-of-run notice.
    fn game_over(&mut self, title: &str, message: &str);

    /// Wipe the output log.
    fn clear(&mut self) {}
}

/// In-memory sink that records everything.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
    status: Option<StatusLine>,
    game_over: Option<(String, String)>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after the first `start` entries.
    pub fn since(&self, start: usize) -> &[String] {
        &self.lines[start.min(self.lines.len())..]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn game_over_notice(&self) -> Option<(&str, &str)> {
        self.game_over
            .as_ref()
            .map(|(title, message)| (title.as_str(), message.as_str()))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl GameDisplay for Transcript {
    fn append(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn set_status(&mut self, status: &StatusLine) {
        self.status = Some(status.clone());
    }

    fn game_over(&mut self, title: &str, message: &str) {
        self.game_over = Some((title.to_string(), message.to_string()));
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.game_over = None;
    }
}

/// Ten-cell bar, e.g. `[██████░░░░]` for 60/100.
pub fn meter(current: i32, max: i32) -> String {
    const CELLS: i32 = 10;
    let filled = if max <= 0 {
        0
    } else {
        (current.clamp(0, max) * CELLS / max).clamp(0, CELLS)
    };
    format!(
        "[{}{}]",
        "█".repeat(filled as usize),
        "░".repeat((CELLS - filled) as usize)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter() {
        assert_eq!(meter(60, 100), "[██████░░░░]");
        assert_eq!(meter(0, 100), "[░░░░░░░░░░]");
        assert_eq!(meter(150, 100), "[██████████]");
        assert_eq!(meter(5, 0), "[░░░░░░░░░░]");
    }

    #[test]
    fn test_transcript_since() {
        let mut t = Transcript::new();
        t.append("a");
        t.append("b");
        assert_eq!(t.since(1), &["b".to_string()]);
        assert!(t.since(10).is_empty());
    }

    #[test]
    fn test_status_line_display() {
        let player = Player::new("Ayla", 0);
        let line = StatusLine::new(&player, "Dark Forest");
        assert_eq!(
            line.to_string(),
            "Ayla | Lv 1 | HP 100/100 | MP 50/50 | Hunger 100/100 | Gold 0 | Dark Forest"
        );
    }
}
