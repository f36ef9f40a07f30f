//! Display sink for the terminal UI.
//!
//! The engine appends text synchronously; the TUI reveals it one entry per
//! tick so long outputs scroll in instead of appearing all at once.

use std::collections::VecDeque;

use rpg_core::{GameDisplay, StatusLine};

/// How an entry is styled in the narrative panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The player's own command, echoed back.
    Echo,
    Narration,
    Combat,
    /// Errors, hints and usage messages.
    System,
}

impl EntryKind {
    fn classify(text: &str) -> Self {
        const COMBAT_MARKS: [&str; 6] = ["⚔", "💥", "🎉", "💀", "☠", "🔥"];
        const SYSTEM_PREFIXES: [&str; 8] = [
            "Unknown command",
            "You can't",
            "You don't",
            "You need",
            "Not enough",
            "There's no",
            "The game hasn't started",
            "You have died",
        ];

        if text.starts_with("> ") {
            EntryKind::Echo
        } else if COMBAT_MARKS.iter().any(|m| text.contains(m)) {
            EntryKind::Combat
        } else if SYSTEM_PREFIXES.iter().any(|p| text.starts_with(p)) || text.ends_with('?') {
            EntryKind::System
        } else {
            EntryKind::Narration
        }
    }
}

/// A single entry in the narrative display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeItem {
    pub content: String,
    pub kind: EntryKind,
}

#[derive(Debug, Default)]
pub struct TuiDisplay {
    shown: Vec<NarrativeItem>,
    pending: VecDeque<NarrativeItem>,
    status: StatusLine,
    game_over: Option<(String, String)>,
}

impl TuiDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> &[NarrativeItem] {
        &self.shown
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move the next queued entry onto the screen. Returns false when idle.
    pub fn reveal_next(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(item) => {
                self.shown.push(item);
                true
            }
            None => false,
        }
    }

    /// Show everything still queued.
    pub fn flush(&mut self) {
        self.shown.extend(self.pending.drain(..));
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn game_over_notice(&self) -> Option<(&str, &str)> {
        self.game_over
            .as_ref()
            .map(|(title, message)| (title.as_str(), message.as_str()))
    }
}

impl GameDisplay for TuiDisplay {
    fn append(&mut self, text: &str) {
        self.pending.push_back(NarrativeItem {
            content: text.to_string(),
            kind: EntryKind::classify(text),
        });
    }

    fn set_status(&mut self, status: &StatusLine) {
        self.status = status.clone();
    }

    fn game_over(&mut self, title: &str, message: &str) {
        self.game_over = Some((title.to_string(), message.to_string()));
    }

    fn clear(&mut self) {
        self.shown.clear();
        self.pending.clear();
        self.game_over = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_queue_until_revealed() {
        let mut display = TuiDisplay::new();
        display.append("> look");
        display.append("📍 Dark Forest");
        assert!(display.shown().is_empty());

        assert!(display.reveal_next());
        assert_eq!(display.shown()[0].kind, EntryKind::Echo);
        display.flush();
        assert_eq!(display.shown().len(), 2);
        assert!(!display.reveal_next());
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            EntryKind::classify("⚔️  You attack the Goblin for 8 damage!"),
            EntryKind::Combat
        );
        assert_eq!(
            EntryKind::classify("Unknown command: dance. Type 'help' for available commands."),
            EntryKind::System
        );
        assert_eq!(
            EntryKind::classify("Go where? Type 'go <location>' to travel."),
            EntryKind::Narration
        );
        assert_eq!(EntryKind::classify("📦 You pick up the Bread."), EntryKind::Narration);
    }

    #[test]
    fn test_clear_drops_game_over() {
        let mut display = TuiDisplay::new();
        display.game_over("Game Over", "Your adventure has ended.");
        display.append("x");
        display.clear();
        assert!(display.game_over_notice().is_none());
        assert!(!display.has_pending());
    }
}
