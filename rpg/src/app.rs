//! Main application state and logic

use std::collections::VecDeque;

use rpg_core::{Game, GameState};

use crate::screen::TuiDisplay;
use crate::ui::theme::GameTheme;
use crate::ui::Overlay;

const HISTORY_LIMIT: usize = 100;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and hotkeys
    #[default]
    Normal,
    /// Typing a game command
    Insert,
    /// Entering a `:` command
    Command,
}

/// Main application state
pub struct App {
    pub game: Game<TuiDisplay>,

    // UI state
    pub theme: GameTheme,
    overlay: Option<Overlay>,
    game_over_seen: bool,

    // Narrative display
    pub narrative_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    pub animation_frame: u8,
}

impl App {
    pub fn new(game: Game<TuiDisplay>) -> Self {
        let mut app = Self {
            game,
            theme: GameTheme::default(),
            overlay: None,
            game_over_seen: false,
            narrative_scroll: 0,
            scroll_locked_to_bottom: true,
            input_mode: InputMode::Insert,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(HISTORY_LIMIT),
            history_index: None,
            saved_input: None,
            status_message: None,
            should_quit: false,
            animation_frame: 0,
        };
        app.game.display_mut().flush();
        app.set_status("Type 'start' to begin. Esc for normal mode, '?' for keys.");
        app
    }

    pub fn game_state(&self) -> GameState {
        self.game.state()
    }

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer.clear();
        self.input_buffer.push(':');
        self.cursor_position = 1;
    }

    pub fn enter_insert_mode(&mut self) {
        self.input_mode = InputMode::Insert;
    }

    /// Exit to normal mode, dropping any half-typed `:` command
    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.input_buffer.starts_with(':') {
            self.clear_input();
        }
    }

    /// Send one line to the game engine.
    pub fn run_game_command(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        self.clear_status();
        self.game.execute(input);
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Scroll narrative to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // The widget caps this to the real maximum
        self.narrative_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Rough upper bound on scroll, assuming a ~70 column panel
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 70;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .game
            .display()
            .shown()
            .iter()
            .map(|item| {
                item.content
                    .lines()
                    .map(|line| (line.chars().count() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll narrative up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.narrative_scroll > max_scroll {
            self.narrative_scroll = max_scroll;
        }
        self.narrative_scroll = self.narrative_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll narrative down. Pressing G re-locks to the bottom.
    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        self.narrative_scroll = self
            .narrative_scroll
            .saturating_add(lines)
            .min(max_scroll + 100);
    }

    /// Take the current input, recording it in history.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;

        if !input.starts_with(':') && self.input_history.front() != Some(&input) {
            self.input_history.push_front(input.clone());
            self.input_history.truncate(HISTORY_LIMIT);
        }
        self.history_index = None;
        self.saved_input = None;

        Some(input)
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }

    /// Insert a character at the cursor (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self.byte_index(self.cursor_position);
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    fn remove_char_at(&mut self, char_index: usize) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(char_index) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_char_at(self.cursor_position);
        }
    }

    pub fn delete(&mut self) {
        self.remove_char_at(self.cursor_position);
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Step back through previously entered commands
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let idx = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.input_history.len() => i + 1,
            Some(i) => i,
        };

        if let Some(entry) = self.input_history.get(idx).cloned() {
            self.set_input(entry);
            self.history_index = Some(idx);
        }
    }

    /// Step forward, ending at whatever was typed before browsing
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                let saved = self.saved_input.take().unwrap_or_default();
                self.set_input(saved);
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1).cloned() {
                    self.set_input(entry);
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Process a colon command. Returns false if it was not recognised.
    pub fn process_command(&mut self, command: &str) -> bool {
        let cmd = command.trim_start_matches(':');
        let mut parts = cmd.split_whitespace();

        let Some(head) = parts.next() else {
            return false;
        };

        match head {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
            }
            "w" | "save" => {
                self.run_game_command("save");
            }
            "wq" => {
                self.run_game_command("save");
                self.should_quit = true;
            }
            "load" | "e" => {
                self.run_game_command("load");
            }
            "restart" => {
                self.run_game_command("restart");
            }
            "help" | "h" => {
                self.toggle_help();
            }
            "seed" => {
                let seed = self.game.seed();
                self.set_status(format!("World seed: {seed}"));
            }
            other => {
                self.set_status(format!("Unknown command: {other}"));
                return false;
            }
        }
        true
    }

    /// Advance animations: reveal one queued entry and raise the
    /// game-over overlay once its text has been shown.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);

        let display = self.game.display_mut();
        let revealed = display.reveal_next();
        let idle = !display.has_pending();
        let notice = display.game_over_notice().is_some();

        if revealed && self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }

        if !notice {
            self.game_over_seen = false;
        } else if idle && !self.game_over_seen {
            self.game_over_seen = true;
            self.overlay = Some(Overlay::GameOver);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Replace the input and move the cursor to its end
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{GameConfig, MemoryStore};

    fn app() -> App {
        let game = Game::new(
            GameConfig::seeded(42),
            TuiDisplay::new(),
            Box::new(MemoryStore::new()),
        );
        App::new(game)
    }

    #[test]
    fn test_unicode_editing() {
        let mut app = app();
        for c in "gö north".chars() {
            app.type_char(c);
        }
        app.cursor_home();
        app.cursor_right();
        app.cursor_right();
        app.backspace();
        assert_eq!(app.input_buffer(), "g north");
        app.delete();
        assert_eq!(app.input_buffer(), "gnorth");
        app.cursor_end();
        assert_eq!(app.cursor_position(), 6);
    }

    #[test]
    fn test_history_browsing() {
        let mut app = app();
        app.set_input("look");
        app.submit_input();
        app.set_input("go forest");
        app.submit_input();
        app.set_input("att");

        app.history_prev();
        assert_eq!(app.input_buffer(), "go forest");
        app.history_prev();
        assert_eq!(app.input_buffer(), "look");
        app.history_prev();
        assert_eq!(app.input_buffer(), "look");
        app.history_next();
        app.history_next();
        assert_eq!(app.input_buffer(), "att");
        assert!(app.history_index.is_none());
    }

    #[test]
    fn test_colon_commands_skip_history() {
        let mut app = app();
        app.enter_command_mode();
        app.type_char('w');
        let cmd = app.submit_input().unwrap();
        assert_eq!(cmd, ":w");
        assert!(app.input_history.is_empty());
        assert!(!app.process_command(":frobnicate"));
        assert_eq!(app.status_message(), Some("Unknown command: frobnicate"));
    }

    #[test]
    fn test_game_command_output_is_revealed_over_ticks() {
        let mut app = app();
        let before = app.game.display().shown().len();
        app.run_game_command("start");
        assert_eq!(app.game_state(), GameState::Playing);
        assert!(app.game.display().has_pending());

        while app.game.display().has_pending() {
            app.tick();
        }
        assert!(app.game.display().shown().len() > before);
    }

    #[test]
    fn test_game_over_overlay_after_starving() {
        let mut app = app();
        app.run_game_command("start");
        app.game.player_mut().hunger = 1;
        app.run_game_command("wait");
        assert_eq!(app.game_state(), GameState::Dead);

        for _ in 0..200 {
            app.tick();
        }
        assert!(matches!(app.overlay(), Some(Overlay::GameOver)));

        app.close_overlay();
        app.tick();
        assert!(!app.has_overlay());
    }
}
