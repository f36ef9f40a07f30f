//! Testing utilities for the game.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted game scenarios against a fixed seed
//! - Assertion helpers for verifying game state

use crate::config::GameConfig;
use crate::display::Transcript;
use crate::game::Game;
use crate::persist::MemoryStore;
use crate::world::{GameState, Player};

/// Seed used by [`TestHarness::new`].
pub const TEST_SEED: u64 = 42;

/// Test harness for running game scenarios.
///
/// Wraps a seeded [`Game`] writing to a [`Transcript`] and saving into
/// memory, so every run is reproducible and leaves no files behind.
pub struct TestHarness {
    /// The game under test.
    pub game: Game<Transcript>,
}

impl TestHarness {
    /// Create a harness with the default test seed.
    pub fn new() -> Self {
        Self::with_seed(TEST_SEED)
    }

    /// Create a harness with a custom seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(GameConfig::seeded(seed))
    }

    pub fn with_config(config: GameConfig) -> Self {
        let game = Game::new(config, Transcript::new(), Box::new(MemoryStore::new()));
        Self { game }
    }

    /// Create a harness that has already typed `start`.
    pub fn started() -> Self {
        let mut harness = Self::new();
        harness.input("start");
        harness
    }

    /// Send one line of input and return the lines it produced.
    pub fn input(&mut self, text: &str) -> Vec<String> {
        let before = self.game.display().len();
        self.game.execute(text);
        self.game.display().since(before).to_vec()
    }

    /// Send several lines in order.
    pub fn input_all(&mut self, lines: &[&str]) -> Vec<String> {
        lines.iter().flat_map(|line| self.input(line)).collect()
    }

    pub fn player(&self) -> &Player {
        self.game.player()
    }

    pub fn player_mut(&mut self) -> &mut Player {
        self.game.player_mut()
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    /// Get current player HP as (current, max).
    pub fn player_hp(&self) -> (i32, i32) {
        let player = self.game.player();
        (player.hp, player.max_hp)
    }

    pub fn location_key(&self) -> &str {
        self.game.current_location_key()
    }

    /// Check if any output line so far contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.game.display().contains(needle)
    }

    /// Get the last output line.
    pub fn last_output(&self) -> Option<&str> {
        self.game.display().last()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the state machine is in `expected`.
#[track_caller]
pub fn assert_state(harness: &TestHarness, expected: GameState) {
    let actual = harness.state();
    assert_eq!(
        actual,
        expected,
        "Expected state {}, got {}",
        expected.label(),
        actual.label()
    );
}

/// Assert player HP is at expected values.
#[track_caller]
pub fn assert_hp(harness: &TestHarness, current: i32, max: i32) {
    let (actual_current, actual_max) = harness.player_hp();
    assert_eq!(
        (actual_current, actual_max),
        (current, max),
        "Expected HP {current}/{max}, got {actual_current}/{actual_max}"
    );
}

/// Assert some output line contains `needle`.
#[track_caller]
pub fn assert_output(lines: &[String], needle: &str) {
    assert!(
        lines.iter().any(|l| l.contains(needle)),
        "Expected output containing '{needle}', got {lines:#?}"
    );
}

/// Assert player is in combat.
#[track_caller]
pub fn assert_in_combat(harness: &TestHarness) {
    assert_state(harness, GameState::Combat);
}

/// Assert player is NOT in combat.
#[track_caller]
pub fn assert_not_in_combat(harness: &TestHarness) {
    assert_ne!(harness.state(), GameState::Combat, "Expected to NOT be in combat");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_returns_new_lines() {
        let mut harness = TestHarness::new();
        let lines = harness.input("help");
        assert_eq!(lines[0], "> help");
        assert_output(&lines, "ROGUELIKE COMMANDS");
    }

    #[test]
    fn test_started_harness() {
        let harness = TestHarness::started();
        assert_state(&harness, GameState::Playing);
        assert_hp(&harness, 100, 100);
        assert_eq!(harness.location_key(), "tavern");
    }

    #[test]
    fn test_combat_helpers() {
        let mut harness = TestHarness::started();
        assert_not_in_combat(&harness);
        harness.input("go forest");
        assert_in_combat(&harness);
    }
}
