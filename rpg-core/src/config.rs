//! Game configuration.

use crate::persist::DEFAULT_SLOT;
use crate::rng::now_millis;

/// Name a new player starts with.
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// Settings for a new [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Starting player name.
    pub player_name: String,

    /// World seed. `None` seeds from the wall clock.
    pub seed: Option<u64>,

    /// Save slot used by `save` and `load`.
    pub save_slot: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: None,
            save_slot: DEFAULT_SLOT.to_string(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    /// The seed to use, falling back to the current time.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(now_millis)
    }
}
