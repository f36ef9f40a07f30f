//! Text roguelike engine.
//!
//! This crate provides:
//! - A seeded random source and a deterministic dungeon generator
//! - The command interpreter and game state machine
//! - Hunger, status effects, curses and item identification
//! - Save/load through pluggable slot storage
//!
//! # Quick Start
//!
//! ```
//! use rpg_core::{Game, GameConfig, MemoryStore, Transcript};
//!
//! let config = GameConfig::seeded(7).with_player_name("Thorin");
//! let mut game = Game::new(config, Transcript::new(), Box::new(MemoryStore::new()));
//!
//! game.execute("start");
//! game.execute("go forest");
//! game.execute("attack");
//!
//! assert!(game.display().contains("You attack the Goblin"));
//! ```

pub mod art;
pub mod command;
pub mod config;
pub mod display;
pub mod game;
pub mod generator;
pub mod items;
pub mod locations;
pub mod narration;
pub mod persist;
pub mod rng;
pub mod rules;
pub mod spells;
pub mod testing;
pub mod world;

// Primary public API
pub use command::{Command, CommandError};
pub use config::GameConfig;
pub use display::{GameDisplay, StatusLine, Transcript};
pub use game::Game;
pub use generator::ProceduralGenerator;
pub use persist::{FileStore, MemoryStore, PersistError, SaveData, SaveStore};
pub use rng::SeededRng;
pub use testing::TestHarness;
pub use world::{GameState, Player, World};
