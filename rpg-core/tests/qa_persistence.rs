//! QA tests for save/load and persistence functionality.
//!
//! These tests verify that game state is properly saved and restored.
//! Run with: `cargo test -p rpg-core --test qa_persistence`

use rpg_core::persist::{SaveData, DEFAULT_SLOT, SAVE_VERSION};
use rpg_core::testing::{assert_output, assert_state, TestHarness};
use rpg_core::{FileStore, Game, GameConfig, GameState, PersistError, SaveStore, Transcript};
use tempfile::TempDir;

// =============================================================================
// TEST 1: Round trip in memory
// =============================================================================

#[test]
fn test_save_and_load_round_trip() {
    let mut harness = TestHarness::started();
    harness.input_all(&["name Mira", "take bread", "go forest", "attack", "save"]);
    let saved = harness.game.world().clone();

    harness.input_all(&["go tavern", "take potion", "wait", "wait"]);
    assert_ne!(harness.game.world(), &saved);

    let lines = harness.input("load");
    assert_output(&lines, "📂 Game loaded successfully!");
    assert_eq!(harness.player(), &saved.player);
    assert_eq!(harness.location_key(), "forest");
    assert_eq!(
        harness.game.world().locations["tavern"],
        saved.locations["tavern"]
    );
}

#[test]
fn test_load_from_menu() {
    let mut harness = TestHarness::started();
    harness.input_all(&["dive", "save", "quit"]);
    assert_state(&harness, GameState::Menu);

    harness.input("load");
    assert_eq!(harness.location_key(), "dungeon_1");
    assert_eq!(harness.player().dungeon_level, 1);
    assert!(harness.game.location("dungeon_1").is_some());
}

#[test]
fn test_load_without_save() {
    let mut harness = TestHarness::new();
    let lines = harness.input("load");
    assert_output(&lines, "No save file found. Start a new game with 'start'.");
    assert_state(&harness, GameState::Menu);
}

#[test]
fn test_load_adopts_the_saved_seed() {
    let mut source = TestHarness::with_seed(1);
    source.input_all(&["start", "dive", "save"]);
    let slot = source.game.config().save_slot.clone();
    let json = source.game.store_mut().read(&slot).unwrap().unwrap();

    let mut harness = TestHarness::with_seed(999);
    harness.game.store_mut().write(&slot, &json).unwrap();
    harness.input("load");
    assert_eq!(harness.game.seed(), 1);
    assert_eq!(harness.player().game_seed, 1);

    harness.input_all(&["restart", "start", "dive"]);
    assert_eq!(harness.game.seed(), 1);

    let mut replay = TestHarness::with_seed(1);
    replay.input_all(&["start", "dive"]);
    assert_eq!(
        harness.game.location("dungeon_1"),
        replay.game.location("dungeon_1")
    );
}

// =============================================================================
// TEST 2: Corrupted saves
// =============================================================================

#[test]
fn test_corrupt_save_leaves_player_untouched() {
    let mut harness = TestHarness::started();
    harness.input_all(&["go forest", "attack", "save"]);

    let slot = harness.game.config().save_slot.clone();
    harness
        .game
        .store_mut()
        .write(&slot, "{\"version\": 1, \"player\": ")
        .unwrap();

    harness.input("attack");
    let before = harness.game.world().clone();
    let lines = harness.input("load");

    assert_output(&lines, "❌ Failed to load save file. It may be corrupted.");
    assert_eq!(harness.player(), &before.player);
    assert_eq!(harness.game.world(), &before);
}

#[test]
fn test_save_pointing_nowhere_is_rejected() {
    let mut harness = TestHarness::started();
    harness.input("save");

    let slot = harness.game.config().save_slot.clone();
    let json = harness.game.store_mut().read(&slot).unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["current_location"] = "atlantis".into();
    harness
        .game
        .store_mut()
        .write(&slot, &value.to_string())
        .unwrap();

    let lines = harness.input("load");
    assert_output(&lines, "It may be corrupted.");
    assert_eq!(harness.location_key(), "tavern");
}

#[test]
fn test_version_mismatch() {
    let mut harness = TestHarness::started();
    harness.input("save");

    let slot = harness.game.config().save_slot.clone();
    let json = harness.game.store_mut().read(&slot).unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["version"] = (SAVE_VERSION + 1).into();

    let err = SaveData::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(
        err,
        PersistError::VersionMismatch { expected, found }
            if expected == SAVE_VERSION && found == SAVE_VERSION + 1
    ));
}

// =============================================================================
// TEST 3: Save file layout
// =============================================================================

#[test]
fn test_save_document_fields() {
    let mut harness = TestHarness::started();
    harness.input_all(&["go forest", "save"]);

    let slot = harness.game.config().save_slot.clone();
    let json = harness.game.store_mut().read(&slot).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], SAVE_VERSION);
    assert_eq!(value["current_location"], "forest");
    assert_eq!(value["game_state"], "combat");
    assert_eq!(value["player"]["name"], "Adventurer");
    assert!(value["timestamp"].as_u64().unwrap() > 0);
    assert!(value["locations"]["tavern"].is_object());
    assert!(value["player"]["identified_items"].is_array());
}

// =============================================================================
// TEST 4: Saves on disk
// =============================================================================

#[test]
fn test_file_store_survives_new_game() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = GameConfig::seeded(5);

    let mut first = Game::new(
        config.clone(),
        Transcript::new(),
        Box::new(FileStore::new(temp_dir.path())),
    );
    first.execute("start");
    first.execute("name Thorin");
    first.execute("dive");
    first.execute("save");
    assert!(first.display().contains("💾 Game saved!"));
    assert!(temp_dir.path().join(format!("{DEFAULT_SLOT}.json")).exists());

    let mut second = Game::new(
        config,
        Transcript::new(),
        Box::new(FileStore::new(temp_dir.path())),
    );
    second.execute("load");
    assert_eq!(second.player().name, "Thorin");
    assert_eq!(second.current_location_key(), "dungeon_1");
    assert_eq!(second.world(), first.world());
}

#[test]
fn test_file_store_save_failure_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("not_a_dir");
    std::fs::write(&blocker, "occupied").unwrap();

    let mut game = Game::new(
        GameConfig::seeded(5),
        Transcript::new(),
        Box::new(FileStore::new(blocker.join("saves"))),
    );
    game.execute("start");
    game.execute("save");
    assert!(game.display().contains("❌ Failed to save game:"));
}
