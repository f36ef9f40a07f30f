//! Save/load support.
//!
//! A game is saved as one JSON document in a named slot. Slots live behind
//! the [`SaveStore`] trait so the engine works the same against a directory
//! on disk or an in-memory map in tests.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::ProceduralGenerator;
use crate::rng::{now_millis, SeededRng};
use crate::world::World;

/// Slot used when no other name is configured.
pub const DEFAULT_SLOT: &str = "asciiRPG_save";

/// Current save file version.
pub const SAVE_VERSION: u32 = 1;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Invalid save slot name: {0:?}")]
    InvalidSlot(String),
}

/// Slot names become file names, so they may not name a path.
pub fn validate_slot(slot: &str) -> Result<(), PersistError> {
    let bad = slot.is_empty()
        || slot == "."
        || slot == ".."
        || slot.contains(['/', '\\', '\0']);
    if bad {
        return Err(PersistError::InvalidSlot(slot.to_string()));
    }
    Ok(())
}

/// Everything needed to resume a game exactly where it stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// Milliseconds since the Unix epoch when the save was written.
    pub timestamp: u64,

    /// Player, current location, state and every visited location.
    #[serde(flatten)]
    pub world: World,

    /// Dungeon generator, so unvisited levels come out the same after load.
    pub generator: ProceduralGenerator,

    /// In-play random source.
    pub rng: SeededRng,
}

impl SaveData {
    pub fn new(world: World, generator: ProceduralGenerator, rng: SeededRng) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: now_millis(),
            world,
            generator,
            rng,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and version-check a snapshot.
    pub fn from_json(content: &str) -> Result<Self, PersistError> {
        let saved: Self = serde_json::from_str(content)?;

        if saved.version != SAVE_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SAVE_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }
}

/// Named-slot storage for serialized saves.
pub trait SaveStore {
    /// Read a slot. `Ok(None)` means nothing has been saved there.
    fn read(&self, slot: &str) -> Result<Option<String>, PersistError>;

    /// Replace a slot's contents.
    fn write(&mut self, slot: &str, contents: &str) -> Result<(), PersistError>;
}

/// In-process slots. Lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, slot: &str) -> Result<Option<String>, PersistError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), PersistError> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

/// One `<slot>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: &str) -> Result<PathBuf, PersistError> {
        validate_slot(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl SaveStore for FileStore {
    fn read(&self, slot: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(slot)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), PersistError> {
        let path = self.path_for(slot)?;
        fs::create_dir_all(&self.dir)?;
        write_atomic(&path, contents)?;
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");

    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(contents.as_bytes())?;
                tmp.sync_all()?;
                break candidate;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => counter += 1,
            Err(e) => return Err(e),
        }
    };

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.read("slot").unwrap().is_none());
        store.write("slot", "{}").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("saves"));
        assert!(store.read(DEFAULT_SLOT).unwrap().is_none());

        store.write(DEFAULT_SLOT, "first").unwrap();
        store.write(DEFAULT_SLOT, "second").unwrap();
        assert_eq!(store.read(DEFAULT_SLOT).unwrap().as_deref(), Some("second"));
        assert!(store
            .path_for(DEFAULT_SLOT)
            .unwrap()
            .ends_with("asciiRPG_save.json"));

        let leftovers = fs::read_dir(store.dir())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .map(|e| e.file_name().to_string_lossy().contains(".tmp-"))
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_slot_cannot_leave_the_save_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("saves"));

        for slot in ["../escape", "a/b", "a\\b", "..", ""] {
            assert!(matches!(
                store.write(slot, "{}"),
                Err(PersistError::InvalidSlot(_))
            ));
            assert!(matches!(store.read(slot), Err(PersistError::InvalidSlot(_))));
        }
        assert!(!dir.path().join("escape.json").exists());
        assert!(validate_slot("slot-2.backup").is_ok());
    }

    #[test]
    fn test_garbage_is_json_error() {
        let err = SaveData::from_json("not json at all").unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }
}
