//! Whole-circuit persistence behind a get/set-by-slot interface.

use crate::core::errors::StoreError;
use crate::core::serialization::CircuitDocument;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persistence collaborator: an opaque string slot per key.
///
/// Reads and writes are whole-document replacements.
pub trait CircuitStore {
    fn save(&mut self, slot: &str, json: &str) -> Result<(), StoreError>;
    fn load(&self, slot: &str) -> Result<Option<String>, StoreError>;
}

/// What a save writes: the circuit plus the user's free-text description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCircuit {
    #[serde(flatten)]
    pub circuit: CircuitDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_description: Option<String>,
}

impl SavedCircuit {
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// In-process store, one string per slot
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CircuitStore for MemoryStore {
    fn save(&mut self, slot: &str, json: &str) -> Result<(), StoreError> {
        self.slots.insert(slot.to_string(), json.to_string());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(slot).cloned())
    }
}

/// Directory-backed store writing `<slot>.json`
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

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl CircuitStore for FileStore {
    fn save(&mut self, slot: &str, json: &str) -> Result<(), StoreError> {
        let path = self.slot_path(slot);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Saved {} bytes to {}", json.len(), path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
