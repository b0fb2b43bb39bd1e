//! JSON snapshot persistence.
//!
//! The whole store is one flat document of calendar, event, and task
//! records, rewritten after every successful mutation. Saves go through a
//! temp file in the same directory followed by a rename, so an interrupted
//! write leaves the previous snapshot intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Calendar, Event, Task};

/// In-memory image of the entire store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default)]
    pub calendars: Vec<Calendar>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot from disk. A missing or empty file is a fresh
    /// store, not an error.
    pub fn load(&self) -> Result<Snapshot, CoreError> {
        if !self.path.exists() {
            return Ok(Snapshot::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the snapshot, replacing the previous file atomically.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let raw = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
