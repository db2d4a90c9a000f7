//! JSON persistence of the task collection and board scalars.
//!
//! # Responsibility
//! - Own the `tasks` collection and scalar keys in the durable store.
//! - Recover from malformed persisted data by treating it as absent.
//!
//! # Invariants
//! - `save` overwrites the whole collection in one store write.
//! - `save(load())` leaves the stored bytes unchanged.
//! - No other component touches the key/value store directly.

use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, StorageResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

/// Key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "tasks";
/// Key holding the JSON-encoded active board name.
pub const ACTIVE_BOARD_KEY: &str = "activeBoard";
/// Key holding the sidebar flag (`"true"`/`"false"`).
pub const SHOW_SIDEBAR_KEY: &str = "showSideBar";
/// Key holding the theme flag (`"light"`/`"dark"`).
pub const THEME_KEY: &str = "theme";

/// Typed access to board state on top of a key/value store.
pub struct StorageAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns whether a task collection was ever persisted, even an empty one.
    pub fn has_tasks(&self) -> StorageResult<bool> {
        self.store.contains(TASKS_KEY)
    }

    /// Reads the persisted task collection.
    ///
    /// Absent or malformed data reads as an empty collection. Only failures
    /// of the underlying store are returned as errors.
    pub fn load(&self) -> StorageResult<Vec<Task>> {
        let Some(raw) = self.store.get(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        let tasks = match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=recovered key={TASKS_KEY} reason=malformed_json line={} column={}",
                    err.line(),
                    err.column()
                );
                return Ok(Vec::new());
            }
        };

        if let Some(reason) = first_invariant_violation(&tasks) {
            warn!(
                "event=storage_load module=storage status=recovered key={TASKS_KEY} reason={reason}"
            );
            return Ok(Vec::new());
        }

        Ok(tasks)
    }

    /// Overwrites the persisted task collection.
    pub fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let raw = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &raw)
    }

    /// Reads a raw string scalar.
    pub fn load_scalar(&self, key: &str) -> StorageResult<Option<String>> {
        self.store.get(key)
    }

    /// Writes a raw string scalar.
    pub fn save_scalar(&self, key: &str, value: &str) -> StorageResult<()> {
        self.store.set(key, value)
    }

    /// Reads a JSON-encoded scalar; malformed values read as absent.
    pub fn load_json_scalar<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(
                    "event=storage_load module=storage status=recovered key={key} reason=malformed_json"
                );
                Ok(None)
            }
        }
    }

    /// Writes a JSON-encoded scalar.
    pub fn save_json_scalar<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Removes a scalar or the collection key entirely.
    pub fn clear(&self, key: &str) -> StorageResult<bool> {
        self.store.remove(key)
    }
}

fn first_invariant_violation(tasks: &[Task]) -> Option<String> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if let Err(err) = task.validate_stored() {
            return Some(format!("invalid_task index={index} error=\"{err}\""));
        }
        if !seen.insert(task.id.as_str()) {
            return Some(format!("duplicate_id index={index}"));
        }
    }
    None
}
