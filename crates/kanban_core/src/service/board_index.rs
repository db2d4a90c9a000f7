//! Board list derivation and active-board selection.
//!
//! # Invariants
//! - Boards are derived from task data only, in first-seen order.
//! - A board exists iff at least one task references it.
//! - Reads of the active board always yield a member of the current board
//!   set, or `None` when no board exists.

use crate::model::task::Task;
use crate::repo::kv_store::{KeyValueStore, StorageResult};
use crate::repo::storage_adapter::{StorageAdapter, ACTIVE_BOARD_KEY};
use log::debug;
use std::collections::HashSet;

/// Distinct non-empty board names in first-seen order.
pub fn derive_boards(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .map(|task| task.board.as_str())
        .filter(|board| !board.is_empty() && seen.insert(*board))
        .map(str::to_string)
        .collect()
}

/// Persisted active-board selection.
pub struct BoardIndex<'s, S: KeyValueStore> {
    storage: &'s StorageAdapter<S>,
}

impl<'s, S: KeyValueStore> BoardIndex<'s, S> {
    pub fn new(storage: &'s StorageAdapter<S>) -> Self {
        Self { storage }
    }

    /// Resolves the active board against the current board set.
    ///
    /// A missing or stale persisted value falls back to `boards[0]`.
    pub fn get_active_board(&self, boards: &[String]) -> StorageResult<Option<String>> {
        let persisted = self.storage.load_json_scalar::<String>(ACTIVE_BOARD_KEY)?;
        if let Some(name) = persisted.filter(|name| boards.contains(name)) {
            return Ok(Some(name));
        }

        let fallback = boards.first().cloned();
        debug!(
            "event=active_board_resolve module=board_index status=fallback board_count={}",
            boards.len()
        );
        Ok(fallback)
    }

    /// Persists `name` as the active board.
    ///
    /// Membership is not checked here; reads fall back when it is stale.
    pub fn set_active_board(&self, name: &str) -> StorageResult<()> {
        self.storage.save_json_scalar(ACTIVE_BOARD_KEY, name)
    }

    /// Drops the persisted selection.
    pub fn clear_active_board(&self) -> StorageResult<()> {
        self.storage.clear(ACTIVE_BOARD_KEY)?;
        Ok(())
    }
}
