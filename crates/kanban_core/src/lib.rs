//! Core board logic for Kanban.
//! This crate owns the task collection, board derivation and column
//! projection; UI layers call into it and re-render after every mutation.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{NewTask, Task, TaskId, TaskPatch, TaskStatus, TaskValidationError};
pub use render::column_renderer::{render, BoardView, Column, TaskCard};
pub use repo::kv_store::{KeyValueStore, SqliteKeyValueStore, StorageError, StorageResult};
pub use repo::storage_adapter::StorageAdapter;
pub use seed::{initialize_data, SeedOutcome};
pub use service::board_index::{derive_boards, BoardIndex};
pub use service::board_session::{BoardSession, SessionError, SessionResult};
pub use service::preferences::{Preferences, Theme};
pub use service::task_store::{TaskStore, TaskStoreError, TaskStoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
