//! First-run fixture data.
//!
//! # Invariants
//! - Seeding only happens when the `tasks` key is entirely absent; an
//!   empty persisted collection is left alone.
//! - Fixture ids are unique and every fixture passes `Task::validate`.

use crate::model::task::{Task, TaskStatus};
use crate::repo::kv_store::{KeyValueStore, StorageResult};
use crate::repo::storage_adapter::{StorageAdapter, SHOW_SIDEBAR_KEY};
use log::info;

/// Result of `initialize_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Fixtures were written.
    Seeded,
    /// A collection already existed; nothing was written.
    AlreadyPresent,
}

const FIXTURES: &[(&str, &str, &str, TaskStatus, &str)] = &[
    (
        "seed-1",
        "Set up the project board",
        "Create the columns and invite the team.",
        TaskStatus::Done,
        "Launch Career",
    ),
    (
        "seed-2",
        "Update CV",
        "Add the latest projects and trim old roles.",
        TaskStatus::Doing,
        "Launch Career",
    ),
    (
        "seed-3",
        "Apply to three companies",
        "",
        TaskStatus::Todo,
        "Launch Career",
    ),
    (
        "seed-4",
        "Sketch release plan",
        "Milestones for the next quarter.",
        TaskStatus::Todo,
        "Roadmap",
    ),
    (
        "seed-5",
        "Collect user feedback",
        "",
        TaskStatus::Doing,
        "Roadmap",
    ),
];

/// Fixture tasks written on first run.
pub fn fixture_tasks() -> Vec<Task> {
    FIXTURES
        .iter()
        .map(|&(id, title, description, status, board)| Task {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status,
            board: board.to_string(),
        })
        .collect()
}

/// Seeds the store with fixtures when no collection was ever persisted.
pub fn initialize_data<S: KeyValueStore>(storage: &StorageAdapter<S>) -> StorageResult<SeedOutcome> {
    if storage.has_tasks()? {
        info!(
            "event=seed module=seed status=skipped task_count={}",
            storage.load()?.len()
        );
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let fixtures = fixture_tasks();
    storage.save(&fixtures)?;
    storage.save_scalar(SHOW_SIDEBAR_KEY, "true")?;
    info!(
        "event=seed module=seed status=ok task_count={}",
        fixtures.len()
    );
    Ok(SeedOutcome::Seeded)
}
