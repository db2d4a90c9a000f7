//! Board domain model.
//!
//! # Responsibility
//! - Define the task record and its create/patch inputs.
//! - Keep boards derived from task data instead of stored separately.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique in its collection.
//! - Board names only exist as values of `Task::board`.

pub mod task;
