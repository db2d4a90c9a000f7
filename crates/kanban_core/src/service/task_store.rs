//! Task CRUD use-cases.
//!
//! # Responsibility
//! - Be the only mutator of the persisted task collection.
//! - Enforce identity and field invariants before any write.
//!
//! # Invariants
//! - Every operation is one read-modify-write of the full collection.
//! - A failed operation leaves the persisted collection unmodified.
//! - Generated ids never collide with ids already in the collection.

use crate::model::task::{
    generate_task_id, NewTask, Task, TaskId, TaskPatch, TaskStatus, TaskValidationError,
};
use crate::repo::kv_store::{KeyValueStore, StorageError};
use crate::repo::storage_adapter::StorageAdapter;
use crate::service::board_index::{derive_boards, BoardIndex};
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Errors from task CRUD operations.
#[derive(Debug)]
pub enum TaskStoreError {
    /// Input failed field validation; nothing was written.
    Validation(TaskValidationError),
    /// No task carries the requested id.
    NotFound(TaskId),
    /// Durable store failure.
    Storage(StorageError),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for TaskStoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// CRUD facade over the persisted task collection.
pub struct TaskStore<'s, S: KeyValueStore> {
    storage: &'s StorageAdapter<S>,
}

impl<'s, S: KeyValueStore> TaskStore<'s, S> {
    pub fn new(storage: &'s StorageAdapter<S>) -> Self {
        Self { storage }
    }

    /// Returns the full collection, unfiltered, in stored order.
    pub fn get_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        Ok(self.storage.load()?)
    }

    /// Returns one task by id.
    pub fn get_task(&self, id: &str) -> TaskStoreResult<Option<Task>> {
        Ok(self.get_tasks()?.into_iter().find(|task| task.id == id))
    }

    /// Appends a new task and returns it with its generated id.
    ///
    /// The input board must equal the active board. When `active_board` is
    /// `None` it is resolved from the stored collection; only an empty board
    /// set accepts any non-blank board.
    pub fn create_new_task(
        &self,
        input: &NewTask,
        active_board: Option<&str>,
    ) -> TaskStoreResult<Task> {
        let mut task = Task {
            id: TaskId::new(),
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            status: TaskStatus::parse(&input.status)?,
            board: input.board.trim().to_string(),
        };
        task.validate()?;

        let mut tasks = self.storage.load()?;
        let active_board = match active_board.filter(|name| !name.is_empty()) {
            Some(name) => Some(name.to_string()),
            None => BoardIndex::new(self.storage).get_active_board(&derive_boards(&tasks))?,
        };
        if let Some(active_board) = active_board {
            if task.board != active_board {
                return Err(TaskValidationError::BoardMismatch {
                    board: task.board,
                    active_board,
                }
                .into());
            }
        }

        task.id = fresh_id(&tasks);
        tasks.push(task.clone());
        self.storage.save(&tasks)?;
        info!(
            "event=task_create module=task_store status=ok task_status={} task_count={}",
            task.status,
            tasks.len()
        );
        Ok(task)
    }

    /// Merges the supplied fields into an existing task.
    pub fn patch_task(&self, id: &str, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let mut tasks = self.storage.load()?;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.to_string()))?;

        let updated = patch.apply_to(slot)?;
        *slot = updated.clone();
        self.storage.save(&tasks)?;
        info!(
            "event=task_patch module=task_store status=ok task_status={}",
            updated.status
        );
        Ok(updated)
    }

    /// Removes a task; returns whether one was removed.
    ///
    /// A missing id is not an error. The collection is written back either way.
    pub fn delete_task(&self, id: &str) -> TaskStoreResult<bool> {
        let mut tasks = self.storage.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        let deleted = tasks.len() != before;
        self.storage.save(&tasks)?;
        if deleted {
            info!(
                "event=task_delete module=task_store status=ok task_count={}",
                tasks.len()
            );
        } else {
            debug!("event=task_delete module=task_store status=noop");
        }
        Ok(deleted)
    }
}

fn fresh_id(tasks: &[Task]) -> TaskId {
    let taken: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    loop {
        let candidate = generate_task_id();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}
