//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted under the `tasks` key.
//! - Validate field invariants shared by create/patch/load paths.
//!
//! # Invariants
//! - `id` is unique across the whole collection and never changes.
//! - `status` is always one of the three fixed workflow columns.
//! - `title` is non-blank for every persisted task.
//! - `board` is non-blank for every task written through create or patch.
//!   Stored tasks with an empty board load as is and stay off every board.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable task identifier.
///
/// Kept as plain text so externally seeded ids survive a load/save cycle.
pub type TaskId = String;

/// Workflow column a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// In progress.
    Doing,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Fixed column order used by every rendering.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    /// Returns the persisted/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Parses a user-supplied status label.
    ///
    /// Leading/trailing whitespace and ASCII case are ignored.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(TaskValidationError::InvalidStatus(value.to_string())),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trim.
    BlankTitle,
    /// Board name is empty after trim.
    BlankBoard,
    /// Status label is outside `todo|doing|done`.
    InvalidStatus(String),
    /// Task board differs from the board currently selected.
    BoardMismatch { board: String, active_board: String },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankBoard => write!(f, "board must not be blank"),
            Self::InvalidStatus(value) => {
                write!(f, "invalid status `{value}`; expected todo|doing|done")
            }
            Self::BoardMismatch {
                board,
                active_board,
            } => write!(
                f,
                "task board `{board}` does not match active board `{active_board}`"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// One card on the board.
///
/// Field order is the serialized order; keep it stable so rewriting an
/// unchanged collection produces identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub board: String,
}

impl Task {
    /// Builds a task with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        board: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_task_id(),
            title: title.into(),
            description: description.into(),
            status,
            board: board.into(),
        }
    }

    /// Checks the invariants a loaded task must satisfy.
    pub fn validate_stored(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Checks the invariants a task must satisfy before it is written.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        self.validate_stored()?;
        if self.board.trim().is_empty() {
            return Err(TaskValidationError::BlankBoard);
        }
        Ok(())
    }
}

/// Creation input as collected from the new-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Raw status label; validated against the fixed enum.
    pub status: String,
    pub board: String,
}

/// Partial update: `None` fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub board: Option<String>,
}

impl TaskPatch {
    /// Patch that only moves a task to another column.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.board.is_none()
    }

    /// Applies the patch to a copy of `task` and validates the result.
    pub fn apply_to(&self, task: &Task) -> Result<Task, TaskValidationError> {
        let mut next = task.clone();
        if let Some(title) = &self.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(status) = &self.status {
            next.status = TaskStatus::parse(status)?;
        }
        if let Some(board) = &self.board {
            next.board = board.trim().to_string();
        }
        next.validate()?;
        Ok(next)
    }
}

/// Generates a random task id.
///
/// Callers that hold the collection must still check for collisions.
pub fn generate_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}
