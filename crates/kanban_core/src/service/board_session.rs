//! Board session: explicit UI-controller state.
//!
//! # Responsibility
//! - Hold the storage handle and current active board for one UI session.
//! - Route user actions to the task store and board index, then keep the
//!   active board consistent with the re-derived board set.
//!
//! # Invariants
//! - After every operation `active_board` is a member of `boards`, or
//!   `None` when no board exists.
//! - Every mutation is followed by a re-derivation of the board set.

use crate::model::task::{NewTask, Task, TaskPatch};
use crate::render::column_renderer::{render, BoardView};
use crate::repo::kv_store::{KeyValueStore, StorageError};
use crate::repo::storage_adapter::StorageAdapter;
use crate::service::board_index::{derive_boards, BoardIndex};
use crate::service::task_store::{TaskStore, TaskStoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced to the UI layer.
#[derive(Debug)]
pub enum SessionError {
    /// Task CRUD failure (validation, not found, storage).
    Store(TaskStoreError),
    /// Board selection persistence failure.
    Storage(StorageError),
    /// Selected board is not in the current board set.
    UnknownBoard(String),
    /// Operation needs an active board but none exists.
    NoActiveBoard,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::UnknownBoard(name) => write!(f, "unknown board: {name}"),
            Self::NoActiveBoard => write!(f, "no board exists yet; name one to create it"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::UnknownBoard(_) | Self::NoActiveBoard => None,
        }
    }
}

impl From<TaskStoreError> for SessionError {
    fn from(value: TaskStoreError) -> Self {
        Self::Store(value)
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Application context threaded through the UI controller.
pub struct BoardSession<'s, S: KeyValueStore> {
    storage: &'s StorageAdapter<S>,
    boards: Vec<String>,
    active_board: Option<String>,
}

impl<'s, S: KeyValueStore> BoardSession<'s, S> {
    /// Loads boards and resolves the active one.
    ///
    /// A fallback choice is written back so the next session starts there.
    pub fn open(storage: &'s StorageAdapter<S>) -> SessionResult<Self> {
        let mut session = Self {
            storage,
            boards: Vec::new(),
            active_board: None,
        };
        session.sync_boards()?;
        info!(
            "event=session_open module=board_session status=ok board_count={} has_active={}",
            session.boards.len(),
            session.active_board.is_some()
        );
        Ok(session)
    }

    pub fn boards(&self) -> &[String] {
        &self.boards
    }

    pub fn active_board(&self) -> Option<&str> {
        self.active_board.as_deref()
    }

    /// Full task collection.
    pub fn tasks(&self) -> SessionResult<Vec<Task>> {
        Ok(self.task_store().get_tasks()?)
    }

    /// Looks up one task for the edit flow.
    pub fn task(&self, id: &str) -> SessionResult<Option<Task>> {
        Ok(self.task_store().get_task(id)?)
    }

    /// Switches the active board and persists the choice.
    pub fn select_board(&mut self, name: &str) -> SessionResult<()> {
        if !self.boards.iter().any(|board| board == name) {
            return Err(SessionError::UnknownBoard(name.to_string()));
        }
        self.board_index().set_active_board(name)?;
        self.active_board = Some(name.to_string());
        Ok(())
    }

    /// Creates a task on the active board.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        status: &str,
    ) -> SessionResult<Task> {
        let board = self
            .active_board
            .clone()
            .ok_or(SessionError::NoActiveBoard)?;
        self.add_task_to_board(&board, title, description, status)
    }

    /// Creates a task on a named board.
    ///
    /// On an empty store this creates the first board and selects it.
    pub fn add_task_to_board(
        &mut self,
        board: &str,
        title: &str,
        description: &str,
        status: &str,
    ) -> SessionResult<Task> {
        let input = NewTask {
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            board: board.to_string(),
        };
        let task = self
            .task_store()
            .create_new_task(&input, self.active_board.as_deref())?;
        self.sync_boards()?;
        Ok(task)
    }

    /// Applies a partial edit to one task.
    pub fn save_task_changes(&mut self, id: &str, patch: &TaskPatch) -> SessionResult<Task> {
        let task = self.task_store().patch_task(id, patch)?;
        self.sync_boards()?;
        Ok(task)
    }

    /// Deletes one task; returns whether it existed.
    pub fn delete_task(&mut self, id: &str) -> SessionResult<bool> {
        let deleted = self.task_store().delete_task(id)?;
        self.sync_boards()?;
        Ok(deleted)
    }

    /// Renders the active board, or `None` when no board exists.
    pub fn refresh(&self) -> SessionResult<Option<BoardView>> {
        let Some(board) = self.active_board.as_deref() else {
            return Ok(None);
        };
        let tasks = self.task_store().get_tasks()?;
        Ok(Some(render(&tasks, board)))
    }

    fn task_store(&self) -> TaskStore<'s, S> {
        TaskStore::new(self.storage)
    }

    fn board_index(&self) -> BoardIndex<'s, S> {
        BoardIndex::new(self.storage)
    }

    /// Re-derives boards and repairs the active board when it vanished.
    fn sync_boards(&mut self) -> SessionResult<()> {
        let tasks = self.task_store().get_tasks()?;
        self.boards = derive_boards(&tasks);

        let index = self.board_index();
        let still_valid = self
            .active_board
            .as_ref()
            .filter(|name| self.boards.contains(name))
            .cloned();
        let resolved = match still_valid {
            Some(name) => Some(name),
            None => index.get_active_board(&self.boards)?,
        };

        if resolved != self.active_board {
            match resolved.as_deref() {
                Some(name) => index.set_active_board(name)?,
                None => index.clear_active_board()?,
            }
            info!(
                "event=active_board_change module=board_session status=ok has_active={}",
                resolved.is_some()
            );
        }
        self.active_board = resolved;
        Ok(())
    }
}
