//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage calls into board-level use-cases.
//! - Keep UI layers decoupled from storage details.

pub mod board_index;
pub mod board_session;
pub mod preferences;
pub mod task_store;
