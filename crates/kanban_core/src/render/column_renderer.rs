//! Projection of the active board into the three workflow columns.
//!
//! # Responsibility
//! - Filter tasks by board and split them by status in fixed column order.
//! - Produce the column markup the board page swaps in on each refresh.
//!
//! # Invariants
//! - Every call rebuilds all three columns from scratch; no diffing.
//! - Equal input yields equal output, byte for byte.
//! - Every rendered item carries its task id.

use crate::model::task::{Task, TaskId, TaskStatus};
use std::fmt::{Display, Formatter};

/// One task item inside a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
}

/// One workflow column with its header and items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub header: String,
    pub items: Vec<TaskCard>,
}

/// Rendered board: the three columns of one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub board: String,
    pub columns: [Column; 3],
}

/// Renders `tasks` belonging to `active_board`.
///
/// Tasks of other boards are ignored. Empty columns keep their header.
pub fn render(tasks: &[Task], active_board: &str) -> BoardView {
    let on_board: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.board == active_board)
        .collect();

    BoardView {
        board: active_board.to_string(),
        columns: TaskStatus::ALL.map(|status| Column {
            status,
            header: status.as_str().to_ascii_uppercase(),
            items: on_board
                .iter()
                .filter(|task| task.status == status)
                .map(|task| TaskCard {
                    id: task.id.clone(),
                    title: task.title.clone(),
                })
                .collect(),
        }),
    }
}

impl BoardView {
    /// Returns the column for `status`.
    pub fn column(&self, status: TaskStatus) -> &Column {
        let index = TaskStatus::ALL
            .iter()
            .position(|candidate| *candidate == status)
            .unwrap_or_default();
        &self.columns[index]
    }

    /// Maps a rendered item back to its column and card.
    pub fn find_task(&self, id: &str) -> Option<(TaskStatus, &TaskCard)> {
        self.columns.iter().find_map(|column| {
            column
                .items
                .iter()
                .find(|card| card.id == id)
                .map(|card| (column.status, card))
        })
    }

    /// Number of items across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }

    /// Column markup, one `column-div` per status.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for column in &self.columns {
            push_column_html(&mut html, column);
        }
        html
    }
}

fn push_column_html(html: &mut String, column: &Column) {
    let status = column.status.as_str();
    html.push_str(&format!(
        "<div class=\"column-div\" data-status=\"{status}\">\
         <div class=\"column-head-div\">\
         <span class=\"dot\" id=\"{status}-dot\"></span>\
         <h4 class=\"columnHeader\">{}</h4>\
         </div>\
         <div class=\"tasks-container\">",
        escape_html(&column.header)
    ));
    for card in &column.items {
        html.push_str(&format!(
            "<div class=\"task-div\" data-task-id=\"{}\">{}</div>",
            escape_html(&card.id),
            escape_html(&card.title)
        ));
    }
    html.push_str("</div></div>\n");
}

impl Display for BoardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.board)?;
        for column in &self.columns {
            writeln!(f, "{} ({})", column.header, column.items.len())?;
            for card in &column.items {
                writeln!(f, "  - {}  {}", card.title, card.id)?;
            }
        }
        Ok(())
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
