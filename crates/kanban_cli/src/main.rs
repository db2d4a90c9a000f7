//! Terminal front end for the board.
//!
//! # Responsibility
//! - Map subcommands to board session calls.
//! - Print the refreshed board after every mutating command.

use clap::{Parser, Subcommand, ValueEnum};
use kanban_core::db::open_db;
use kanban_core::service::preferences::{set_sidebar_visible, set_theme};
use kanban_core::{
    default_log_level, init_logging, initialize_data, BoardSession, SqliteKeyValueStore,
    StorageAdapter, TaskPatch, Theme,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "kanban.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(about = "Single-user kanban board")]
#[command(version)]
/// Command-line arguments.
struct Cli {
    /// Board database file
    #[arg(long, env = "KANBAN_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, env = "KANBAN_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active board
    Show,
    /// List boards, marking the active one
    Boards,
    /// Switch the active board
    Select { board: String },
    /// Add a task to the active board
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "todo")]
        status: String,
        /// Board name; only needed to create the first board
        #[arg(long)]
        board: Option<String>,
    },
    /// Edit fields of one task
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        board: Option<String>,
    },
    /// Delete one task
    Delete { id: String },
    /// Write the column markup of the active board
    Html {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Set the color theme flag
    Theme { theme: ThemeArg },
    /// Set the sidebar flag
    Sidebar { visibility: SidebarArg },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeArg {
    Light,
    Dark,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SidebarArg {
    Show,
    Hide,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path)?;
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn)?);
    initialize_data(&storage)?;
    let mut session = BoardSession::open(&storage)?;

    let default_command = Command::Show;
    match cli.command.as_ref().unwrap_or(&default_command) {
        Command::Show => {}
        Command::Boards => {
            for board in session.boards() {
                let marker = if Some(board.as_str()) == session.active_board() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {board}");
            }
            return Ok(());
        }
        Command::Select { board } => session.select_board(board)?,
        Command::Add {
            title,
            description,
            status,
            board,
        } => {
            let task = match board {
                Some(board) => session.add_task_to_board(board, title, description, status)?,
                None => session.add_task(title, description, status)?,
            };
            println!("created {}", task.id);
        }
        Command::Edit {
            id,
            title,
            description,
            status,
            board,
        } => {
            let patch = TaskPatch {
                title: title.clone(),
                description: description.clone(),
                status: status.clone(),
                board: board.clone(),
            };
            if patch.is_empty() {
                return Err("nothing to change; pass at least one field".into());
            }
            session.save_task_changes(id, &patch)?;
        }
        Command::Delete { id } => {
            if !session.delete_task(id)? {
                println!("no task with id {id}");
            }
        }
        Command::Html { out } => {
            let html = session
                .refresh()?
                .map(|view| view.to_html())
                .unwrap_or_default();
            match out {
                Some(path) => std::fs::write(path, html)?,
                None => print!("{html}"),
            }
            return Ok(());
        }
        Command::Theme { theme } => {
            let theme = match theme {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
            };
            set_theme(&storage, theme)?;
            return Ok(());
        }
        Command::Sidebar { visibility } => {
            set_sidebar_visible(&storage, matches!(visibility, SidebarArg::Show))?;
            return Ok(());
        }
    }

    match session.refresh()? {
        Some(view) => print!("{view}"),
        None => println!("no boards yet; add a task with --board to create one"),
    }
    Ok(())
}
