use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Keep a list of todos in a local SQLite file")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Database file (defaults to ./todos.db)
    #[arg(long, env = crate::config::DB_PATH_ENV, global = true)]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and todos table
    Init,

    /// Add a new todo
    Add {
        /// Todo title
        title: String,
        /// Optional description
        #[arg(long, default_value = "")]
        desc: String,
    },

    /// List all todos, newest first
    List,

    /// Show one todo
    Show {
        /// Todo ID
        id: i64,
    },

    /// Edit a todo's title or description
    Edit {
        /// Todo ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description (pass "" to clear)
        #[arg(long)]
        desc: Option<String>,
    },

    /// Delete a todo
    Delete {
        /// Todo ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
