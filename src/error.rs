use std::path::PathBuf;
use thiserror::Error;

/// All possible errors in the todo store
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Cannot open todo database at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cannot create todos table: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Existing todos table is incompatible, missing columns: {}", .missing.join(", "))]
    IncompatibleSchema { missing: Vec<String> },

    #[error("Failed to get todos: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Failed to save todo: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Todo #{0} not found")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Coarse error category, for callers deciding between re-prompting and aborting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Schema,
    Query,
    Write,
    Validation,
    NotFound,
    Internal,
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Connection { .. } => ErrorKind::Connection,
            TodoError::Schema(_) | TodoError::IncompatibleSchema { .. } => ErrorKind::Schema,
            TodoError::Query(_) => ErrorKind::Query,
            TodoError::Write(_) => ErrorKind::Write,
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::Io(_) | TodoError::Json(_) | TodoError::Join(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TodoError>;
