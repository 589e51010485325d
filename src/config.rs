//! Database location.

use std::path::{Path, PathBuf};

/// Default database file, created in the current directory.
pub const DEFAULT_DB_FILE: &str = "todos.db";

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "TODO_DB";

/// Where the todo store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Build from the `--db` value clap parsed, which already falls back
    /// to `TODO_DB`. An empty value counts as unset.
    pub fn resolve(db: Option<PathBuf>) -> Self {
        let path = db
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
        Self { path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}
