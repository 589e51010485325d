use crate::error::{Result, TodoError};
use crate::models::Todo;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

const TODO_COLUMNS: [&str; 4] = ["id", "title", "desc", "created_at"];

/// Database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection_error = |source: rusqlite::Error| TodoError::Connection {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(connection_error)?;

        // Opening is lazy about the file header; read it now so a
        // non-database file fails here rather than on the first query.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(connection_error)?;

        debug!(path = %path.display(), "opened todo database");
        Ok(Database { conn })
    }

    /// Open an in-memory database for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| TodoError::Connection {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Database { conn })
    }

    /// Create the todos table if absent and check an existing one has the expected columns
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS todos (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    \"desc\" TEXT,
                    created_at INTEGER
                )",
                [],
            )
            .map_err(TodoError::Schema)?;

        let columns = self.table_columns()?;
        let missing: Vec<String> = TODO_COLUMNS
            .iter()
            .filter(|c| !columns.iter().any(|existing| existing == *c))
            .map(|c| c.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(TodoError::IncompatibleSchema { missing });
        }
        Ok(())
    }

    fn table_columns(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("PRAGMA table_info(todos)")
            .map_err(TodoError::Schema)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(TodoError::Schema)?;
        names
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(TodoError::Schema)
    }

    // ==================== Todo Operations ====================

    pub fn list(&self) -> Result<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, \"desc\", created_at
                 FROM todos
                 ORDER BY created_at DESC, id DESC",
            )
            .map_err(TodoError::Query)?;

        let todos = stmt.query_map([], todo_from_row).map_err(TodoError::Query)?;
        todos
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(TodoError::Query)
    }

    pub fn get(&self, id: i64) -> Result<Option<Todo>> {
        self.conn
            .query_row(
                "SELECT id, title, \"desc\", created_at FROM todos WHERE id = ?1",
                [id],
                todo_from_row,
            )
            .optional()
            .map_err(TodoError::Query)
    }

    pub fn insert(&self, title: &str, desc: &str) -> Result<Todo> {
        self.insert_at(title, desc, Utc::now().timestamp_millis())
    }

    /// Insert with an explicit creation time
    pub(crate) fn insert_at(&self, title: &str, desc: &str, created_at: i64) -> Result<Todo> {
        self.conn
            .execute(
                "INSERT INTO todos (title, \"desc\", created_at) VALUES (?1, ?2, ?3)",
                (title, desc, created_at),
            )
            .map_err(TodoError::Write)?;

        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted todo");
        Ok(Todo {
            id,
            title: title.to_string(),
            desc: desc.to_string(),
            created_at,
        })
    }

    /// Returns false when no row has `id`
    pub fn update(&self, id: i64, title: &str, desc: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute(
                "UPDATE todos SET title = ?1, \"desc\" = ?2 WHERE id = ?3",
                (title, desc, id),
            )
            .map_err(TodoError::Write)?;
        debug!(id, rows, "updated todo");
        Ok(rows > 0)
    }

    /// Returns false when no row has `id`
    pub fn delete(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", [id])
            .map_err(TodoError::Write)?;
        debug!(id, rows, "deleted todo");
        Ok(rows > 0)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ==================== Row Parsers ====================

fn todo_from_row(row: &Row) -> std::result::Result<Todo, rusqlite::Error> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        desc: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        created_at: row.get(3)?,
    })
}
