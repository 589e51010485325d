//! Asynchronous todo store.
//!
//! [`TodoStore`] is a cloneable handle over a single SQLite connection.
//! Each operation runs the blocking call on tokio's blocking pool and
//! resolves once SQLite has answered. Failures surface unchanged; the
//! store never retries.

use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::Result;
use crate::models::Todo;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;
use tracing::info;

#[derive(Clone)]
pub struct TodoStore {
    db: Arc<Mutex<Database>>,
}

impl TodoStore {
    /// Open the database named by `config`, creating the file if needed.
    ///
    /// Calling this again for the same path yields another handle onto
    /// the same rows.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let path = config.path.clone();
        let db = task::spawn_blocking(move || Database::open(path)).await??;
        info!(path = %config.path.display(), "todo store opened");
        Ok(Self::from_database(db))
    }

    /// Open a private in-memory store
    pub async fn open_in_memory() -> Result<Self> {
        let db = task::spawn_blocking(Database::open_in_memory).await??;
        Ok(Self::from_database(db))
    }

    fn from_database(db: Database) -> Self {
        TodoStore {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Create the todos table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        self.run(|db| db.ensure_schema()).await
    }

    /// All todos, newest first
    pub async fn list(&self) -> Result<Vec<Todo>> {
        self.run(|db| db.list()).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Todo>> {
        self.run(move |db| db.get(id)).await
    }

    /// Insert a todo stamped with the current time
    pub async fn insert(&self, title: &str, desc: &str) -> Result<Todo> {
        let title = title.to_owned();
        let desc = desc.to_owned();
        self.run(move |db| db.insert(&title, &desc)).await
    }

    /// Overwrite title and description. Returns false if `id` does not exist.
    pub async fn update(&self, id: i64, title: &str, desc: &str) -> Result<bool> {
        let title = title.to_owned();
        let desc = desc.to_owned();
        self.run(move |db| db.update(id, &title, &desc)).await
    }

    /// Remove a todo. Returns false if `id` does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.run(move |db| db.delete(id)).await
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            let db = db.blocking_lock();
            f(&db)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Utc;
    use tempfile::TempDir;

    async fn setup() -> TodoStore {
        let store = TodoStore::open_in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_buy_milk_scenario() {
        let store = setup().await;
        let before = Utc::now().timestamp_millis();

        let inserted = store.insert("Buy milk", "2% lowfat").await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, 1);
        assert_eq!(todos[0].title, "Buy milk");
        assert_eq!(todos[0].desc, "2% lowfat");
        assert!(todos[0].created_at >= before);

        assert!(store.update(1, "Buy oat milk", "").await.unwrap());
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, inserted.id);
        assert_eq!(todos[0].created_at, inserted.created_at);
        assert_eq!(todos[0].title, "Buy oat milk");
        assert_eq!(todos[0].desc, "");

        assert!(store.delete(1).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_by_returned_id() {
        let store = setup().await;
        store.insert("Other", "").await.unwrap();
        let inserted = store.insert("Call mom", "Sunday").await.unwrap();

        let todos = store.list().await.unwrap();
        let found = todos.iter().find(|t| t.id == inserted.id).unwrap();
        assert_eq!(found, &inserted);
        assert_eq!(store.get(inserted.id).await.unwrap(), Some(inserted));
    }

    #[tokio::test]
    async fn test_update_missing_leaves_rows_alone() {
        let store = setup().await;
        let todo = store.insert("Stay", "put").await.unwrap();

        assert!(!store.update(todo.id + 1, "Changed", "x").await.unwrap());
        assert_eq!(store.list().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = setup().await;
        let todo = store.insert("Stay", "").await.unwrap();

        assert!(!store.delete(77).await.unwrap());
        assert_eq!(store.list().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn test_clones_share_connection() {
        let store = setup().await;
        let other = store.clone();

        let todo = other.insert("Shared", "").await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::new(temp_dir.path().join("todos.db"));

        let first = TodoStore::open(&config).await.unwrap();
        first.ensure_schema().await.unwrap();
        let todo = first.insert("From first", "").await.unwrap();

        let second = TodoStore::open(&config).await.unwrap();
        second.ensure_schema().await.unwrap();
        assert_eq!(second.list().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn test_open_failure_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::new(temp_dir.path().join("nope").join("todos.db"));

        let err = TodoStore::open(&config).await.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_list_before_schema_fails() {
        let store = TodoStore::open_in_memory().await.unwrap();
        let err = store.list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Query);
    }
}
