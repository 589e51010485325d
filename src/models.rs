use crate::error::{Result, TodoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo record as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub desc: String,
    /// Epoch milliseconds, set once at insert
    pub created_at: i64,
}

impl Todo {
    /// Creation time as a UTC datetime, `None` if the stored value is out of range
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}

/// Trimmed title/description pair, checked before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub desc: String,
}

impl TodoInput {
    pub fn new(title: &str, desc: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TodoError::Validation("Title is required".to_string()));
        }

        Ok(TodoInput {
            title: title.to_string(),
            desc: desc.trim().to_string(),
        })
    }
}
