// Data models for TodoStore

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store, never reused
pub type TodoId = u64;

/// A single task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a pending todo created now.
    ///
    /// The caller is responsible for trimming and rejecting blank text;
    /// `TodoStore::add_todo` does both.
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self::with_created_at(id, text, Utc::now())
    }

    pub fn with_created_at(id: TodoId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    /// Creation time as ISO-8601 UTC with millisecond precision
    pub fn created_at_iso(&self) -> String {
        to_iso8601(&self.created_at)
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn to_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
