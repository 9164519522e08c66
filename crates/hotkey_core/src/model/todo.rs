//! Todo domain model.
//!
//! # Responsibility
//! - Define the todo record persisted by the store.
//! - Provide validation and timestamp helpers used by write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - `title` is non-empty after trimming.
//! - `updated_at >= created_at`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a todo record.
///
/// Comparable and hashable; equality is the only identity contract.
pub type TodoId = Uuid;

/// Lifecycle state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Created but not started.
    Pending,
    /// Work is in progress.
    InProgress,
    /// Completed successfully.
    Completed,
    /// Kept for reference, no longer actionable.
    Archived,
}

impl TodoStatus {
    pub const ALL_CASES: [TodoStatus; 4] = [
        TodoStatus::Pending,
        TodoStatus::InProgress,
        TodoStatus::Completed,
        TodoStatus::Archived,
    ];

    /// Human-readable label used by list rows.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Validation failures for todo write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    NilId,
    EmptyTitle,
    UpdatedBeforeCreated { created_at: i64, updated_at: i64 },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "todo updated_at ({updated_at}) is earlier than created_at ({created_at})"
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable identity, kept across edits and after deletion.
    pub id: TodoId,
    pub title: String,
    /// Optional free-form notes.
    pub content: Option<String>,
    pub status: TodoStatus,
    /// Lowercase labels, display only.
    pub tags: Vec<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Never earlier than `created_at`.
    pub updated_at: i64,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl Todo {
    /// Creates a pending todo with a generated id, stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, now_epoch_ms())
    }

    /// Creates a pending todo with caller-provided identity and creation time.
    ///
    /// Used by seeding and import paths. Does not validate.
    pub fn with_id(id: TodoId, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            content: None,
            status: TodoStatus::Pending,
            tags: Vec::new(),
            created_at,
            updated_at: created_at,
            is_deleted: false,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        if self.updated_at < self.created_at {
            return Err(TodoValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Stamps `updated_at` with `now_ms`, clamped so it never precedes `created_at`.
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.created_at);
    }

    /// Tags sorted by name.
    pub fn ordered_tags(&self) -> Vec<&str> {
        let mut tags = self.tags.iter().map(String::as_str).collect::<Vec<_>>();
        tags.sort_unstable();
        tags
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoStatus, TodoValidationError};
    use uuid::Uuid;

    #[test]
    fn new_todo_is_pending_and_valid() {
        let todo = Todo::new("Write changelog");

        assert!(!todo.id.is_nil());
        assert_eq!(todo.status, TodoStatus::Pending);
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(todo.is_active());
        assert!(todo.validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let todo = Todo::new("   ");
        assert_eq!(todo.validate(), Err(TodoValidationError::EmptyTitle));
    }

    #[test]
    fn nil_id_is_rejected() {
        let todo = Todo::with_id(Uuid::nil(), "nil", 10);
        assert_eq!(todo.validate(), Err(TodoValidationError::NilId));
    }

    #[test]
    fn touch_never_moves_updated_at_before_created_at() {
        let mut todo = Todo::with_id(Uuid::new_v4(), "clock skew", 5_000);

        todo.touch(1_000);
        assert_eq!(todo.updated_at, 5_000);

        todo.touch(9_000);
        assert_eq!(todo.updated_at, 9_000);
        assert!(todo.validate().is_ok());
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_value(TodoStatus::InProgress).unwrap();
        assert_eq!(json, "in_progress");
        assert_eq!(TodoStatus::InProgress.display_name(), "In Progress");
    }
}
