//! Todo use-case service.
//!
//! # Responsibility
//! - Quick capture, rename, notes editing, completion toggling and deletion.
//! - Seed the sample todos used by previews and the demo CLI.
//!
//! # Invariants
//! - Titles and notes are trimmed; empty notes are stored as `None`.
//! - Unchanged edits never reach the store, so they fire no change event.

use crate::model::todo::{Todo, TodoId, TodoStatus};
use crate::store::{StoreError, StoreResult, TodoStore};
use std::rc::Rc;
use uuid::Uuid;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Use-case service over a shared store.
pub struct TodoService<S: TodoStore> {
    store: Rc<S>,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    /// Creates a pending todo from quick-capture input.
    ///
    /// Returns `Ok(None)` without writing when the trimmed title is empty.
    pub fn create_todo(&self, title: &str, content: Option<&str>) -> StoreResult<Option<TodoId>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let mut todo = Todo::new(title);
        todo.content = normalize_content(content);
        self.store.create(&todo).map(Some)
    }

    /// Persists a fully built todo, e.g. from seeding or import.
    pub fn insert(&self, todo: &Todo) -> StoreResult<TodoId> {
        self.store.create(todo)
    }

    /// Renames a todo. Returns whether anything was written.
    pub fn rename(&self, id: TodoId, title: &str) -> StoreResult<bool> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(false);
        }
        self.modify(id, |todo| {
            if todo.title == title {
                return false;
            }
            todo.title = title.to_string();
            true
        })
    }

    /// Replaces the notes of a todo. Returns whether anything was written.
    pub fn edit_content(&self, id: TodoId, content: Option<&str>) -> StoreResult<bool> {
        let content = normalize_content(content);
        self.modify(id, |todo| {
            if todo.content == content {
                return false;
            }
            todo.content = content;
            true
        })
    }

    pub fn set_status(&self, id: TodoId, status: TodoStatus) -> StoreResult<bool> {
        self.modify(id, |todo| {
            if todo.status == status {
                return false;
            }
            todo.status = status;
            true
        })
    }

    /// Flips completed todos back to pending and everything else to completed.
    pub fn toggle_completion(&self, id: TodoId) -> StoreResult<TodoStatus> {
        let todo = self.require(id)?;
        let next = if todo.is_completed() {
            TodoStatus::Pending
        } else {
            TodoStatus::Completed
        };
        self.set_status(id, next)?;
        Ok(next)
    }

    pub fn delete(&self, id: TodoId) -> StoreResult<()> {
        self.store.delete(id)
    }

    fn require(&self, id: TodoId) -> StoreResult<Todo> {
        self.store.get(id)?.ok_or(StoreError::NotFound(id))
    }

    fn modify(&self, id: TodoId, edit: impl FnOnce(&mut Todo) -> bool) -> StoreResult<bool> {
        let mut todo = self.require(id)?;
        if !edit(&mut todo) {
            return Ok(false);
        }
        self.store.update(&todo)?;
        Ok(true)
    }
}

/// Inserts the three preview todos, created 8, 4 and 2 hours before `now_ms`.
pub fn seed_sample_todos<S: TodoStore>(
    service: &TodoService<S>,
    now_ms: i64,
) -> StoreResult<Vec<TodoId>> {
    let samples = [
        (
            "Draft architecture notes",
            "Outline the service boundaries for automation modules.",
            TodoStatus::InProgress,
            &["planning", "architecture"][..],
            8,
        ),
        (
            "Collect shortcut feedback",
            "Ask the design team for their top five global hotkey requests.",
            TodoStatus::Pending,
            &["research"][..],
            4,
        ),
        (
            "Polish release notes",
            "Draft a concise summary for the 0.2.0 milestone.",
            TodoStatus::Completed,
            &["writing"][..],
            2,
        ),
    ];

    samples
        .into_iter()
        .map(|(title, content, status, tags, hours_ago)| {
            let mut todo = Todo::with_id(Uuid::new_v4(), title, now_ms - hours_ago * HOUR_MS);
            todo.content = Some(content.to_string());
            todo.status = status;
            todo.tags = tags.iter().map(|tag| tag.to_string()).collect();
            service.insert(&todo)
        })
        .collect()
}

fn normalize_content(content: Option<&str>) -> Option<String> {
    content
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
