//! Record store contract consumed by the query engine and surfaces.
//!
//! # Responsibility
//! - Expose CRUD, predicate fetch and change notification for todos.
//! - Hide the concrete persistence backend behind `TodoStore`.
//!
//! # Invariants
//! - `fetch` returns live todos ordered by `created_at DESC, id ASC`.
//! - Change observers fire only after a write has been committed.

use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::RepoError;
use crate::search::predicate::TodoPredicate;

mod sqlite;

pub use sqlite::SqliteTodoStore;

/// Store-level failure. Same taxonomy as the repository layer.
pub type StoreError = RepoError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle returned by [`TodoStore::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeSubscription(pub(crate) u64);

/// Persistent todo store.
pub trait TodoStore {
    /// Fetches live todos matching `predicate` in the fixed result order.
    fn fetch(&self, predicate: &TodoPredicate) -> StoreResult<Vec<Todo>>;
    /// Gets one live todo by id.
    fn get(&self, id: TodoId) -> StoreResult<Option<Todo>>;
    fn create(&self, todo: &Todo) -> StoreResult<TodoId>;
    /// Replaces a todo and stamps `updated_at`.
    fn update(&self, todo: &Todo) -> StoreResult<()>;
    /// Soft-deletes a todo. Its id is never reused.
    fn delete(&self, id: TodoId) -> StoreResult<()>;
    /// Registers a callback invoked after every committed write.
    fn on_change(&self, callback: Box<dyn Fn()>) -> ChangeSubscription;
    fn remove_change_observer(&self, subscription: ChangeSubscription);
}
