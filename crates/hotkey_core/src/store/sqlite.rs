//! SQLite-backed record store.

use super::{ChangeSubscription, StoreResult, TodoStore};
use crate::db::{open_db, open_db_in_memory};
use crate::model::todo::{now_epoch_ms, Todo, TodoId};
use crate::notify::Subscribers;
use crate::repo::todo_repo::{SqliteTodoRepository, TodoListQuery, TodoRepository};
use crate::search::predicate::{TextFilter, TodoPredicate};
use log::debug;
use rusqlite::Connection;
use std::path::Path;

/// Todo store over one migrated SQLite connection.
pub struct SqliteTodoStore {
    conn: Connection,
    observers: Subscribers<()>,
}

impl SqliteTodoStore {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn new(conn: Connection) -> StoreResult<Self> {
        SqliteTodoRepository::try_new(&conn)?;
        Ok(Self {
            conn,
            observers: Subscribers::default(),
        })
    }

    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(open_db(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(open_db_in_memory()?)
    }

    /// Underlying connection, for diagnostics and maintenance.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn repo(&self) -> SqliteTodoRepository<'_> {
        SqliteTodoRepository::from_ready(&self.conn)
    }

    fn committed(&self, event: &str, id: TodoId) {
        debug!("event={event} module=store status=ok todo_id={id}");
        self.observers.notify(&());
    }
}

impl TodoStore for SqliteTodoStore {
    fn fetch(&self, predicate: &TodoPredicate) -> StoreResult<Vec<Todo>> {
        if predicate.text == TextFilter::Nothing {
            return Ok(Vec::new());
        }

        let query = TodoListQuery {
            statuses: predicate.statuses.clone(),
            ..TodoListQuery::default()
        };
        let mut todos = self.repo().list_todos(&query)?;
        todos.retain(|todo| predicate.admits_text(todo));
        Ok(todos)
    }

    fn get(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        self.repo().get_todo(id, false)
    }

    fn create(&self, todo: &Todo) -> StoreResult<TodoId> {
        let id = self.repo().create_todo(todo)?;
        self.committed("todo_create", id);
        Ok(id)
    }

    fn update(&self, todo: &Todo) -> StoreResult<()> {
        let mut stamped = todo.clone();
        stamped.touch(now_epoch_ms());
        self.repo().update_todo(&stamped)?;
        self.committed("todo_update", stamped.id);
        Ok(())
    }

    fn delete(&self, id: TodoId) -> StoreResult<()> {
        self.repo().soft_delete_todo(id)?;
        self.committed("todo_delete", id);
        Ok(())
    }

    fn on_change(&self, callback: Box<dyn Fn()>) -> ChangeSubscription {
        ChangeSubscription(self.observers.add(move |_| callback()))
    }

    fn remove_change_observer(&self, subscription: ChangeSubscription) {
        self.observers.remove(subscription.0);
    }
}
