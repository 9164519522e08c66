//! Todo repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `todos` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Todo::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Lists are ordered by `created_at DESC, uuid ASC`.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::todo::{now_epoch_ms, Todo, TodoId, TodoStatus, TodoValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    status,
    tags,
    created_at,
    updated_at,
    is_deleted
FROM todos";

const REQUIRED_TODO_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "content",
    "status",
    "tags",
    "created_at",
    "updated_at",
    "is_deleted",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
    /// Connection was not bootstrapped through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing todos.
#[derive(Debug, Clone, Default)]
pub struct TodoListQuery {
    /// Status membership filter; `None` admits every status.
    pub statuses: Option<Vec<TodoStatus>>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    /// Rewrites the editable fields of a live todo. Deleted rows report `NotFound`.
    fn update_todo(&self, todo: &Todo) -> RepoResult<()>;
    fn get_todo(&self, id: TodoId, include_deleted: bool) -> RepoResult<Option<Todo>>;
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
    fn soft_delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Wraps a migrated connection, rejecting connections that skipped bootstrap.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection whose schema was already checked by `try_new`.
    pub(crate) fn from_ready(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        todo.validate()?;

        self.conn.execute(
            "INSERT INTO todos (
                uuid,
                title,
                content,
                status,
                tags,
                created_at,
                updated_at,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                todo.id.to_string(),
                todo.title.as_str(),
                todo.content.as_deref(),
                status_to_db(todo.status),
                tags_to_db(&todo.tags)?,
                todo.created_at,
                todo.updated_at,
                bool_to_int(todo.is_deleted),
            ],
        )?;

        Ok(todo.id)
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                content = ?2,
                status = ?3,
                tags = ?4,
                updated_at = ?5
             WHERE uuid = ?6
               AND is_deleted = 0;",
            params![
                todo.title.as_str(),
                todo.content.as_deref(),
                status_to_db(todo.status),
                tags_to_db(&todo.tags)?,
                todo.updated_at,
                todo.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(todo.id));
        }

        Ok(())
    }

    fn get_todo(&self, id: TodoId, include_deleted: bool) -> RepoResult<Option<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(statuses) = &query.statuses {
            if statuses.is_empty() {
                return Ok(Vec::new());
            }
            let placeholders = vec!["?"; statuses.len()].join(", ");
            sql.push_str(&format!(" AND status IN ({placeholders})"));
            bind_values.extend(
                statuses
                    .iter()
                    .map(|status| Value::Text(status_to_db(*status).to_string())),
            );
        }

        sql.push_str(" ORDER BY created_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn soft_delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET
                is_deleted = 1,
                updated_at = MAX(updated_at, ?2)
             WHERE uuid = ?1;",
            params![id.to_string(), now_epoch_ms()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'todos'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("todos"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('todos');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_TODO_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "todos",
                column,
            });
        }
    }

    Ok(())
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in todos.uuid"))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in todos.status"))
    })?;

    let tags_text: String = row.get("tags")?;
    let tags = serde_json::from_str::<Vec<String>>(&tags_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid tags `{tags_text}` in todos.tags: {err}"))
    })?;

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in todos.is_deleted"
            )));
        }
    };

    let todo = Todo {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        status,
        tags,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        is_deleted,
    };
    todo.validate()?;
    Ok(todo)
}

fn status_to_db(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::Pending => "pending",
        TodoStatus::InProgress => "in_progress",
        TodoStatus::Completed => "completed",
        TodoStatus::Archived => "archived",
    }
}

fn parse_status(value: &str) -> Option<TodoStatus> {
    match value {
        "pending" => Some(TodoStatus::Pending),
        "in_progress" => Some(TodoStatus::InProgress),
        "completed" => Some(TodoStatus::Completed),
        "archived" => Some(TodoStatus::Archived),
        _ => None,
    }
}

fn tags_to_db(tags: &[String]) -> RepoResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| RepoError::InvalidData(format!("tags cannot be encoded: {err}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
