use hotkey_core::db::open_db_in_memory;
use hotkey_core::{
    RepoError, SqliteTodoRepository, Todo, TodoListQuery, TodoRepository, TodoStatus,
    TodoValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn todo_at(title: &str, created_at: i64) -> Todo {
    Todo::with_id(Uuid::new_v4(), title, created_at)
}

#[test]
fn create_and_get_round_trip_keeps_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();

    let mut todo = todo_at("Draft architecture notes", 1_000);
    todo.content = Some("Outline the service boundaries".to_string());
    todo.status = TodoStatus::InProgress;
    todo.tags = vec!["planning".to_string(), "architecture".to_string()];

    let id = repo.create_todo(&todo).unwrap();
    let loaded = repo.get_todo(id, false).unwrap().unwrap();

    assert_eq!(loaded, todo);
    assert_eq!(loaded.ordered_tags(), vec!["architecture", "planning"]);
}

#[test]
fn update_missing_todo_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();
    let todo = todo_at("Never stored", 1);

    let err = repo.update_todo(&todo).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == todo.id));
}

#[test]
fn create_rejects_invalid_todos() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();

    let blank = todo_at("   ", 1);
    assert!(matches!(
        repo.create_todo(&blank),
        Err(RepoError::Validation(TodoValidationError::EmptyTitle))
    ));

    let nil = Todo::with_id(Uuid::nil(), "Nil id", 1);
    assert!(matches!(
        repo.create_todo(&nil),
        Err(RepoError::Validation(TodoValidationError::NilId))
    ));
}

#[test]
fn soft_delete_hides_todo_but_keeps_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();
    let id = repo.create_todo(&todo_at("Temporary", 10)).unwrap();

    repo.soft_delete_todo(id).unwrap();

    assert!(repo.get_todo(id, false).unwrap().is_none());
    let deleted = repo.get_todo(id, true).unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.updated_at >= deleted.created_at);
    assert!(repo.list_todos(&TodoListQuery::default()).unwrap().is_empty());

    let reused = repo.create_todo(&Todo::with_id(id, "Reuse attempt", 20));
    assert!(reused.is_err());
}

#[test]
fn update_cannot_revive_a_deleted_todo() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();
    let id = repo.create_todo(&todo_at("Gone", 10)).unwrap();
    let mut copy_before_delete = repo.get_todo(id, false).unwrap().unwrap();

    repo.soft_delete_todo(id).unwrap();
    copy_before_delete.title = "Gone but edited".to_string();
    copy_before_delete.touch(30);

    let err = repo.update_todo(&copy_before_delete).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    assert!(repo.get_todo(id, false).unwrap().is_none());
    assert_eq!(repo.get_todo(id, true).unwrap().unwrap().title, "Gone");
}

#[test]
fn update_leaves_the_deleted_flag_alone() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();
    let id = repo.create_todo(&todo_at("Keep", 10)).unwrap();

    let mut flagged = repo.get_todo(id, false).unwrap().unwrap();
    flagged.is_deleted = true;
    flagged.touch(20);
    repo.update_todo(&flagged).unwrap();

    assert!(repo.get_todo(id, false).unwrap().is_some());
}

#[test]
fn list_orders_newest_first_with_id_tie_break() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();

    let older = todo_at("Older", 100);
    let newest = todo_at("Newest", 300);
    let tie_a = Todo::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-00000000000a").unwrap(),
        "Tie A",
        200,
    );
    let tie_b = Todo::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-00000000000b").unwrap(),
        "Tie B",
        200,
    );
    for todo in [&older, &tie_b, &newest, &tie_a] {
        repo.create_todo(todo).unwrap();
    }

    let titles = repo
        .list_todos(&TodoListQuery::default())
        .unwrap()
        .into_iter()
        .map(|todo| todo.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Newest", "Tie A", "Tie B", "Older"]);
}

#[test]
fn list_filters_by_status_membership_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();

    for (index, status) in TodoStatus::ALL_CASES.into_iter().enumerate() {
        let mut todo = todo_at(status.display_name(), index as i64);
        todo.status = status;
        repo.create_todo(&todo).unwrap();
    }

    let open = repo
        .list_todos(&TodoListQuery {
            statuses: Some(vec![TodoStatus::Pending, TodoStatus::InProgress]),
            ..TodoListQuery::default()
        })
        .unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|todo| !todo.is_completed()));

    let none = repo
        .list_todos(&TodoListQuery {
            statuses: Some(Vec::new()),
            ..TodoListQuery::default()
        })
        .unwrap();
    assert!(none.is_empty());

    let page = repo
        .list_todos(&TodoListQuery {
            limit: Some(2),
            offset: 1,
            ..TodoListQuery::default()
        })
        .unwrap();
    let statuses = page.iter().map(|todo| todo.status).collect::<Vec<_>>();
    assert_eq!(statuses, vec![TodoStatus::Completed, TodoStatus::InProgress]);
}

#[test]
fn try_new_rejects_connection_that_skipped_bootstrap() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTodoRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(expected_version, 2);
            assert_eq!(actual_version, 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("raw connection must be rejected"),
    }
}

#[test]
fn try_new_reports_missing_table_and_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 2;").unwrap();
    assert!(matches!(
        SqliteTodoRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("todos"))
    ));

    conn.execute_batch("CREATE TABLE todos (uuid TEXT PRIMARY KEY, title TEXT);")
        .unwrap();
    assert!(matches!(
        SqliteTodoRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "todos",
            column: "content"
        })
    ));
}

#[test]
fn corrupted_tags_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&conn).unwrap();
    let id = repo.create_todo(&todo_at("Tagged", 1)).unwrap();
    conn.execute(
        "UPDATE todos SET tags = 'not json' WHERE uuid = ?1;",
        [id.to_string()],
    )
    .unwrap();

    let err = repo.get_todo(id, false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
