use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::repo::storage_adapter::{ACTIVE_BOARD_KEY, TASKS_KEY};
use kanban_core::{
    derive_boards, render, KeyValueStore, SqliteKeyValueStore, StorageAdapter, Task, TaskStatus,
};
use rusqlite::Connection;

fn raw_tasks(conn: &Connection) -> Option<String> {
    SqliteKeyValueStore::try_new(conn)
        .unwrap()
        .get(TASKS_KEY)
        .unwrap()
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "a".to_string(),
            title: "Plan sprint".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            board: "Work".to_string(),
        },
        Task {
            id: "b".to_string(),
            title: "Buy milk".to_string(),
            description: "2 litres".to_string(),
            status: TaskStatus::Done,
            board: "Home".to_string(),
        },
    ]
}

#[test]
fn load_of_absent_collection_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());

    assert!(storage.load().unwrap().is_empty());
    assert!(!storage.has_tasks().unwrap());
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());

    storage.save(&sample_tasks()).unwrap();

    assert_eq!(storage.load().unwrap(), sample_tasks());
    assert!(storage.has_tasks().unwrap());
}

#[test]
fn persisted_layout_is_plain_json_array() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    storage.save(&sample_tasks()[..1]).unwrap();

    assert_eq!(
        raw_tasks(&conn).unwrap(),
        r#"[{"id":"a","title":"Plan sprint","description":"","status":"todo","board":"Work"}]"#
    );
}

#[test]
fn resaving_loaded_collection_keeps_bytes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"x1","title":"Ship","description":"soon","status":"doing","board":"Q3"}]"#,
        )
        .unwrap();
    let storage = StorageAdapter::new(store);
    let before = raw_tasks(&conn).unwrap();

    storage.save(&storage.load().unwrap()).unwrap();

    assert_eq!(raw_tasks(&conn).unwrap(), before);
}

#[test]
fn malformed_collection_reads_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store.set(TASKS_KEY, "{not json").unwrap();
    let storage = StorageAdapter::new(store);

    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn collection_with_unknown_status_reads_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"1","title":"t","description":"","status":"blocked","board":"B"}]"#,
        )
        .unwrap();
    let storage = StorageAdapter::new(store);

    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn collection_with_duplicate_ids_reads_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"1","title":"a","description":"","status":"todo","board":"B"},
                {"id":"1","title":"b","description":"","status":"done","board":"B"}]"#,
        )
        .unwrap();
    let storage = StorageAdapter::new(store);

    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn task_with_empty_board_loads_but_belongs_to_no_board() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"1","title":"a","description":"","status":"todo","board":"Work"},
                {"id":"2","title":"b","description":"","status":"todo","board":""}]"#,
        )
        .unwrap();
    let storage = StorageAdapter::new(store);

    let tasks = storage.load().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].board, "");
    assert_eq!(derive_boards(&tasks), vec!["Work"]);
    assert_eq!(render(&tasks, "Work").task_count(), 1);

    storage.save(&tasks).unwrap();
    assert_eq!(storage.load().unwrap(), tasks);
}

#[test]
fn missing_description_defaults_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"1","title":"a","status":"todo","board":"B"}]"#,
        )
        .unwrap();
    let storage = StorageAdapter::new(store);

    let tasks = storage.load().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "");
}

#[test]
fn json_scalar_roundtrip_and_malformed_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let storage = StorageAdapter::new(store);

    storage.save_json_scalar(ACTIVE_BOARD_KEY, "Work").unwrap();
    assert_eq!(
        storage.load_scalar(ACTIVE_BOARD_KEY).unwrap().as_deref(),
        Some("\"Work\"")
    );
    assert_eq!(
        storage
            .load_json_scalar::<String>(ACTIVE_BOARD_KEY)
            .unwrap()
            .as_deref(),
        Some("Work")
    );

    storage.save_scalar(ACTIVE_BOARD_KEY, "Work").unwrap();
    assert_eq!(
        storage.load_json_scalar::<String>(ACTIVE_BOARD_KEY).unwrap(),
        None
    );
}

#[test]
fn collection_survives_reopen_of_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
        storage.save(&sample_tasks()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    assert_eq!(storage.load().unwrap(), sample_tasks());
}
