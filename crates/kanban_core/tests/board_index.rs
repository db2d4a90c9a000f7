use kanban_core::db::open_db_in_memory;
use kanban_core::repo::storage_adapter::ACTIVE_BOARD_KEY;
use kanban_core::{BoardIndex, SqliteKeyValueStore, StorageAdapter};

fn boards(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn stale_active_board_falls_back_to_first_board() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);

    index.set_active_board("Z").unwrap();

    assert_eq!(
        index.get_active_board(&boards(&["X", "Y"])).unwrap().as_deref(),
        Some("X")
    );
}

#[test]
fn persisted_member_board_is_kept() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);

    index.set_active_board("Y").unwrap();

    assert_eq!(
        index.get_active_board(&boards(&["X", "Y"])).unwrap().as_deref(),
        Some("Y")
    );
}

#[test]
fn first_load_without_selection_uses_first_board() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);

    assert_eq!(
        index.get_active_board(&boards(&["B", "A"])).unwrap().as_deref(),
        Some("B")
    );
}

#[test]
fn no_boards_means_no_active_board() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);
    index.set_active_board("Old").unwrap();

    assert_eq!(index.get_active_board(&[]).unwrap(), None);
}

#[test]
fn active_board_is_stored_json_encoded() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);

    index.set_active_board("Sprint \"1\"").unwrap();

    assert_eq!(
        storage.load_scalar(ACTIVE_BOARD_KEY).unwrap().as_deref(),
        Some(r#""Sprint \"1\"""#)
    );
    assert_eq!(
        index
            .get_active_board(&boards(&["Other", "Sprint \"1\""]))
            .unwrap()
            .as_deref(),
        Some("Sprint \"1\"")
    );
}

#[test]
fn clear_active_board_removes_selection() {
    let conn = open_db_in_memory().unwrap();
    let storage = StorageAdapter::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    let index = BoardIndex::new(&storage);
    index.set_active_board("Y").unwrap();

    index.clear_active_board().unwrap();

    assert_eq!(storage.load_scalar(ACTIVE_BOARD_KEY).unwrap(), None);
}
