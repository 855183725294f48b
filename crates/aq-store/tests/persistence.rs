//! Snapshot round-trips through the `.pfh` file format.

use aq_store::{NetworkStore, StoreError, Table};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join("aq_store_tests").join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn sample_store() -> NetworkStore {
    let mut store = NetworkStore::new();
    let a = store.insert_node(10.0, 20.0);
    let b = store.insert_node(110.0, 20.0);
    let c = store.insert_node(60.0, 90.0);
    store.rename_node(a, "Reservoir");
    store.rename_node(b, "Junction");
    store.rename_node(c, "Outlet");
    store.insert_pipe("Reservoir", "Junction");
    store.insert_pipe("Junction", "Outlet");
    store
}

#[test]
fn save_then_open_round_trips_all_fields() {
    let path = temp_path("roundtrip.pfh");
    let mut store = sample_store();
    store.save_as(&path).unwrap();

    let reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.nodes(), store.nodes());
    assert_eq!(reopened.pipes(), store.pipes());
    assert_eq!(reopened.path(), Some(path.as_path()));
}

#[test]
fn save_as_overwrites_existing_file() {
    let path = temp_path("overwrite.pfh");
    let mut big = sample_store();
    big.save_as(&path).unwrap();

    let mut small = NetworkStore::new();
    small.insert_node(1.0, 1.0);
    small.save_as(&path).unwrap();

    let reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.nodes().len(), 1);
    assert!(reopened.pipes().is_empty());
}

#[test]
fn open_missing_path_gives_fresh_unbound_store() {
    let store = NetworkStore::open(Some(&temp_path("never_written.pfh"))).unwrap();
    assert!(store.is_empty());
    assert!(store.path().is_none());

    let store = NetworkStore::open(None).unwrap();
    assert!(store.is_empty());
}

#[test]
fn save_without_binding_is_an_error() {
    let mut store = NetworkStore::new();
    store.insert_node(0.0, 0.0);
    assert!(matches!(store.save(), Err(StoreError::Unbound)));
}

#[test]
fn save_binds_path_for_later_saves() {
    let path = temp_path("bind.pfh");
    let mut store = NetworkStore::new();
    store.insert_node(3.0, 4.0);
    store.save_as(&path).unwrap();

    store.insert_node(5.0, 6.0);
    store.save().unwrap();

    let reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.nodes().len(), 2);
}

#[test]
fn dangling_pipe_survives_round_trip() {
    let path = temp_path("dangling.pfh");
    let mut store = NetworkStore::new();
    let a = store.insert_node(0.0, 0.0);
    store.rename_node(a, "A");
    store.insert_pipe("A", "GHOST");
    store.save_as(&path).unwrap();

    let reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.pipes().len(), 1);
    let drawn_pipes = reopened
        .reload()
        .iter()
        .filter(|u| matches!(u, aq_store::CanvasUpdate::AddPipe { .. }))
        .count();
    assert_eq!(drawn_pipes, 0);
}

#[test]
fn column_counts_before_and_after_reopen() {
    let path = temp_path("columns.pfh");
    let mut store = NetworkStore::new();
    assert_eq!(store.column_count(Table::Nodes), 14);
    assert_eq!(store.column_count(Table::Pipes), 18);

    store.insert_node(0.0, 0.0);
    store.save_as(&path).unwrap();

    let reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.column_count(Table::Nodes), 14);
    assert_eq!(reopened.column_count(Table::Pipes), 18);
}

#[test]
fn next_id_continues_after_reopen() {
    let path = temp_path("next_id.pfh");
    let mut store = sample_store();
    store.save_as(&path).unwrap();

    let mut reopened = NetworkStore::open(Some(&path)).unwrap();
    assert_eq!(reopened.next_id(Table::Nodes), 4);
    assert_eq!(reopened.next_id(Table::Pipes), 3);
    assert_eq!(reopened.insert_node(0.0, 0.0), 4);
}

#[test]
fn open_rejects_non_database_file() {
    let path = temp_path("not_a_db.pfh");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "plain text, not sqlite").unwrap();

    assert!(NetworkStore::open(Some(&path)).is_err());
}
