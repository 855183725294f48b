//! In-memory store behavior: id allocation, deletes, reload events.

use aq_store::{CanvasUpdate, DeleteOutcome, NetworkStore, Table};

#[test]
fn next_id_starts_at_one() {
    let store = NetworkStore::new();
    assert_eq!(store.next_id(Table::Nodes), 1);
    assert_eq!(store.next_id(Table::Pipes), 1);
}

#[test]
fn next_id_is_max_plus_one_with_gaps() {
    let mut store = NetworkStore::new();
    for _ in 0..4 {
        store.insert_node(0.0, 0.0);
    }
    // Leave ids {1, 2, 4}
    assert!(store.delete_node(3).removed());

    assert_eq!(store.next_id(Table::Nodes), 5);
}

#[test]
fn node_and_pipe_counters_are_independent() {
    let mut store = NetworkStore::new();
    store.insert_node(0.0, 0.0);
    store.insert_node(1.0, 1.0);
    assert_eq!(store.next_id(Table::Pipes), 1);

    store.insert_pipe("a", "b");
    assert_eq!(store.next_id(Table::Nodes), 3);
    assert_eq!(store.next_id(Table::Pipes), 2);
}

#[test]
fn inserted_node_appears_in_reload() {
    let mut store = NetworkStore::new();
    let id = store.insert_node(10.0, 20.0);

    let adds: Vec<_> = store
        .reload()
        .into_iter()
        .filter(|u| matches!(u, CanvasUpdate::AddNode { .. }))
        .collect();
    assert_eq!(adds, vec![CanvasUpdate::AddNode { id, x: 10.0, y: 20.0 }]);
}

#[test]
fn delete_unconnected_node_removes_it() {
    let mut store = NetworkStore::new();
    let id = store.insert_node(5.0, 5.0);

    assert_eq!(store.delete_node(id), DeleteOutcome::Removed);
    assert!(store.node_by_id(id).is_none());
}

#[test]
fn delete_connected_node_is_refused() {
    let mut store = NetworkStore::new();
    let a = store.insert_node(0.0, 0.0);
    let b = store.insert_node(100.0, 0.0);
    store.rename_node(a, "A");
    store.rename_node(b, "B");
    let pipe = store.insert_pipe("A", "B");

    assert_eq!(store.delete_node(a), DeleteOutcome::Connected { pipes: 1 });
    assert!(store.node_by_id(a).is_some());
    assert!(store.pipe_by_id(pipe).is_some());

    // Removing the pipe lifts the refusal.
    assert!(store.delete_pipe(pipe));
    assert_eq!(store.delete_node(a), DeleteOutcome::Removed);
}

#[test]
fn delete_missing_node_reports_missing() {
    let mut store = NetworkStore::new();
    assert_eq!(store.delete_node(42), DeleteOutcome::Missing);
}

#[test]
fn pipe_with_dangling_endpoint_not_drawn_but_kept() {
    let mut store = NetworkStore::new();
    let a = store.insert_node(0.0, 0.0);
    store.rename_node(a, "A");
    let pipe = store.insert_pipe("A", "GHOST");

    let drawn_pipes: Vec<_> = store
        .reload()
        .into_iter()
        .filter(|u| matches!(u, CanvasUpdate::AddPipe { .. }))
        .collect();
    assert!(drawn_pipes.is_empty());
    assert!(store.pipe_by_id(pipe).is_some());
}

#[test]
fn reload_joins_endpoints_by_name() {
    let mut store = NetworkStore::new();
    let a = store.insert_node(0.0, 0.0);
    let b = store.insert_node(30.0, 40.0);
    store.rename_node(a, "A");
    store.rename_node(b, "B");
    let pipe = store.insert_pipe("A", "B");

    let drawn: Vec<_> = store
        .reload()
        .into_iter()
        .filter(|u| matches!(u, CanvasUpdate::AddPipe { .. }))
        .collect();
    assert_eq!(
        drawn,
        vec![CanvasUpdate::AddPipe {
            id: pipe,
            x1: 0.0,
            y1: 0.0,
            x2: 30.0,
            y2: 40.0,
        }]
    );
}

#[test]
fn duplicate_names_resolve_to_first_node() {
    let mut store = NetworkStore::new();
    let first = store.insert_node(1.0, 1.0);
    let second = store.insert_node(9.0, 9.0);
    let other = store.insert_node(5.0, 5.0);
    store.rename_node(first, "DUP");
    store.rename_node(second, "DUP");
    store.rename_node(other, "OTHER");
    store.insert_pipe("DUP", "OTHER");

    let drawn: Vec<_> = store
        .reload()
        .into_iter()
        .filter_map(|u| match u {
            CanvasUpdate::AddPipe { x1, y1, .. } => Some((x1, y1)),
            _ => None,
        })
        .collect();
    assert_eq!(drawn, vec![(1.0, 1.0)]);
}

#[test]
fn move_node_updates_position_only() {
    let mut store = NetworkStore::new();
    let id = store.insert_node(1.0, 2.0);
    assert!(store.move_node(id, 50.0, 60.0));

    let node = store.node_by_id(id).unwrap();
    assert_eq!((node.x, node.y), (50.0, 60.0));
    assert_eq!(node.id, id);
    assert!(!store.move_node(999, 0.0, 0.0));
}

#[test]
fn rename_does_not_rewrite_pipe_references() {
    let mut store = NetworkStore::new();
    let a = store.insert_node(0.0, 0.0);
    let b = store.insert_node(10.0, 0.0);
    store.rename_node(a, "A");
    store.rename_node(b, "B");
    let pipe = store.insert_pipe("A", "B");

    store.rename_node(a, "A2");

    // The old endpoint name is now dangling; the pipe row is untouched.
    assert_eq!(store.pipe_by_id(pipe).unwrap().node1, "A");
    assert_eq!(store.connectivity(a), 0);
    assert_eq!(store.connectivity(b), 1);
}
