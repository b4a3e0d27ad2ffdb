use std::sync::{Arc, Mutex};

use floorwire_core::{DocumentError, DocumentEvent, EventCategory, EventFilter, StructureEvent};
use floorwire_designer::model::{
    Device, DeviceKind, DeviceNode, Document, Edge, EdgeData, EdgeId, LightType, MetaUpdate, NodeData,
    NodeId, PowerType, WallSegment,
};
use floorwire_designer::store::{BatchUpdate, DocumentStore, EditorMode, NodeUpdate};
use floorwire_designer::Point;
use floorwire_settings::Config;

fn node(kind: DeviceKind, id: &str, x: f64, y: f64) -> DeviceNode {
    DeviceNode::new(Device::of_kind(kind), Point::new(x, y)).with_id(id)
}

fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(source.into(), target.into()).with_id(id)
}

/// Store with nodes a, b, c, d and edges a-b, b-c, c-d, d-a, loaded so
/// history starts from this state.
fn square_store() -> DocumentStore {
    let mut doc = Document::new();
    doc.nodes = vec![
        node(DeviceKind::Light, "a", 0.0, 0.0),
        node(DeviceKind::Switch, "b", 100.0, 0.0),
        node(DeviceKind::Light, "c", 100.0, 100.0),
        node(DeviceKind::Power, "d", 0.0, 100.0),
    ];
    doc.edges = vec![
        edge("ab", "a", "b"),
        edge("bc", "b", "c"),
        edge("cd", "c", "d"),
        edge("da", "d", "a"),
    ];
    let mut store = DocumentStore::new();
    store.load_project(doc).unwrap();
    store
}

fn edge_ids(store: &DocumentStore) -> Vec<&str> {
    store.edges().iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn test_new_store_defaults() {
    let store = DocumentStore::new();
    assert!(store.nodes().is_empty());
    assert_eq!(store.document().name, "Untitled Floorplan");
    assert_eq!(store.mode(), EditorMode::Select);
    assert_eq!(store.viewport().zoom(), 1.0);
    assert!(!store.can_undo());
    assert_eq!(store.history_len(), 1);
}

#[test]
fn test_add_node_selects_and_is_undoable() {
    let mut store = DocumentStore::new();
    let id = store.add_node(node(DeviceKind::Power, "p", 10.0, 20.0));
    assert_eq!(id.as_str(), "p");
    assert_eq!(store.selected_node_id(), Some(&id));
    assert!(store.can_undo());

    assert!(store.undo());
    assert!(store.nodes().is_empty());
    assert_eq!(store.selected_node_id(), None);
    assert!(store.redo());
    assert_eq!(store.nodes().len(), 1);
}

#[test]
fn test_add_node_replaces_colliding_id() {
    let mut store = DocumentStore::new();
    store.add_node(node(DeviceKind::Power, "p", 0.0, 0.0));
    let second = store.add_node(node(DeviceKind::Power, "p", 5.0, 5.0));
    assert_ne!(second.as_str(), "p");
    assert_eq!(store.nodes().len(), 2);
}

#[test]
fn test_update_node() {
    let mut store = square_store();
    let id = NodeId::from("d");
    let update = NodeUpdate::position(Point::new(1.0, 2.0))
        .with_rotation(90.0)
        .with_device(Device::power(PowerType::Double))
        .with_data(NodeData {
            label: Some("Kitchen".to_string()),
            ..NodeData::default()
        });
    assert!(store.update_node(&id, update));

    let updated = store.node(&id).unwrap();
    assert_eq!(updated.position, Point::new(1.0, 2.0));
    assert_eq!(updated.rotation, 90.0);
    assert_eq!(updated.device, Device::power(PowerType::Double));
    assert_eq!(updated.data.label.as_deref(), Some("Kitchen"));
    assert_eq!(store.history_len(), 2);
}

#[test]
fn test_update_node_rejects_other_kind() {
    let mut store = square_store();
    let update = NodeUpdate::default().with_device(Device::light(LightType::Wall));
    assert!(!store.update_node(&"d".into(), update));
    assert_eq!(store.node(&"d".into()).unwrap().kind(), DeviceKind::Power);
    assert!(!store.can_undo());
}

#[test]
fn test_update_node_rejects_non_finite() {
    let mut store = square_store();
    let update = NodeUpdate::position(Point::new(f64::NAN, 0.0));
    assert!(!store.update_node(&"a".into(), update));
    assert_eq!(store.node(&"a".into()).unwrap().position, Point::new(0.0, 0.0));
}

#[test]
fn test_stale_ids_are_noops() {
    let mut store = square_store();
    let ghost = NodeId::from("ghost");
    assert!(!store.update_node(&ghost, NodeUpdate::position(Point::new(1.0, 1.0))));
    assert!(!store.delete_node(&ghost));
    assert!(!store.delete_edge(&"nope".into()));
    assert!(!store.update_edge(&"nope".into(), EdgeData::default()));
    assert!(!store.select_node(Some(ghost.clone())));
    assert!(!store.preview_node_transform(&ghost, Point::new(0.0, 0.0), None));
    assert!(store.add_edge(Edge::new(ghost, "a".into())).is_none());
    assert!(!store.can_undo());
}

#[test]
fn test_cascade_delete_removes_exactly_touching_edges() {
    let mut store = square_store();
    store.select_node(Some("b".into()));
    assert!(store.delete_node(&"b".into()));

    assert_eq!(edge_ids(&store), vec!["cd", "da"]);
    assert!(store.node(&"b".into()).is_none());
    assert_eq!(store.selected_node_id(), None);

    assert!(store.undo());
    assert_eq!(edge_ids(&store), vec!["ab", "bc", "cd", "da"]);
}

#[test]
fn test_add_edge_selects_edge() {
    let mut store = square_store();
    store.select_node(Some("a".into()));
    let id = store.add_edge(edge("ac", "a", "c")).unwrap();
    assert_eq!(store.selected_edge_id(), Some(&id));
    assert_eq!(store.selected_node_id(), None);
}

#[test]
fn test_add_edge_rejects_self_loop() {
    let mut store = square_store();
    assert!(store.add_edge(edge("aa", "a", "a")).is_none());
    assert_eq!(store.edges().len(), 4);
}

#[test]
fn test_update_edge_data() {
    let mut store = square_store();
    let data = EdgeData {
        control_point: Some(Point::new(5.0, 5.0)),
        ..EdgeData::default()
    };
    assert!(store.update_edge(&"ab".into(), data.clone()));
    assert_eq!(store.edge(&"ab".into()).unwrap().data, data);
}

#[test]
fn test_selection_is_exclusive() {
    let mut store = square_store();
    assert!(store.select_edge(Some("ab".into())));
    assert!(store.select_node(Some("a".into())));
    assert_eq!(store.selected_edge_id(), None);
    assert!(store.select_edge(Some("bc".into())));
    assert_eq!(store.selected_node_id(), None);
    assert!(store.select_node(None));
    assert_eq!(store.selected_edge_id(), None);
}

#[test]
fn test_atomic_batch() {
    let mut store = DocumentStore::new();
    let mut doc = Document::new();
    doc.nodes = vec![
        node(DeviceKind::Switch, "B", 0.0, 0.0),
        node(DeviceKind::Switch, "C", 10.0, 0.0),
        node(DeviceKind::Light, "D", 20.0, 0.0),
    ];
    doc.edges = vec![edge("bd", "B", "D")];
    store.load_project(doc).unwrap();
    let before = store.history_len();

    let outcome = store.batch_update(
        BatchUpdate::new()
            .add_node(node(DeviceKind::Switch, "A", 5.0, 5.0))
            .delete_node("B".into())
            .delete_node("C".into())
            .add_edge(edge("ad", "A", "D")),
    );

    assert_eq!(store.history_len(), before + 1);
    let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["D", "A"]);
    assert_eq!(edge_ids(&store), vec!["ad"]);
    assert_eq!(outcome.nodes_removed.len(), 2);
    assert_eq!(outcome.edges_removed, vec![EdgeId::from("bd")]);

    assert!(store.undo());
    assert_eq!(store.nodes().len(), 3);
    assert_eq!(edge_ids(&store), vec!["bd"]);
}

#[test]
fn test_batch_skips_dangling_edges() {
    let mut store = square_store();
    let outcome = store.batch_update(
        BatchUpdate::new()
            .delete_node("a".into())
            .add_edge(edge("xa", "c", "a")),
    );
    assert!(outcome.edges_added.is_empty());
    assert!(store.edges().iter().all(|e| !e.touches(&"a".into())));
}

#[test]
fn test_empty_batch_records_nothing() {
    let mut store = square_store();
    assert!(store.batch_update(BatchUpdate::new()).is_noop());
    assert!(store
        .batch_update(BatchUpdate::new().delete_node("ghost".into()))
        .is_noop());
    assert!(!store.can_undo());
}

#[test]
fn test_batch_edges_follow_reassigned_node_id() {
    let mut store = square_store();
    let outcome = store.batch_update(
        BatchUpdate::new()
            .add_node(node(DeviceKind::Switch, "d", 300.0, 300.0))
            .add_edge(edge("new", "d", "c")),
    );

    let added = outcome.nodes_added[0].clone();
    assert_ne!(added.as_str(), "d");
    let wired = store.edge(&"new".into()).unwrap();
    assert_eq!(wired.source, added);
    assert_eq!(store.node(&wired.source).unwrap().kind(), DeviceKind::Switch);
    assert_eq!(store.node(&"d".into()).unwrap().kind(), DeviceKind::Power);
}

#[test]
fn test_batch_adding_and_cutting_same_edge_is_noop() {
    let mut store = square_store();
    let len = store.history_len();
    let outcome = store.batch_update(
        BatchUpdate::new()
            .add_edge(edge("tmp", "a", "c"))
            .delete_edge("tmp".into()),
    );
    assert!(outcome.is_noop());
    assert_eq!(store.history_len(), len);
    assert!(!store.can_undo());
    assert!(store.edge(&"tmp".into()).is_none());
}

#[test]
fn test_undo_then_edit_truncates_redo() {
    let mut store = DocumentStore::new();
    store.add_node(node(DeviceKind::Power, "p1", 0.0, 0.0));
    store.add_node(node(DeviceKind::Power, "p2", 0.0, 0.0));
    assert!(store.undo());
    assert!(store.can_redo());

    store.add_node(node(DeviceKind::Power, "p3", 0.0, 0.0));
    assert!(!store.can_redo());
    assert!(!store.redo());
    let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}

#[test]
fn test_history_is_bounded() {
    let mut store = DocumentStore::new();
    for i in 0..60 {
        store.add_node(node(DeviceKind::Power, &format!("p{}", i), i as f64, 0.0));
        assert!(store.history_len() <= 50);
    }

    let mut undone = 0;
    while store.undo() {
        undone += 1;
    }
    assert_eq!(undone, 49);
    // Oldest retained snapshot holds the first eleven nodes.
    assert_eq!(store.nodes().len(), 11);
}

#[test]
fn test_history_depth_from_config() {
    let mut config = Config::default();
    config.history.max_depth = 3;
    let mut store = DocumentStore::with_config(&config);
    for i in 0..5 {
        store.add_node(node(DeviceKind::Light, &format!("l{}", i), 0.0, 0.0));
    }
    assert_eq!(store.history_len(), 3);
}

#[test]
fn test_undo_keeps_walls_and_view_state() {
    let mut store = DocumentStore::new();
    store.add_node(node(DeviceKind::Power, "p", 0.0, 0.0));
    store.set_walls(vec![WallSegment::new(
        "w",
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
    )]);
    store.set_mode(EditorMode::AddLight);
    store.update_viewport(|v| v.set_zoom(2.0));

    assert!(store.undo());
    assert_eq!(store.walls().len(), 1);
    assert_eq!(store.mode(), EditorMode::AddLight);
    assert_eq!(store.viewport().zoom(), 2.0);
}

#[test]
fn test_preview_and_commit() {
    let mut store = square_store();
    let id = NodeId::from("a");
    assert!(store.preview_node_transform(&id, Point::new(5.0, 5.0), Some(45.0)));
    assert!(store.preview_node_transform(&id, Point::new(6.0, 6.0), None));
    assert_eq!(store.history_len(), 1);

    assert!(store.commit());
    assert_eq!(store.history_len(), 2);
    assert!(!store.commit());

    assert!(store.undo());
    let restored = store.node(&id).unwrap();
    assert_eq!(restored.position, Point::new(0.0, 0.0));
    assert_eq!(restored.rotation, 0.0);
}

#[test]
fn test_load_project_resets_state() {
    let mut store = DocumentStore::new();
    store.add_node(node(DeviceKind::Power, "p", 0.0, 0.0));
    store.set_mode(EditorMode::AddWire);
    store.update_viewport(|v| v.pan_by(10.0, 10.0));
    let revision = store.walls_revision();

    let mut doc = Document::new();
    doc.name = "Flat".to_string();
    doc.nodes = vec![node(DeviceKind::Light, "l", 1.0, 1.0)];
    store.load_project(doc).unwrap();

    assert_eq!(store.document().name, "Flat");
    assert!(!store.can_undo());
    assert_eq!(store.selected_node_id(), None);
    assert_eq!(store.mode(), EditorMode::Select);
    assert_eq!(store.viewport().pan(), Point::new(0.0, 0.0));
    assert!(store.walls_revision() > revision);
}

#[test]
fn test_load_project_is_all_or_nothing() {
    let mut store = square_store();
    let mut doc = Document::new();
    doc.nodes = vec![node(DeviceKind::Light, "l", 1.0, 1.0)];
    doc.edges = vec![edge("e", "l", "missing")];

    let err = store.load_project(doc).unwrap_err();
    assert_eq!(
        err,
        DocumentError::DanglingEdge {
            edge: "e".to_string(),
            node: "missing".to_string()
        }
    );
    assert_eq!(store.nodes().len(), 4);
    assert_eq!(store.edges().len(), 4);
}

#[test]
fn test_reset() {
    let mut store = square_store();
    let old_id = store.document().id.clone();
    store.reset();
    assert_ne!(store.document().id, old_id);
    assert!(store.nodes().is_empty());
    assert!(store.edges().is_empty());
    assert!(!store.can_undo());
}

#[test]
fn test_meta_background_and_name() {
    let mut store = DocumentStore::new();
    store.set_meta(MetaUpdate {
        grid: Some(25.0),
        ..MetaUpdate::default()
    });
    assert_eq!(store.meta().grid, 25.0);
    assert_eq!(store.meta().px_per_meter, 100.0);

    store.set_name("Ground floor");
    assert_eq!(store.document().name, "Ground floor");
    store.set_background(None);
    assert!(store.document().background.is_none());
    assert!(!store.can_undo());
}

#[test]
fn test_mode_names() {
    assert_eq!(EditorMode::AddPower.to_string(), "add-power");
    assert_eq!(EditorMode::AddWire.as_str(), "add-wire");
}

#[test]
fn test_events_after_mutation() {
    let mut store = DocumentStore::new();
    let seen: Arc<Mutex<Vec<DocumentEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Structure]),
        move |event| sink.lock().unwrap().push(event.clone()),
    );

    store.add_node(node(DeviceKind::Light, "l", 0.0, 0.0));
    store.add_node(node(DeviceKind::Switch, "s", 0.0, 0.0));
    store.delete_node(&"l".into());
    store.set_mode(EditorMode::AddLight);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(
        seen[2],
        DocumentEvent::Structure(StructureEvent::NodeRemoved {
            id: "l".to_string(),
            edges_removed: 0
        })
    );
}
