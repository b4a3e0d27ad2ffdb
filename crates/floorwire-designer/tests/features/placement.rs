use floorwire_designer::model::{
    Device, DeviceKind, LightType, SwitchType, WallSegment,
};
use floorwire_designer::{FloorplanEditor, Point};
use floorwire_settings::Config;

fn wall_along_x() -> Vec<WallSegment> {
    vec![WallSegment::new(
        "w",
        vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)],
    )]
}

#[test]
fn test_place_light_creates_companion_switch() {
    let mut editor = FloorplanEditor::new();
    let placed = editor.place_device(DeviceKind::Light, 100.0, 100.0).unwrap();
    let store = editor.store();

    assert_eq!(store.nodes().len(), 2);
    assert_eq!(store.edges().len(), 1);

    let light = store.node(&placed.primary).unwrap();
    assert_eq!(light.kind(), DeviceKind::Light);
    assert_eq!(light.position, Point::new(100.0, 100.0));
    assert!(light.data.is_empty());

    let switch = store.node(placed.companion.as_ref().unwrap()).unwrap();
    assert_eq!(switch.device, Device::switch(SwitchType::OneGang));
    assert_eq!(switch.position, Point::new(200.0, 100.0));

    let edge = store.edge(placed.edge.as_ref().unwrap()).unwrap();
    assert_eq!(edge.source, light.id);
    assert_eq!(edge.target, switch.id);

    assert_eq!(store.selected_node_id(), Some(&placed.primary));
    assert!(!placed.snapped);
}

#[test]
fn test_place_switch_creates_companion_light() {
    let mut editor = FloorplanEditor::new();
    let placed = editor.place_device(DeviceKind::Switch, 300.0, 300.0).unwrap();
    let store = editor.store();

    let light = store.node(placed.companion.as_ref().unwrap()).unwrap();
    assert_eq!(light.device, Device::light(LightType::Ceiling));
    assert_eq!(light.position, Point::new(200.0, 250.0));
    assert_eq!(light.rotation, 0.0);

    let edge = store.edge(placed.edge.as_ref().unwrap()).unwrap();
    assert_eq!(edge.source, placed.primary);
    assert_eq!(edge.target, light.id);
}

#[test]
fn test_place_power_has_no_companion() {
    let mut editor = FloorplanEditor::new();
    let placed = editor.place_device(DeviceKind::Power, 5.0, 5.0).unwrap();
    assert!(placed.companion.is_none());
    assert!(placed.edge.is_none());
    assert_eq!(editor.store().nodes().len(), 1);
}

#[test]
fn test_placement_is_one_undo_step() {
    let mut editor = FloorplanEditor::new();
    editor.place_device(DeviceKind::Light, 100.0, 100.0).unwrap();
    assert!(editor.undo());
    assert!(editor.store().nodes().is_empty());
    assert!(editor.store().edges().is_empty());
    assert!(!editor.undo());
    assert!(editor.redo());
    assert_eq!(editor.store().nodes().len(), 2);
}

#[test]
fn test_power_snaps_to_wall() {
    let mut editor = FloorplanEditor::new();
    editor.store_mut().set_walls(wall_along_x());

    let placed = editor.place_device(DeviceKind::Power, 400.0, 180.0).unwrap();
    assert!(placed.snapped);
    let power = editor.store().node(&placed.primary).unwrap();
    assert_eq!(power.position, Point::new(400.0, 0.0));
    assert_eq!(power.rotation, 0.0);

    // Beyond the first tier, within the fallback.
    let placed = editor.place_device(DeviceKind::Power, 400.0, 450.0).unwrap();
    assert!(placed.snapped);

    // Out of reach of every tier.
    let placed = editor.place_device(DeviceKind::Power, 400.0, 600.0).unwrap();
    assert!(!placed.snapped);
    let power = editor.store().node(&placed.primary).unwrap();
    assert_eq!(power.position, Point::new(400.0, 600.0));
}

#[test]
fn test_companion_switch_snaps_to_wall() {
    let mut editor = FloorplanEditor::new();
    editor.store_mut().set_walls(vec![WallSegment::new(
        "vertical",
        vec![Point::new(250.0, 0.0), Point::new(250.0, 1000.0)],
    )]);

    let placed = editor.place_device(DeviceKind::Light, 100.0, 100.0).unwrap();
    let light = editor.store().node(&placed.primary).unwrap();
    assert_eq!(light.position, Point::new(100.0, 100.0));

    let switch = editor.store().node(placed.companion.as_ref().unwrap()).unwrap();
    assert_eq!(switch.position, Point::new(250.0, 100.0));
    assert!((switch.rotation - 90.0).abs() < 1e-9);
}

#[test]
fn test_light_soft_snap() {
    let mut editor = FloorplanEditor::new();
    editor.store_mut().set_walls(wall_along_x());

    let near = editor.place_device(DeviceKind::Light, 100.0, 10.0).unwrap();
    assert!(near.snapped);
    assert_eq!(
        editor.store().node(&near.primary).unwrap().position,
        Point::new(100.0, 0.0)
    );

    let far = editor.place_device(DeviceKind::Light, 600.0, 40.0).unwrap();
    assert!(!far.snapped);
}

#[test]
fn test_wall_index_follows_wall_changes() {
    let mut editor = FloorplanEditor::new();
    assert!(!editor.wall_hint(100.0, 100.0));

    editor.store_mut().set_walls(wall_along_x());
    assert!(editor.wall_hint(100.0, 100.0));
    assert_eq!(editor.wall_index().len(), 1);

    editor.store_mut().set_walls(Vec::new());
    assert!(!editor.wall_hint(100.0, 100.0));
}

#[test]
fn test_import_svg_then_place() {
    let mut editor = FloorplanEditor::new();
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="400" height="300"/></svg>"#;
    assert_eq!(editor.import_svg_walls(svg, 1.0).unwrap(), 1);

    let placed = editor.place_device(DeviceKind::Switch, 390.0, 150.0).unwrap();
    let switch = editor.store().node(&placed.primary).unwrap();
    assert_eq!(switch.position, Point::new(400.0, 150.0));
}

#[test]
fn test_non_finite_placement_is_ignored() {
    let mut editor = FloorplanEditor::new();
    assert!(editor.place_device(DeviceKind::Power, f64::NAN, 0.0).is_none());
    assert!(editor.store().nodes().is_empty());
}

#[test]
fn test_custom_companion_offset() {
    let mut config = Config::default();
    config.placement.companion_switch_offset.x = 40.0;
    let mut editor = FloorplanEditor::with_config(config).unwrap();
    let placed = editor.place_device(DeviceKind::Light, 0.0, 0.0).unwrap();
    let switch = editor.store().node(placed.companion.as_ref().unwrap()).unwrap();
    assert_eq!(switch.position, Point::new(40.0, 0.0));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.snapping.wall_mounted_tolerance = -1.0;
    assert!(FloorplanEditor::with_config(config).is_err());
}

#[test]
fn test_delete_selected() {
    let mut editor = FloorplanEditor::new();
    editor.place_device(DeviceKind::Light, 0.0, 0.0).unwrap();
    assert!(editor.delete_selected());
    assert_eq!(editor.store().nodes().len(), 1);
    assert!(editor.store().edges().is_empty());
    assert!(!editor.delete_selected());
}
