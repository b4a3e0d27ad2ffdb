use floorwire_designer::model::{DeviceKind, WallSegment};
use floorwire_designer::snap::{snap_to_walls, SnapPolicy, SnapResolver};
use floorwire_designer::wall_index::WallIndex;
use floorwire_designer::Point;
use floorwire_settings::SnappingSettings;
use proptest::prelude::*;

fn room() -> WallIndex {
    WallIndex::build(&[WallSegment::new(
        "room",
        vec![
            Point::new(0.0, 0.0),
            Point::new(1000.0, 0.0),
            Point::new(1000.0, 800.0),
            Point::new(0.0, 800.0),
            Point::new(0.0, 0.0),
        ],
    )])
}

#[test]
fn test_snap_picks_nearest_segment() {
    let index = room();
    let snap = snap_to_walls(&index, 990.0, 400.0, 50.0).unwrap();
    assert_eq!(snap.position(), Point::new(1000.0, 400.0));
    assert_eq!(snap.segment_id, "room-1");
    assert!((snap.distance - 10.0).abs() < 1e-9);
    assert!((snap.rotation_degrees() - 90.0).abs() < 1e-9);
}

#[test]
fn test_snap_outside_tolerance() {
    let index = room();
    assert!(snap_to_walls(&index, 500.0, 400.0, 200.0).is_none());
    assert!(snap_to_walls(&WallIndex::default(), 0.0, 0.0, 500.0).is_none());
}

#[test]
fn test_snap_clamps_to_corner() {
    let index = WallIndex::build(&[WallSegment::new(
        "w",
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
    )]);
    let snap = snap_to_walls(&index, 110.0, 5.0, 20.0).unwrap();
    assert_eq!(snap.position(), Point::new(100.0, 0.0));
}

#[test]
fn test_degenerate_wall_piece() {
    let index = WallIndex::build(&[WallSegment::new(
        "dot",
        vec![Point::new(50.0, 50.0), Point::new(50.0, 50.0)],
    )]);
    let snap = snap_to_walls(&index, 53.0, 54.0, 10.0).unwrap();
    assert_eq!(snap.position(), Point::new(50.0, 50.0));
    assert!((snap.distance - 5.0).abs() < 1e-9);
}

#[test]
fn test_policy_for_kind() {
    assert_eq!(SnapPolicy::for_kind(DeviceKind::Power), SnapPolicy::WallMounted);
    assert_eq!(SnapPolicy::for_kind(DeviceKind::Switch), SnapPolicy::WallMounted);
    assert_eq!(SnapPolicy::for_kind(DeviceKind::Light), SnapPolicy::Soft);
}

#[test]
fn test_resolver_tiers() {
    let index = room();
    let resolver = SnapResolver::default();

    // 150 from the top wall: first tier.
    let near = resolver.resolve(&index, Point::new(400.0, 150.0), SnapPolicy::WallMounted);
    assert_eq!(near.position, Point::new(400.0, 0.0));

    // Room centre is 400 from every long wall: only the fallback reaches.
    let far = resolver.resolve(&index, Point::new(500.0, 400.0), SnapPolicy::WallMounted);
    assert!(far.is_snapped());
    assert!((far.snap.unwrap().distance - 400.0).abs() < 1e-9);

    // Lights only snap when very close.
    let light = resolver.resolve(&index, Point::new(400.0, 150.0), SnapPolicy::Soft);
    assert!(!light.is_snapped());
    assert_eq!(light.rotation, None);
    let light = resolver.resolve(&index, Point::new(400.0, 10.0), SnapPolicy::Soft);
    assert_eq!(light.position, Point::new(400.0, 0.0));
}

#[test]
fn test_resolver_custom_tiers() {
    let resolver = SnapResolver::new(SnappingSettings {
        wall_mounted_tolerance: 10.0,
        wall_mounted_fallback_tolerance: 20.0,
        ..SnappingSettings::default()
    });
    assert_eq!(resolver.tiers(SnapPolicy::WallMounted), vec![10.0, 20.0]);
    let far = resolver.resolve(&room(), Point::new(500.0, 400.0), SnapPolicy::WallMounted);
    assert!(!far.is_snapped());
    assert_eq!(far.position, Point::new(500.0, 400.0));
}

#[test]
fn test_near_wall_hint() {
    let index = room();
    let resolver = SnapResolver::default();
    assert!(resolver.near_wall(&index, Point::new(500.0, 149.0)));
    assert!(!resolver.near_wall(&index, Point::new(500.0, 151.0)));
}

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

proptest! {
    #[test]
    fn prop_snap_stays_on_segment(
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
        px in coord(), py in coord(),
    ) {
        let index = WallIndex::build(&[WallSegment::new(
            "w",
            vec![Point::new(x1, y1), Point::new(x2, y2)],
        )]);
        if let Some(snap) = snap_to_walls(&index, px, py, 5000.0) {
            let eps = 1e-6;
            prop_assert!(snap.x >= x1.min(x2) - eps && snap.x <= x1.max(x2) + eps);
            prop_assert!(snap.y >= y1.min(y2) - eps && snap.y <= y1.max(y2) + eps);
        }
    }

    #[test]
    fn prop_tolerance_monotonic(
        px in coord(), py in coord(),
        t1 in 1.0..800.0f64, extra in 0.001..800.0f64,
    ) {
        let index = room();
        if let Some(small) = snap_to_walls(&index, px, py, t1) {
            let large = snap_to_walls(&index, px, py, t1 + extra);
            prop_assert!(large.is_some());
            prop_assert!(large.unwrap().distance <= small.distance);
        }
    }
}
