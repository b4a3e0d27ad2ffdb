//! Wall snapping.
//!
//! `snap_to_walls` is the single-tolerance primitive. `SnapResolver` layers
//! the tier policy on top of it: wall-mounted devices try a primary and a
//! fallback tolerance, lights get one tight soft-snap tolerance.

use floorwire_settings::SnappingSettings;

use crate::geometry::{rad_to_deg, Point};
use crate::model::DeviceKind;
use crate::spatial_index::Bounds;
use crate::wall_index::WallIndex;

/// Closest wall point found for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    /// Direction of the wall segment, radians.
    pub angle: f64,
    pub segment_id: String,
    pub distance: f64,
}

impl SnapResult {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Device rotation implied by the wall direction.
    pub fn rotation_degrees(&self) -> f64 {
        rad_to_deg(self.angle)
    }
}

/// Finds the nearest wall point strictly closer than `tolerance`.
///
/// Projections are clamped to segment endpoints, so the result always lies
/// on an actual wall piece.
pub fn snap_to_walls(index: &WallIndex, x: f64, y: f64, tolerance: f64) -> Option<SnapResult> {
    if tolerance.is_nan() || tolerance <= 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let query = Point::new(x, y);
    let mut best: Option<SnapResult> = None;
    let mut min_distance = tolerance;

    for item in index.query(&Bounds::around(x, y, tolerance)) {
        let projected = item.segment.project(&query);
        let distance = query.distance_to(&projected);
        if distance < min_distance {
            min_distance = distance;
            best = Some(SnapResult {
                x: projected.x,
                y: projected.y,
                angle: item.segment.angle(),
                segment_id: item.id.clone(),
                distance,
            });
        }
    }

    best
}

/// How strongly a device is pulled towards walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPolicy {
    /// Primary tier, then fallback tier.
    WallMounted,
    /// Single tight tier; missing it leaves the point as is.
    Soft,
}

impl SnapPolicy {
    pub fn for_kind(kind: DeviceKind) -> Self {
        if kind.is_wall_mounted() {
            Self::WallMounted
        } else {
            Self::Soft
        }
    }
}

/// Outcome of resolving a point under a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPosition {
    pub position: Point,
    /// Degrees; `None` when no wall was found.
    pub rotation: Option<f64>,
    pub snap: Option<SnapResult>,
}

impl ResolvedPosition {
    fn unsnapped(position: Point) -> Self {
        Self {
            position,
            rotation: None,
            snap: None,
        }
    }

    fn snapped(snap: SnapResult) -> Self {
        Self {
            position: snap.position(),
            rotation: Some(snap.rotation_degrees()),
            snap: Some(snap),
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snap.is_some()
    }
}

/// Tiered snap policy shared by placement, dragging and companions.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResolver {
    settings: SnappingSettings,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new(SnappingSettings::default())
    }
}

impl SnapResolver {
    pub fn new(settings: SnappingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SnappingSettings {
        &self.settings
    }

    /// Tolerances tried in order for a policy.
    pub fn tiers(&self, policy: SnapPolicy) -> Vec<f64> {
        match policy {
            SnapPolicy::WallMounted => vec![
                self.settings.wall_mounted_tolerance,
                self.settings.wall_mounted_fallback_tolerance,
            ],
            SnapPolicy::Soft => vec![self.settings.light_tolerance],
        }
    }

    /// First tier that finds a wall wins.
    pub fn snap(&self, index: &WallIndex, point: Point, policy: SnapPolicy) -> Option<SnapResult> {
        for (tier, tolerance) in self.tiers(policy).into_iter().enumerate() {
            if let Some(snap) = snap_to_walls(index, point.x, point.y, tolerance) {
                if tier > 0 {
                    tracing::debug!(
                        "Snapped ({:.1}, {:.1}) on fallback tier {} to {}",
                        point.x,
                        point.y,
                        tolerance,
                        snap.segment_id
                    );
                }
                return Some(snap);
            }
        }
        if policy == SnapPolicy::WallMounted && !index.is_empty() {
            tracing::debug!(
                "No wall within reach of ({:.1}, {:.1}); leaving unsnapped",
                point.x,
                point.y
            );
        }
        None
    }

    /// Snapped position when a wall is in reach, otherwise the input point.
    pub fn resolve(&self, index: &WallIndex, point: Point, policy: SnapPolicy) -> ResolvedPosition {
        match self.snap(index, point, policy) {
            Some(snap) => ResolvedPosition::snapped(snap),
            None => ResolvedPosition::unsnapped(point),
        }
    }

    /// Whether a wall lies within the hint radius of `point`.
    pub fn near_wall(&self, index: &WallIndex, point: Point) -> bool {
        snap_to_walls(index, point.x, point.y, self.settings.wall_hint_tolerance).is_some()
    }
}
