//! Drag gesture state and per-move position resolution.
//!
//! A gesture is `begin -> move* -> end`. Each move is resolved against the
//! document as it stands at that moment, so a later move always supersedes
//! the preview of an earlier one.

use floorwire_settings::{CombinationSettings, SnappingSettings};

use crate::combination::find_nearby;
use crate::geometry::Point;
use crate::model::{DeviceKind, DeviceNode, Document, NodeId};
use crate::snap::{SnapPolicy, SnapResolver, SnapResult};
use crate::wall_index::WallIndex;

/// Horizontal and vertical guide lines shown while aligning lights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentGuides {
    /// Vertical line at this x.
    pub x: Option<f64>,
    /// Horizontal line at this y.
    pub y: Option<f64>,
}

impl AlignmentGuides {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Where a move put the dragged node and why.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFeedback {
    pub node: NodeId,
    pub position: Point,
    /// Degrees.
    pub rotation: f64,
    /// Light the switch is hovering on; releasing here meshes into it.
    pub previewed_light: Option<NodeId>,
    pub wall_snap: Option<SnapResult>,
    pub guides: AlignmentGuides,
}

/// How a gesture finished.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// New position recorded as one history entry.
    Moved { node: NodeId },
    /// The node ended where it started.
    Unchanged { node: NodeId },
    /// The switch was folded into a light.
    Meshed {
        switch: NodeId,
        light: NodeId,
        relinked: Vec<NodeId>,
    },
    /// Two switches were replaced by one multi-gang switch.
    Combined {
        new_switch: NodeId,
        removed: [NodeId; 2],
        gangs: usize,
    },
    /// No gesture in progress, or the node vanished mid-gesture.
    Aborted,
}

/// An in-progress drag of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    node_id: NodeId,
    kind: DeviceKind,
    origin: Point,
    origin_rotation: f64,
    previewed_light: Option<NodeId>,
    moves: usize,
}

impl DragSession {
    pub fn new(node: &DeviceNode) -> Self {
        Self {
            node_id: node.id.clone(),
            kind: node.kind(),
            origin: node.position,
            origin_rotation: node.rotation,
            previewed_light: None,
            moves: 0,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Position and rotation at pointer-down.
    pub fn origin(&self) -> (Point, f64) {
        (self.origin, self.origin_rotation)
    }

    pub fn previewed_light(&self) -> Option<&NodeId> {
        self.previewed_light.as_ref()
    }

    /// Number of moves processed so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub(crate) fn record_move(&mut self, feedback: &DragFeedback) {
        self.moves += 1;
        self.previewed_light = feedback.previewed_light.clone();
    }
}

/// Resolves the dragged node's position for a pointer at `pointer`.
pub fn resolve_move(
    doc: &Document,
    walls: &WallIndex,
    resolver: &SnapResolver,
    combination: &CombinationSettings,
    node: &DeviceNode,
    pointer: Point,
) -> DragFeedback {
    let mut feedback = DragFeedback {
        node: node.id.clone(),
        position: pointer,
        rotation: node.rotation,
        previewed_light: None,
        wall_snap: None,
        guides: AlignmentGuides::default(),
    };

    match node.kind() {
        DeviceKind::Switch => {
            let hovered = find_nearby(
                doc,
                &node.id,
                DeviceKind::Light,
                pointer,
                combination.light_proximity,
            );
            if let Some(light) = hovered {
                feedback.position = light.position;
                feedback.rotation = 0.0;
                feedback.previewed_light = Some(light.id.clone());
            } else {
                apply_wall_snap(&mut feedback, walls, resolver, SnapPolicy::WallMounted);
            }
        }
        DeviceKind::Power => {
            apply_wall_snap(&mut feedback, walls, resolver, SnapPolicy::WallMounted);
        }
        DeviceKind::Light => {
            let (aligned, guides) = align_to_lights(doc, node, pointer, resolver.settings());
            feedback.position = aligned;
            feedback.guides = guides;
            apply_wall_snap(&mut feedback, walls, resolver, SnapPolicy::Soft);
        }
    }

    feedback
}

fn apply_wall_snap(
    feedback: &mut DragFeedback,
    walls: &WallIndex,
    resolver: &SnapResolver,
    policy: SnapPolicy,
) {
    if let Some(snap) = resolver.snap(walls, feedback.position, policy) {
        feedback.position = snap.position();
        feedback.rotation = snap.rotation_degrees();
        feedback.wall_snap = Some(snap);
    }
}

/// Pulls `pointer` onto the row or column of other lights.
///
/// Each axis is compared against the raw pointer independently; when
/// several lights qualify the last one in document order wins.
fn align_to_lights(
    doc: &Document,
    node: &DeviceNode,
    pointer: Point,
    settings: &SnappingSettings,
) -> (Point, AlignmentGuides) {
    let threshold = settings.alignment_threshold;
    let mut aligned = pointer;
    let mut guides = AlignmentGuides::default();

    for other in doc.nodes.iter().filter(|n| n.is_light() && n.id != node.id) {
        if (pointer.y - other.position.y).abs() < threshold {
            aligned.y = other.position.y;
            guides.y = Some(other.position.y);
        }
        if (pointer.x - other.position.x).abs() < threshold {
            aligned.x = other.position.x;
            guides.x = Some(other.position.x);
        }
    }

    (aligned, guides)
}
