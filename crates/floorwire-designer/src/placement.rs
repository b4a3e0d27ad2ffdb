//! Device placement with companion creation.
//!
//! Every light is created with a controlling switch and every switch with a
//! light it controls. The primary device, its companion and the edge
//! between them form a single batch.

use floorwire_settings::{Offset, PlacementSettings};

use crate::geometry::Point;
use crate::model::{Device, DeviceKind, DeviceNode, Edge, EdgeId, LightType, NodeId, SwitchType};
use crate::snap::{ResolvedPosition, SnapPolicy, SnapResolver};
use crate::store::BatchUpdate;
use crate::wall_index::WallIndex;

/// Ids produced by a placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub primary: NodeId,
    pub companion: Option<NodeId>,
    pub edge: Option<EdgeId>,
    /// Whether the primary device landed on a wall.
    pub snapped: bool,
}

/// A placement ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    pub placement: Placement,
    pub batch: BatchUpdate,
}

fn place_node(device: Device, resolved: &ResolvedPosition) -> DeviceNode {
    DeviceNode::new(device, resolved.position).with_rotation(resolved.rotation.unwrap_or(0.0))
}

fn shifted(point: Point, offset: Offset) -> Point {
    point.offset(offset.x, offset.y)
}

/// Plans placing a device of `kind` at `point`.
///
/// Power points and switches go through the wall-mounted tiers, lights
/// through the soft tier. With no wall in reach the device stays at the
/// clicked point.
pub fn plan_placement(
    walls: &WallIndex,
    resolver: &SnapResolver,
    settings: &PlacementSettings,
    kind: DeviceKind,
    point: Point,
) -> PlacementPlan {
    let resolved = resolver.resolve(walls, point, SnapPolicy::for_kind(kind));
    let primary = place_node(Device::of_kind(kind), &resolved);
    let primary_id = primary.id.clone();
    let mut batch = BatchUpdate::new().add_node(primary);

    let (companion, edge) = match kind {
        DeviceKind::Power => (None, None),
        DeviceKind::Light => {
            let at = shifted(resolved.position, settings.companion_switch_offset);
            let at = resolver.resolve(walls, at, SnapPolicy::WallMounted);
            let switch = place_node(Device::switch(SwitchType::OneGang), &at);
            let edge = Edge::new(primary_id.clone(), switch.id.clone());
            (Some(switch), Some(edge))
        }
        DeviceKind::Switch => {
            let at = shifted(resolved.position, settings.companion_light_offset);
            let light = DeviceNode::new(Device::light(LightType::Ceiling), at);
            let edge = Edge::new(primary_id.clone(), light.id.clone());
            (Some(light), Some(edge))
        }
    };

    let companion_id = companion.as_ref().map(|n| n.id.clone());
    let edge_id = edge.as_ref().map(|e| e.id.clone());
    if let Some(node) = companion {
        batch = batch.add_node(node);
    }
    if let Some(edge) = edge {
        batch = batch.add_edge(edge);
    }

    PlacementPlan {
        placement: Placement {
            primary: primary_id,
            companion: companion_id,
            edge: edge_id,
            snapped: resolved.is_snapped(),
        },
        batch,
    }
}
