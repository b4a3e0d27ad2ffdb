//! Combination protocol evaluated when a switch is released.
//!
//! Planning is pure: the functions here inspect a document and return the
//! batch that would perform the transition. Applying it is up to the caller,
//! which keeps the whole transition one store operation and one undo step.

use floorwire_settings::CombinationSettings;
use smallvec::SmallVec;

use crate::geometry::Point;
use crate::model::{Device, DeviceKind, DeviceNode, Document, Edge, NodeId, SwitchType};
use crate::store::BatchUpdate;

/// Lights wired to one switch. Most switches control one to four.
pub type LightSet = SmallVec<[NodeId; 4]>;

/// Lights joined to `node` by an edge in either direction, in edge order,
/// without duplicates.
pub fn connected_lights(doc: &Document, node: &NodeId) -> LightSet {
    let mut lights = LightSet::new();
    for edge in doc.edges_of(node) {
        let Some(other) = edge.other_end(node) else {
            continue;
        };
        let is_light = doc.node(other).is_some_and(DeviceNode::is_light);
        if is_light && !lights.contains(other) {
            lights.push(other.clone());
        }
    }
    lights
}

/// First node of `kind` (document order) other than `exclude` whose
/// position lies strictly inside the square of half-width `half_width`
/// around `point`.
pub fn find_nearby<'a>(
    doc: &'a Document,
    exclude: &NodeId,
    kind: DeviceKind,
    point: Point,
    half_width: f64,
) -> Option<&'a DeviceNode> {
    doc.nodes.iter().find(|n| {
        &n.id != exclude && n.kind() == kind && n.position.within_box(&point, half_width)
    })
}

/// A switch folded into an adjacent light.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPlan {
    pub switch: NodeId,
    /// The light the switch was dropped on.
    pub light: NodeId,
    /// Lights that gain a direct edge to `light`.
    pub relinked: Vec<NodeId>,
    pub batch: BatchUpdate,
}

/// Plans the switch-to-light mesh for a switch at its current position.
///
/// Every light the switch controlled, other than the target light, gets a
/// direct edge to the target unless the two are already joined. The switch
/// itself is deleted, taking its edges with it.
pub fn plan_mesh(doc: &Document, switch_id: &NodeId, proximity: f64) -> Option<MeshPlan> {
    let switch = doc.node(switch_id).filter(|n| n.is_switch())?;
    let target = find_nearby(doc, switch_id, DeviceKind::Light, switch.position, proximity)?;

    let mut batch = BatchUpdate::new();
    let mut relinked = Vec::new();
    for light in connected_lights(doc, switch_id) {
        if light == target.id {
            continue;
        }
        if doc.edges.iter().any(|e| e.joins(&light, &target.id)) {
            continue;
        }
        batch
            .edges_to_add
            .push(Edge::new(light.clone(), target.id.clone()));
        relinked.push(light);
    }
    batch.nodes_to_delete.push(switch_id.clone());

    Some(MeshPlan {
        switch: switch_id.clone(),
        light: target.id.clone(),
        relinked,
        batch,
    })
}

/// Two switches merged into one multi-gang switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinePlan {
    /// The dragged switch and the one it was dropped on.
    pub switches: [NodeId; 2],
    pub new_switch: NodeId,
    pub gangs: usize,
    pub lights: LightSet,
    pub batch: BatchUpdate,
}

/// Label carried by a combined switch.
pub fn gang_label(gangs: usize) -> String {
    format!("{} Gang Switch", gangs)
}

/// Plans the switch-to-switch combination for a switch at its current
/// position.
///
/// Returns `None` when no switch is close enough or when the number of
/// distinct lights across both switches falls outside the allowed gang
/// range.
pub fn plan_combine(
    doc: &Document,
    switch_id: &NodeId,
    settings: &CombinationSettings,
) -> Option<CombinePlan> {
    let switch = doc.node(switch_id).filter(|n| n.is_switch())?;
    let other = find_nearby(
        doc,
        switch_id,
        DeviceKind::Switch,
        switch.position,
        settings.switch_proximity,
    )?;

    let mut lights = connected_lights(doc, switch_id);
    for light in connected_lights(doc, &other.id) {
        if !lights.contains(&light) {
            lights.push(light);
        }
    }

    let gangs = lights.len();
    if gangs < settings.min_gangs || gangs > settings.max_gangs {
        tracing::debug!(
            "Not combining {} and {}: {} lights outside {}..={}",
            switch_id,
            other.id,
            gangs,
            settings.min_gangs,
            settings.max_gangs
        );
        return None;
    }
    let switch_type = SwitchType::for_gangs(gangs)?;

    let combined = DeviceNode::new(
        Device::switch(switch_type),
        switch.position.midpoint(&other.position),
    )
    .with_label(gang_label(gangs));
    let new_switch = combined.id.clone();

    let mut batch = BatchUpdate::new()
        .add_node(combined)
        .delete_node(switch_id.clone())
        .delete_node(other.id.clone());
    for light in &lights {
        batch
            .edges_to_add
            .push(Edge::new(light.clone(), new_switch.clone()));
    }

    Some(CombinePlan {
        switches: [switch_id.clone(), other.id.clone()],
        new_switch,
        gangs,
        lights,
        batch,
    })
}
