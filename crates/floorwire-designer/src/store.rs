//! Document store: owns the floorplan document and every mutation on it.
//!
//! Structural mutations (nodes and edges) each record exactly one history
//! snapshot and publish exactly one event after the change is complete.
//! Walls, background, metadata, selection, mode and viewport are outside
//! history. Operations on ids that no longer exist are quiet no-ops.

use std::collections::{HashMap, HashSet};
use std::fmt;

use floorwire_core::{
    DocumentError, DocumentEvent, EventBus, HistoryEvent, ProjectEvent, SelectionEvent,
    StructureEvent, ViewEvent,
};
use floorwire_settings::Config;
use tracing::{debug, info, warn};

use crate::geometry::Point;
use crate::history::HistoryManager;
use crate::model::{
    Background, Device, DeviceNode, Document, Edge, EdgeData, EdgeId, Meta, MetaUpdate, NodeData,
    NodeId, WallSegment,
};
use crate::serialization;
use crate::viewport::Viewport;

/// The undoable part of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub nodes: Vec<DeviceNode>,
    pub edges: Vec<Edge>,
}

/// What a pointer click on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    #[default]
    Select,
    AddPower,
    AddLight,
    AddSwitch,
    AddWire,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::AddPower => "add-power",
            Self::AddLight => "add-light",
            Self::AddSwitch => "add-switch",
            Self::AddWire => "add-wire",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial node change; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub position: Option<Point>,
    pub rotation: Option<f64>,
    /// Subtype change; must keep the node's kind.
    pub device: Option<Device>,
    /// Replaces the shared properties wholesale.
    pub data: Option<NodeData>,
}

impl NodeUpdate {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Several structural changes applied as one transition.
///
/// Applied in order: add nodes, delete nodes (cascading to their edges),
/// add edges, delete edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchUpdate {
    pub nodes_to_add: Vec<DeviceNode>,
    pub nodes_to_delete: Vec<NodeId>,
    pub edges_to_add: Vec<Edge>,
    pub edges_to_delete: Vec<EdgeId>,
}

impl BatchUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(mut self, node: DeviceNode) -> Self {
        self.nodes_to_add.push(node);
        self
    }

    pub fn delete_node(mut self, id: NodeId) -> Self {
        self.nodes_to_delete.push(id);
        self
    }

    pub fn add_edge(mut self, edge: Edge) -> Self {
        self.edges_to_add.push(edge);
        self
    }

    pub fn delete_edge(mut self, id: EdgeId) -> Self {
        self.edges_to_delete.push(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_to_add.is_empty()
            && self.nodes_to_delete.is_empty()
            && self.edges_to_add.is_empty()
            && self.edges_to_delete.is_empty()
    }
}

/// What a batch actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub nodes_added: Vec<NodeId>,
    pub nodes_removed: Vec<NodeId>,
    pub edges_added: Vec<EdgeId>,
    /// Explicit deletions plus edges cascaded from removed nodes.
    pub edges_removed: Vec<EdgeId>,
}

impl BatchOutcome {
    pub fn is_noop(&self) -> bool {
        self.nodes_added.is_empty()
            && self.nodes_removed.is_empty()
            && self.edges_added.is_empty()
            && self.edges_removed.is_empty()
    }
}

/// Owner of the canonical editor state.
#[derive(Debug)]
pub struct DocumentStore {
    doc: Document,
    selected_node: Option<NodeId>,
    selected_edge: Option<EdgeId>,
    mode: EditorMode,
    viewport: Viewport,
    viewport_template: Viewport,
    history: HistoryManager<Snapshot>,
    walls_revision: u64,
    events: EventBus,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Empty document with default settings.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Empty document using the history depth and zoom limits of `config`.
    pub fn with_config(config: &Config) -> Self {
        let doc = Document::new();
        let baseline = Snapshot {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let viewport = Viewport::new(&config.viewport);
        Self {
            doc,
            selected_node: None,
            selected_edge: None,
            mode: EditorMode::Select,
            viewport_template: viewport.clone(),
            viewport,
            history: HistoryManager::new(config.history.max_depth, baseline),
            walls_revision: 0,
            events: EventBus::new(),
        }
    }

    // ---- read access ----

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn nodes(&self) -> &[DeviceNode] {
        &self.doc.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.doc.edges
    }

    pub fn walls(&self) -> &[WallSegment] {
        &self.doc.walls
    }

    pub fn node(&self, id: &NodeId) -> Option<&DeviceNode> {
        self.doc.node(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.doc.edge(id)
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.selected_node.as_ref()
    }

    pub fn selected_edge_id(&self) -> Option<&EdgeId> {
        self.selected_edge.as_ref()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Bumped on every wall replacement; used to memoize the wall index.
    pub fn walls_revision(&self) -> u64 {
        self.walls_revision
    }

    /// Change notifications for this store.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.doc.nodes.clone(),
            edges: self.doc.edges.clone(),
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    fn publish(&self, event: DocumentEvent) {
        self.events.publish(event);
    }

    /// Unique node id, replacing a colliding one.
    fn claim_node_id(&self, node: &mut DeviceNode) {
        if self.doc.contains_node(&node.id) {
            let fresh = NodeId::generate();
            warn!("Node id {} already in use; assigning {}", node.id, fresh);
            node.id = fresh;
        }
    }

    fn claim_edge_id(&self, edge: &mut Edge) {
        if self.doc.edge(&edge.id).is_some() {
            let fresh = EdgeId::generate();
            warn!("Edge id {} already in use; assigning {}", edge.id, fresh);
            edge.id = fresh;
        }
    }

    /// Clears selection entries that point at vanished entities.
    fn prune_selection(&mut self) {
        if let Some(id) = &self.selected_node {
            if !self.doc.contains_node(id) {
                self.selected_node = None;
            }
        }
        if let Some(id) = &self.selected_edge {
            if self.doc.edge(id).is_none() {
                self.selected_edge = None;
            }
        }
    }

    // ---- nodes ----

    /// Appends a node, selects it and returns its id.
    pub fn add_node(&mut self, mut node: DeviceNode) -> NodeId {
        self.claim_node_id(&mut node);
        let id = node.id.clone();
        debug!("Adding {} node {}", node.kind(), id);
        self.doc.nodes.push(node);
        self.selected_node = Some(id.clone());
        self.selected_edge = None;
        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::NodeAdded {
            id: id.to_string(),
        }));
        id
    }

    /// Applies a partial update. Returns false for a missing node or a
    /// subtype of a different kind.
    pub fn update_node(&mut self, id: &NodeId, update: NodeUpdate) -> bool {
        let Some(node) = self.doc.node_mut(id) else {
            debug!("Ignoring update of missing node {}", id);
            return false;
        };
        if let Some(device) = &update.device {
            if device.kind() != node.kind() {
                warn!(
                    "Rejected {} subtype on {} node {}",
                    device.kind(),
                    node.kind(),
                    id
                );
                return false;
            }
        }
        if update.position.is_some_and(|p| !p.is_finite())
            || update.rotation.is_some_and(|r| !r.is_finite())
        {
            warn!("Rejected non-finite transform for node {}", id);
            return false;
        }

        if let Some(position) = update.position {
            node.position = position;
        }
        if let Some(rotation) = update.rotation {
            node.rotation = rotation;
        }
        if let Some(device) = update.device {
            node.device = device;
        }
        if let Some(data) = update.data {
            node.data = data;
        }

        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::NodeUpdated {
            id: id.to_string(),
        }));
        true
    }

    /// Removes a node and every edge touching it.
    pub fn delete_node(&mut self, id: &NodeId) -> bool {
        let before = self.doc.nodes.len();
        self.doc.nodes.retain(|n| &n.id != id);
        if self.doc.nodes.len() == before {
            debug!("Ignoring delete of missing node {}", id);
            return false;
        }

        let edges_before = self.doc.edges.len();
        self.doc.edges.retain(|e| !e.touches(id));
        let edges_removed = edges_before - self.doc.edges.len();

        self.prune_selection();
        self.record();
        debug!("Deleted node {} and {} edges", id, edges_removed);
        self.publish(DocumentEvent::Structure(StructureEvent::NodeRemoved {
            id: id.to_string(),
            edges_removed,
        }));
        true
    }

    /// Moves a node without recording history.
    ///
    /// Used for drag previews; follow with [`DocumentStore::commit`].
    pub fn preview_node_transform(
        &mut self,
        id: &NodeId,
        position: Point,
        rotation: Option<f64>,
    ) -> bool {
        if !position.is_finite() || rotation.is_some_and(|r| !r.is_finite()) {
            return false;
        }
        let Some(node) = self.doc.node_mut(id) else {
            return false;
        };
        node.position = position;
        if let Some(rotation) = rotation {
            node.rotation = rotation;
        }
        self.publish(DocumentEvent::Structure(StructureEvent::NodeMoved {
            id: id.to_string(),
            x: position.x,
            y: position.y,
        }));
        true
    }

    /// Records the current state if it differs from the current history
    /// entry. Returns whether an entry was added.
    pub fn commit(&mut self) -> bool {
        let snapshot = self.snapshot();
        if self.history.current() == Some(&snapshot) {
            return false;
        }
        self.history.record(snapshot);
        self.publish(DocumentEvent::History(HistoryEvent::Committed {
            index: self.history.index(),
            len: self.history.len(),
        }));
        true
    }

    // ---- edges ----

    /// Appends an edge between two existing, distinct nodes and selects it.
    pub fn add_edge(&mut self, mut edge: Edge) -> Option<EdgeId> {
        if edge.source == edge.target {
            debug!("Ignoring self-loop edge on {}", edge.source);
            return None;
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.doc.contains_node(endpoint) {
                debug!("Ignoring edge to missing node {}", endpoint);
                return None;
            }
        }

        self.claim_edge_id(&mut edge);
        let id = edge.id.clone();
        self.doc.edges.push(edge);
        self.selected_edge = Some(id.clone());
        self.selected_node = None;
        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::EdgeAdded {
            id: id.to_string(),
        }));
        Some(id)
    }

    /// Replaces an edge's presentation data.
    pub fn update_edge(&mut self, id: &EdgeId, data: EdgeData) -> bool {
        let Some(edge) = self.doc.edge_mut(id) else {
            debug!("Ignoring update of missing edge {}", id);
            return false;
        };
        edge.data = data;
        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::EdgeUpdated {
            id: id.to_string(),
        }));
        true
    }

    pub fn delete_edge(&mut self, id: &EdgeId) -> bool {
        let before = self.doc.edges.len();
        self.doc.edges.retain(|e| &e.id != id);
        if self.doc.edges.len() == before {
            debug!("Ignoring delete of missing edge {}", id);
            return false;
        }
        self.prune_selection();
        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::EdgeRemoved {
            id: id.to_string(),
        }));
        true
    }

    // ---- batch ----

    /// Applies all four change lists as one transition with one history
    /// entry. Nothing is recorded when no change took effect.
    pub fn batch_update(&mut self, batch: BatchUpdate) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        if batch.is_empty() {
            return outcome;
        }

        // Edges of this batch follow their nodes through id reassignment.
        let mut renamed: HashMap<NodeId, NodeId> = HashMap::new();
        for mut node in batch.nodes_to_add {
            let requested = node.id.clone();
            self.claim_node_id(&mut node);
            if node.id != requested {
                renamed.insert(requested, node.id.clone());
            }
            outcome.nodes_added.push(node.id.clone());
            self.doc.nodes.push(node);
        }

        let doomed: HashSet<&NodeId> = batch.nodes_to_delete.iter().collect();
        if !doomed.is_empty() {
            self.doc.nodes.retain(|n| {
                if doomed.contains(&n.id) {
                    outcome.nodes_removed.push(n.id.clone());
                    false
                } else {
                    true
                }
            });
            self.doc.edges.retain(|e| {
                if doomed.contains(&e.source) || doomed.contains(&e.target) {
                    outcome.edges_removed.push(e.id.clone());
                    false
                } else {
                    true
                }
            });
        }

        for mut edge in batch.edges_to_add {
            if let Some(id) = renamed.get(&edge.source) {
                edge.source = id.clone();
            }
            if let Some(id) = renamed.get(&edge.target) {
                edge.target = id.clone();
            }
            if edge.source == edge.target
                || !self.doc.contains_node(&edge.source)
                || !self.doc.contains_node(&edge.target)
            {
                warn!(
                    "Skipping batch edge {} -> {}: endpoint missing",
                    edge.source, edge.target
                );
                continue;
            }
            self.claim_edge_id(&mut edge);
            outcome.edges_added.push(edge.id.clone());
            self.doc.edges.push(edge);
        }

        let cut: HashSet<&EdgeId> = batch.edges_to_delete.iter().collect();
        if !cut.is_empty() {
            let fresh: HashSet<EdgeId> = outcome.edges_added.iter().cloned().collect();
            self.doc.edges.retain(|e| {
                if !cut.contains(&e.id) {
                    return true;
                }
                // An edge both added and cut by this batch never existed.
                if !fresh.contains(&e.id) {
                    outcome.edges_removed.push(e.id.clone());
                }
                false
            });
            outcome.edges_added.retain(|id| !cut.contains(id));
        }

        if outcome.is_noop() {
            debug!("Batch update changed nothing");
            return outcome;
        }

        self.prune_selection();
        self.record();
        self.publish(DocumentEvent::Structure(StructureEvent::BatchApplied {
            nodes_added: outcome.nodes_added.len(),
            nodes_removed: outcome.nodes_removed.len(),
            edges_added: outcome.edges_added.len(),
            edges_removed: outcome.edges_removed.len(),
        }));
        outcome
    }

    // ---- history ----

    /// Restores the previous snapshot of nodes and edges.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.publish(DocumentEvent::History(HistoryEvent::Undone {
            index: self.history.index(),
        }));
        true
    }

    /// Re-applies the next snapshot of nodes and edges.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.publish(DocumentEvent::History(HistoryEvent::Redone {
            index: self.history.index(),
        }));
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.doc.nodes = snapshot.nodes;
        self.doc.edges = snapshot.edges;
        self.prune_selection();
    }

    // ---- project ----

    /// Replaces the whole document after validating it.
    ///
    /// Selection, mode and viewport return to their defaults and history
    /// restarts from the loaded state. Nothing changes on error.
    pub fn load_project(&mut self, doc: Document) -> Result<(), DocumentError> {
        serialization::validate(&doc)?;
        info!(
            "Loaded project {} ({} nodes, {} edges, {} walls)",
            doc.name,
            doc.nodes.len(),
            doc.edges.len(),
            doc.walls.len()
        );
        let event = ProjectEvent::Loaded {
            id: doc.id.clone(),
            name: doc.name.clone(),
        };
        self.replace_document(doc);
        self.publish(DocumentEvent::Project(event));
        Ok(())
    }

    /// Parses, validates and loads a persisted project.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let doc = serialization::from_json(json)?;
        self.load_project(doc)
    }

    /// Starts over with an empty untitled document and a fresh id.
    pub fn reset(&mut self) {
        let doc = Document::new();
        let id = doc.id.clone();
        self.replace_document(doc);
        info!("Reset to new project {}", id);
        self.publish(DocumentEvent::Project(ProjectEvent::Reset { id }));
    }

    fn replace_document(&mut self, doc: Document) {
        self.doc = doc;
        self.selected_node = None;
        self.selected_edge = None;
        self.mode = EditorMode::Select;
        self.viewport = self.viewport_template.clone();
        self.walls_revision += 1;
        let baseline = self.snapshot();
        self.history.reset(baseline);
    }

    /// Pretty-printed JSON in the persisted project format.
    pub fn export_project(&self) -> floorwire_core::Result<String> {
        let json = serialization::to_json(&self.doc)?;
        info!("Exported project {}", self.doc.name);
        Ok(json)
    }

    // ---- document properties ----

    /// Replaces all walls.
    pub fn set_walls(&mut self, walls: Vec<WallSegment>) {
        self.doc.walls = walls;
        self.walls_revision += 1;
        self.publish(DocumentEvent::Project(ProjectEvent::WallsReplaced {
            walls: self.doc.walls.len(),
            segments: self.doc.wall_segment_count(),
        }));
    }

    pub fn set_background(&mut self, background: Option<Background>) {
        self.doc.background = background;
        self.publish(DocumentEvent::Project(ProjectEvent::BackgroundChanged));
    }

    /// Merges the given metadata fields.
    pub fn set_meta(&mut self, update: MetaUpdate) {
        self.doc.meta.apply(update);
        self.publish(DocumentEvent::Project(ProjectEvent::MetaChanged));
    }

    pub fn meta(&self) -> &Meta {
        &self.doc.meta
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.doc.name = name.into();
        self.publish(DocumentEvent::Project(ProjectEvent::Renamed {
            name: self.doc.name.clone(),
        }));
    }

    // ---- selection, mode, viewport ----

    /// Selects a node (or clears with `None`); clears the edge selection.
    /// Returns false for a missing node.
    pub fn select_node(&mut self, id: Option<NodeId>) -> bool {
        if let Some(id) = &id {
            if !self.doc.contains_node(id) {
                debug!("Ignoring selection of missing node {}", id);
                return false;
            }
        }
        self.selected_edge = None;
        self.selected_node = id;
        self.publish(DocumentEvent::Selection(SelectionEvent::NodeSelected {
            id: self.selected_node.as_ref().map(ToString::to_string),
        }));
        true
    }

    /// Selects an edge (or clears with `None`); clears the node selection.
    pub fn select_edge(&mut self, id: Option<EdgeId>) -> bool {
        if let Some(id) = &id {
            if self.doc.edge(id).is_none() {
                debug!("Ignoring selection of missing edge {}", id);
                return false;
            }
        }
        self.selected_node = None;
        self.selected_edge = id;
        self.publish(DocumentEvent::Selection(SelectionEvent::EdgeSelected {
            id: self.selected_edge.as_ref().map(ToString::to_string),
        }));
        true
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.publish(DocumentEvent::Selection(SelectionEvent::ModeChanged {
            mode: mode.to_string(),
        }));
    }

    /// Changes zoom or pan through `f` and notifies subscribers.
    pub fn update_viewport(&mut self, f: impl FnOnce(&mut Viewport)) {
        f(&mut self.viewport);
        let pan = self.viewport.pan();
        self.publish(DocumentEvent::View(ViewEvent::ViewportChanged {
            zoom: self.viewport.zoom(),
            pan_x: pan.x,
            pan_y: pan.y,
        }));
    }
}
