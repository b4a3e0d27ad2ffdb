//! Editor facade.
//!
//! `FloorplanEditor` is what an interaction layer drives: it owns the
//! document store, the wall index derived from the store's walls and the
//! drag gesture in progress, and turns pointer events already mapped into
//! document space into store operations.

use floorwire_core::ImportError;
use floorwire_settings::{Config, ConfigResult};
use tracing::{debug, info};

use crate::combination;
use crate::drag::{self, DragFeedback, DragOutcome, DragSession};
use crate::geometry::Point;
use crate::import::SvgWallImporter;
use crate::model::{DeviceKind, NodeId};
use crate::placement::{self, Placement};
use crate::snap::SnapResolver;
use crate::store::DocumentStore;
use crate::wall_index::WallIndex;

/// Document store plus the placement, drag and combination rules.
#[derive(Debug)]
pub struct FloorplanEditor {
    store: DocumentStore,
    config: Config,
    resolver: SnapResolver,
    wall_index: WallIndex,
    /// Store walls revision the index was built from.
    indexed_revision: Option<u64>,
    drag: Option<DragSession>,
}

impl Default for FloorplanEditor {
    fn default() -> Self {
        Self::from_valid_config(Config::default())
    }
}

impl FloorplanEditor {
    /// Editor with default settings and an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor using `config`, which must pass validation.
    pub fn with_config(config: Config) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: Config) -> Self {
        Self {
            store: DocumentStore::with_config(&config),
            resolver: SnapResolver::new(config.snapping.clone()),
            config,
            wall_index: WallIndex::default(),
            indexed_revision: None,
            drag: None,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Direct store access for edits that need no placement rules.
    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &SnapResolver {
        &self.resolver
    }

    /// Rebuilds the wall index if the store's walls changed since the last
    /// build.
    fn refresh_wall_index(&mut self) {
        let revision = self.store.walls_revision();
        if self.indexed_revision != Some(revision) {
            self.wall_index = WallIndex::build(self.store.walls());
            self.indexed_revision = Some(revision);
        }
    }

    /// Wall index matching the current walls.
    pub fn wall_index(&mut self) -> &WallIndex {
        self.refresh_wall_index();
        &self.wall_index
    }

    /// Parses walls out of an SVG floorplan and replaces the current walls.
    ///
    /// Returns the number of walls imported.
    pub fn import_svg_walls(&mut self, svg: &str, scale: f64) -> Result<usize, ImportError> {
        let walls = SvgWallImporter::new(scale)?.import_str(svg)?;
        let count = walls.len();
        self.store.set_walls(walls);
        Ok(count)
    }

    /// Whether a wall lies close enough to `(x, y)` to suggest a
    /// wall-mounted device there.
    pub fn wall_hint(&mut self, x: f64, y: f64) -> bool {
        self.refresh_wall_index();
        self.resolver.near_wall(&self.wall_index, Point::new(x, y))
    }

    /// Places a device and its companion as one undo step and selects the
    /// new device.
    pub fn place_device(&mut self, kind: DeviceKind, x: f64, y: f64) -> Option<Placement> {
        let point = Point::new(x, y);
        if !point.is_finite() {
            debug!("Ignoring placement at non-finite point");
            return None;
        }
        self.refresh_wall_index();

        let plan = placement::plan_placement(
            &self.wall_index,
            &self.resolver,
            &self.config.placement,
            kind,
            point,
        );
        self.store.batch_update(plan.batch);
        self.store.select_node(Some(plan.placement.primary.clone()));
        info!(
            "Placed {} {} (snapped: {}, companion: {:?})",
            kind, plan.placement.primary, plan.placement.snapped, plan.placement.companion
        );
        Some(plan.placement)
    }

    /// Deletes the selected node (with its edges) or the selected edge.
    pub fn delete_selected(&mut self) -> bool {
        if let Some(id) = self.store.selected_node_id().cloned() {
            return self.store.delete_node(&id);
        }
        if let Some(id) = self.store.selected_edge_id().cloned() {
            return self.store.delete_edge(&id);
        }
        false
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    // ---- dragging ----

    /// The gesture in progress, if any.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Starts dragging a node and selects it. Returns false for a missing
    /// node. A gesture already in progress is finished first.
    pub fn begin_drag(&mut self, id: &NodeId) -> bool {
        if self.drag.is_some() {
            self.end_drag();
        }
        let Some(node) = self.store.node(id) else {
            debug!("Ignoring drag of missing node {}", id);
            return false;
        };
        self.drag = Some(DragSession::new(node));
        self.store.select_node(Some(id.clone()));
        true
    }

    /// Moves the dragged node towards a pointer position.
    ///
    /// The move is a preview: it changes current state but adds no history
    /// entry until the gesture ends.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<DragFeedback> {
        let pointer = Point::new(x, y);
        if !pointer.is_finite() {
            return None;
        }
        self.refresh_wall_index();

        let session = self.drag.as_ref()?;
        let Some(node) = self.store.node(session.node_id()) else {
            debug!("Dragged node {} vanished; ending drag", session.node_id());
            self.drag = None;
            return None;
        };
        let feedback = drag::resolve_move(
            self.store.document(),
            &self.wall_index,
            &self.resolver,
            &self.config.combination,
            node,
            pointer,
        );

        self.store
            .preview_node_transform(&feedback.node, feedback.position, Some(feedback.rotation));
        if let Some(session) = self.drag.as_mut() {
            session.record_move(&feedback);
        }
        Some(feedback)
    }

    /// Finishes the gesture.
    ///
    /// A released switch is first offered to the mesh rule, then to the
    /// combine rule; otherwise the final position is recorded.
    pub fn end_drag(&mut self) -> DragOutcome {
        let Some(session) = self.drag.take() else {
            return DragOutcome::Aborted;
        };
        let id = session.node_id().clone();
        let Some(node) = self.store.node(&id) else {
            debug!("Dragged node {} vanished before release", id);
            return DragOutcome::Aborted;
        };

        if node.is_switch() {
            let mesh = combination::plan_mesh(
                self.store.document(),
                &id,
                self.config.combination.light_proximity,
            );
            if let Some(plan) = mesh {
                info!(
                    "Meshed switch {} into light {} ({} lights relinked)",
                    plan.switch,
                    plan.light,
                    plan.relinked.len()
                );
                self.store.batch_update(plan.batch);
                return DragOutcome::Meshed {
                    switch: plan.switch,
                    light: plan.light,
                    relinked: plan.relinked,
                };
            }

            let combine =
                combination::plan_combine(self.store.document(), &id, &self.config.combination);
            if let Some(plan) = combine {
                info!(
                    "Combined switches {} and {} into {}-gang switch {}",
                    plan.switches[0], plan.switches[1], plan.gangs, plan.new_switch
                );
                self.store.batch_update(plan.batch);
                self.store.select_node(Some(plan.new_switch.clone()));
                return DragOutcome::Combined {
                    new_switch: plan.new_switch,
                    removed: plan.switches,
                    gangs: plan.gangs,
                };
            }
        }

        if self.store.commit() {
            DragOutcome::Moved { node: id }
        } else {
            DragOutcome::Unchanged { node: id }
        }
    }

    /// Abandons the gesture and puts the node back where it started.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        let (origin, rotation) = session.origin();
        self.store
            .preview_node_transform(session.node_id(), origin, Some(rotation))
    }
}
