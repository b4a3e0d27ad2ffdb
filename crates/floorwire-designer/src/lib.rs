//! # Floorwire Designer
//!
//! Placement engine for electrical overlays on floorplans: wall snapping,
//! device placement with companions, drag handling and the switch
//! combination protocol, on top of an undoable document store.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Geometry**: points, segments and clamped projection
//! - **Spatial Index**: bulk-loaded bounding-box tree
//! - **Wall Index**: wall polylines split into indexed sub-segments
//! - **Snap**: nearest-wall resolution with tolerance tiers
//!
//! ### Document
//! - **Model**: device nodes, wiring edges, walls and metadata
//! - **Store**: atomic mutations, selection, mode and viewport
//! - **History**: bounded linear undo/redo
//! - **Serialization**: persisted JSON format and validation
//!
//! ### Interaction
//! - **Placement**: devices plus their companion light or switch
//! - **Drag**: per-move resolution, light alignment guides
//! - **Combination**: switch-to-light mesh and multi-gang merge
//! - **Editor**: the facade an interaction layer drives
//!
//! ### Presentation helpers
//! - **Wire**: curve and polyline geometry for edges
//! - **Schedule**: device counts per variant
//! - **Import**: walls from SVG floorplans
//!
//! ## Architecture
//!
//! ```text
//! FloorplanEditor
//!   ├── DocumentStore (Document + HistoryManager + EventBus)
//!   ├── WallIndex (rebuilt when walls change)
//!   │     └── SpatialIndex
//!   ├── SnapResolver
//!   └── DragSession
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use floorwire_designer::{DeviceKind, FloorplanEditor};
//!
//! let mut editor = FloorplanEditor::new();
//! let placed = editor.place_device(DeviceKind::Light, 100.0, 100.0).unwrap();
//! assert!(placed.companion.is_some());
//! assert_eq!(editor.store().nodes().len(), 2);
//! assert!(editor.undo());
//! assert!(editor.store().nodes().is_empty());
//! ```

pub mod combination;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod import;
pub mod model;
pub mod placement;
pub mod schedule;
pub mod serialization;
pub mod snap;
pub mod spatial_index;
pub mod store;
pub mod viewport;
pub mod wall_index;
pub mod wire;

pub use combination::{connected_lights, plan_combine, plan_mesh, CombinePlan, MeshPlan};
pub use drag::{AlignmentGuides, DragFeedback, DragOutcome, DragSession};
pub use editor::FloorplanEditor;
pub use geometry::{Point, Segment};
pub use history::HistoryManager;
pub use import::SvgWallImporter;
pub use model::{
    Background, BackgroundKind, Device, DeviceKind, DeviceNode, Document, Edge, EdgeData, EdgeId,
    LightType, Meta, MetaUpdate, NodeData, NodeId, PowerType, SwitchType, WallSegment,
};
pub use placement::Placement;
pub use schedule::{DeviceSchedule, DeviceVariant, ScheduleEntry};
pub use snap::{snap_to_walls, ResolvedPosition, SnapPolicy, SnapResolver, SnapResult};
pub use spatial_index::{Bounds, SpatialIndex, SpatialIndexStats};
pub use store::{BatchOutcome, BatchUpdate, DocumentStore, EditorMode, NodeUpdate, Snapshot};
pub use viewport::Viewport;
pub use wall_index::{SegmentItem, WallIndex};
pub use wire::{wire_geometry, WireGeometry};
