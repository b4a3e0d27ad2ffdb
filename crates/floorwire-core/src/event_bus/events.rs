//! Event type definitions for the document event bus.
//!
//! Every mutating document operation publishes exactly one event after the
//! change has been fully applied, so subscribers that read the store from a
//! handler's follow-up always observe a consistent post-mutation snapshot.

use serde::{Deserialize, Serialize};

/// Root event enum for all document events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// Device nodes and wiring edges
    Structure(StructureEvent),
    /// Whole-document changes (load, walls, background, metadata)
    Project(ProjectEvent),
    /// Selection and editor mode
    Selection(SelectionEvent),
    /// Zoom and pan
    View(ViewEvent),
    /// Undo/redo history movement
    History(HistoryEvent),
}

impl DocumentEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            DocumentEvent::Structure(_) => EventCategory::Structure,
            DocumentEvent::Project(_) => EventCategory::Project,
            DocumentEvent::Selection(_) => EventCategory::Selection,
            DocumentEvent::View(_) => EventCategory::View,
            DocumentEvent::History(_) => EventCategory::History,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            DocumentEvent::Structure(e) => e.description(),
            DocumentEvent::Project(e) => e.description(),
            DocumentEvent::Selection(e) => e.description(),
            DocumentEvent::View(e) => e.description(),
            DocumentEvent::History(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Node and edge events.
    Structure,
    /// Whole-document events.
    Project,
    /// Selection and mode events.
    Selection,
    /// Viewport events.
    View,
    /// History events.
    History,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Structure => write!(f, "Structure"),
            EventCategory::Project => write!(f, "Project"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::View => write!(f, "View"),
            EventCategory::History => write!(f, "History"),
        }
    }
}

/// Node and edge changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructureEvent {
    /// A node was appended
    NodeAdded { id: String },
    /// A node's position, rotation or data changed
    NodeUpdated { id: String },
    /// A node moved as part of an uncommitted drag preview
    NodeMoved { id: String, x: f64, y: f64 },
    /// A node was removed together with its edges
    NodeRemoved { id: String, edges_removed: usize },
    /// An edge was appended
    EdgeAdded { id: String },
    /// An edge's data changed
    EdgeUpdated { id: String },
    /// An edge was removed
    EdgeRemoved { id: String },
    /// Several changes applied as one transition
    BatchApplied {
        nodes_added: usize,
        nodes_removed: usize,
        edges_added: usize,
        edges_removed: usize,
    },
}

impl StructureEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::NodeAdded { id } => format!("Node {} added", id),
            Self::NodeUpdated { id } => format!("Node {} updated", id),
            Self::NodeMoved { id, x, y } => format!("Node {} moved to ({:.1}, {:.1})", id, x, y),
            Self::NodeRemoved { id, edges_removed } => {
                format!("Node {} removed ({} edges)", id, edges_removed)
            }
            Self::EdgeAdded { id } => format!("Edge {} added", id),
            Self::EdgeUpdated { id } => format!("Edge {} updated", id),
            Self::EdgeRemoved { id } => format!("Edge {} removed", id),
            Self::BatchApplied {
                nodes_added,
                nodes_removed,
                edges_added,
                edges_removed,
            } => format!(
                "Batch: +{} -{} nodes, +{} -{} edges",
                nodes_added, nodes_removed, edges_added, edges_removed
            ),
        }
    }
}

/// Whole-document changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectEvent {
    /// A project replaced the current document
    Loaded { id: String, name: String },
    /// The document was reset to an empty one
    Reset { id: String },
    /// Wall geometry was replaced
    WallsReplaced { walls: usize, segments: usize },
    /// The background floorplan changed
    BackgroundChanged,
    /// Metadata (grid, units, calibration) changed
    MetaChanged,
    /// The document was renamed
    Renamed { name: String },
}

impl ProjectEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::Loaded { id, name } => format!("Project {} ({}) loaded", name, id),
            Self::Reset { id } => format!("Project reset to {}", id),
            Self::WallsReplaced { walls, segments } => {
                format!("Walls replaced: {} walls, {} segments", walls, segments)
            }
            Self::BackgroundChanged => "Background changed".to_string(),
            Self::MetaChanged => "Metadata changed".to_string(),
            Self::Renamed { name } => format!("Renamed to {}", name),
        }
    }
}

/// Selection and editor mode changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The selected node changed
    NodeSelected { id: Option<String> },
    /// The selected edge changed
    EdgeSelected { id: Option<String> },
    /// The editor mode changed
    ModeChanged { mode: String },
}

impl SelectionEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::NodeSelected { id: Some(id) } => format!("Node {} selected", id),
            Self::NodeSelected { id: None } => "Node selection cleared".to_string(),
            Self::EdgeSelected { id: Some(id) } => format!("Edge {} selected", id),
            Self::EdgeSelected { id: None } => "Edge selection cleared".to_string(),
            Self::ModeChanged { mode } => format!("Mode changed to {}", mode),
        }
    }
}

/// Viewport changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Zoom or pan changed
    ViewportChanged { zoom: f64, pan_x: f64, pan_y: f64 },
}

impl ViewEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::ViewportChanged { zoom, pan_x, pan_y } => {
                format!("Viewport zoom {:.2} pan ({:.1}, {:.1})", zoom, pan_x, pan_y)
            }
        }
    }
}

/// History movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A snapshot was recorded
    Committed { index: usize, len: usize },
    /// The pointer moved back
    Undone { index: usize },
    /// The pointer moved forward
    Redone { index: usize },
}

impl HistoryEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            Self::Committed { index, len } => format!("History committed ({}/{})", index + 1, len),
            Self::Undone { index } => format!("Undo to entry {}", index),
            Self::Redone { index } => format!("Redo to entry {}", index),
        }
    }
}
