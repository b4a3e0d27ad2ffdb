use floorwire_core::units::{Units, DEFAULT_PX_PER_METER};
use serde::{Deserialize, Serialize};

use super::{DeviceNode, Edge, EdgeId, NodeId};
use crate::geometry::{Point, Segment};

/// Name given to new and reset documents.
pub const UNTITLED_NAME: &str = "Untitled Floorplan";

/// A wall polyline imported from the source floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: String,
    pub points: Vec<Point>,
}

impl WallSegment {
    pub fn new(id: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    /// Consecutive point pairs, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Svg,
    Image,
    Pdf,
}

/// The floorplan drawn underneath the devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Document-wide display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub grid: f64,
    pub units: Units,
    pub px_per_meter: f64,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            grid: 10.0,
            units: Units::Mm,
            px_per_meter: DEFAULT_PX_PER_METER,
        }
    }
}

/// Partial metadata change; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaUpdate {
    pub grid: Option<f64>,
    pub units: Option<Units>,
    pub px_per_meter: Option<f64>,
}

impl Meta {
    pub fn apply(&mut self, update: MetaUpdate) {
        if let Some(grid) = update.grid {
            self.grid = grid;
        }
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(px_per_meter) = update.px_per_meter {
            self.px_per_meter = px_per_meter;
        }
    }
}

/// Aggregate root of a floorplan project.
///
/// Node order is insertion order and doubles as z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default)]
    pub walls: Vec<WallSegment>,
    pub nodes: Vec<DeviceNode>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub meta: Meta,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: UNTITLED_NAME.to_string(),
            background: None,
            walls: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            meta: Meta::default(),
        }
    }
}

impl Document {
    /// Empty untitled document with a fresh id.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &NodeId) -> Option<&DeviceNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut DeviceNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| &e.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    /// Edges with `node` as source or target.
    pub fn edges_of<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    /// Total number of wall sub-segments.
    pub fn wall_segment_count(&self) -> usize {
        self.walls
            .iter()
            .map(|w| w.points.len().saturating_sub(1))
            .sum()
    }
}
