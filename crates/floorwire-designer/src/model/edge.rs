use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::geometry::Point;

entity_id! {
    /// Identifier of a wiring edge.
    EdgeId
}

/// Presentation data attached to a wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Intermediate routing points for straight-segment wires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    /// User-dragged curve handle for light-switch wires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point: Option<Point>,
}

impl EdgeData {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.points.is_none() && self.control_point.is_none()
    }
}

/// A logical wiring connection between two device nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "EdgeData::is_empty")]
    pub data: EdgeData,
}

impl Edge {
    /// Creates an edge with a fresh id and no data.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::generate(),
            source,
            target,
            data: EdgeData::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<EdgeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_data(mut self, data: EdgeData) -> Self {
        self.data = data;
        self
    }

    /// Whether either endpoint is `node`.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    /// The endpoint opposite `node`, if the edge touches it.
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.source == node {
            Some(&self.target)
        } else if &self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Whether the edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}
