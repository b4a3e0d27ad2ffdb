//! Serialization and validation of persisted projects.
//!
//! The JSON shape is the project format shared with other front ends:
//! camelCase fields, `kind`-tagged nodes and optional `data`/`meta`
//! objects. Loading is all-or-nothing; a document is only handed to the
//! store after [`validate`] accepts it.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use floorwire_core::DocumentError;

use crate::geometry::Point;
use crate::model::Document;

fn finite(value: f64, context: impl FnOnce() -> String) -> Result<(), DocumentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DocumentError::NonFinite { context: context() })
    }
}

fn finite_point(point: &Point, context: impl FnOnce() -> String) -> Result<(), DocumentError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(DocumentError::NonFinite { context: context() })
    }
}

fn unique<'a>(
    entity: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, DocumentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(DocumentError::EmptyId { entity });
        }
        if !seen.insert(id) {
            return Err(DocumentError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

/// Checks the invariants the store relies on.
///
/// Rejects empty or repeated ids, self-loop edges, edges whose endpoints
/// are missing and NaN or infinite numbers anywhere in the geometry.
pub fn validate(doc: &Document) -> Result<(), DocumentError> {
    unique("wall", doc.walls.iter().map(|w| w.id.as_str()))?;
    let node_ids = unique("node", doc.nodes.iter().map(|n| n.id.as_str()))?;
    unique("edge", doc.edges.iter().map(|e| e.id.as_str()))?;

    for wall in &doc.walls {
        for point in &wall.points {
            finite_point(point, || format!("wall {}", wall.id))?;
        }
    }

    for node in &doc.nodes {
        finite_point(&node.position, || format!("position of node {}", node.id))?;
        finite(node.rotation, || format!("rotation of node {}", node.id))?;
        if let Some(height) = node.data.height_mm {
            finite(height, || format!("heightMm of node {}", node.id))?;
        }
    }

    for edge in &doc.edges {
        if edge.source == edge.target {
            return Err(DocumentError::SelfLoop {
                edge: edge.id.to_string(),
                node: edge.source.to_string(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(DocumentError::DanglingEdge {
                    edge: edge.id.to_string(),
                    node: endpoint.to_string(),
                });
            }
        }
        let points = edge.data.points.iter().flatten();
        for point in points.chain(edge.data.control_point.as_ref()) {
            finite_point(point, || format!("edge {}", edge.id))?;
        }
    }

    finite(doc.meta.grid, || "meta.grid".to_string())?;
    finite(doc.meta.px_per_meter, || "meta.pxPerMeter".to_string())?;
    if let Some(scale) = doc.background.as_ref().and_then(|b| b.scale) {
        finite(scale, || "background.scale".to_string())?;
    }

    Ok(())
}

/// Parses and validates a project.
pub fn from_json(json: &str) -> Result<Document, DocumentError> {
    let doc: Document = serde_json::from_str(json)?;
    validate(&doc)?;
    Ok(doc)
}

/// Pretty-printed project JSON.
pub fn to_json(doc: &Document) -> floorwire_core::Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Save a project to file
pub fn save_to_file(doc: &Document, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize project")?;

    std::fs::write(path.as_ref(), json).context("Failed to write project file")?;

    Ok(())
}

/// Load and validate a project from file
pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Document> {
    let content =
        std::fs::read_to_string(path.as_ref()).context("Failed to read project file")?;

    let doc = from_json(&content).context("Failed to load project file")?;

    Ok(doc)
}
