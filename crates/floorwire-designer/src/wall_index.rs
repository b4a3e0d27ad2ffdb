//! Spatial index over wall sub-segments.

use crate::geometry::Segment;
use crate::model::WallSegment;
use crate::spatial_index::{Bounds, SpatialIndex};

/// One straight piece of a wall polyline, as stored in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentItem {
    /// `{wall_id}-{index}`
    pub id: String,
    pub wall_id: String,
    /// Position of the piece within its wall.
    pub index: usize,
    pub bounds: Bounds,
    pub segment: Segment,
}

/// Index derived from a document's walls.
///
/// Always built from the complete wall set; never updated in place.
#[derive(Debug, Clone, Default)]
pub struct WallIndex {
    items: Vec<SegmentItem>,
    tree: SpatialIndex,
}

impl WallIndex {
    /// Decomposes every wall into sub-segments and bulk-loads them.
    pub fn build(walls: &[WallSegment]) -> Self {
        let items: Vec<SegmentItem> = walls
            .iter()
            .flat_map(|wall| {
                wall.segments().enumerate().map(move |(i, segment)| SegmentItem {
                    id: format!("{}-{}", wall.id, i),
                    wall_id: wall.id.clone(),
                    index: i,
                    bounds: Bounds::from_corners(
                        segment.start.x,
                        segment.start.y,
                        segment.end.x,
                        segment.end.y,
                    ),
                    segment,
                })
            })
            .collect();

        let tree = SpatialIndex::bulk_load(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (i, item.bounds))
                .collect(),
        );

        tracing::debug!(
            "Built wall index: {} walls, {} segments, height {}",
            walls.len(),
            items.len(),
            tree.stats().height
        );

        Self { items, tree }
    }

    /// Sub-segments whose bounding box intersects `area`. Unordered.
    pub fn query(&self, area: &Bounds) -> Vec<&SegmentItem> {
        self.tree
            .query(area)
            .into_iter()
            .map(|i| &self.items[i])
            .collect()
    }

    pub fn items(&self) -> &[SegmentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
