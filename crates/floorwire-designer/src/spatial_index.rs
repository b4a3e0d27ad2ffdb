//! Bulk-loaded bounding-box tree.
//!
//! An R-tree packed with the Sort-Tile-Recursive algorithm. The wall index
//! is rebuilt wholesale whenever walls change, so the tree is immutable once
//! built and has no incremental insert path.

use smallvec::SmallVec;

/// Maximum number of children per tree node.
const NODE_CAPACITY: usize = 9;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing both points, in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    /// Square window of half-width `half` centred on `(x, y)`.
    pub fn around(x: f64, y: f64, half: f64) -> Self {
        Self::new(x - half, y - half, x + half, y + half)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Inclusive overlap test; touching edges intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

#[derive(Debug, Clone)]
struct IndexNode {
    bounds: Bounds,
    /// Entry indices for leaves, node indices otherwise.
    children: SmallVec<[usize; NODE_CAPACITY]>,
    leaf: bool,
}

/// Summary of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpatialIndexStats {
    pub total_nodes: usize,
    pub total_items: usize,
    pub height: usize,
}

/// Static R-tree mapping bounding boxes to caller-defined item ids.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    entries: Vec<(usize, Bounds)>,
    nodes: Vec<IndexNode>,
    root: Option<usize>,
    height: usize,
}

impl SpatialIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs `(id, bounds)` entries into a balanced tree.
    pub fn bulk_load(entries: Vec<(usize, Bounds)>) -> Self {
        let mut index = Self {
            entries,
            ..Self::default()
        };
        if index.entries.is_empty() {
            return index;
        }

        let items: Vec<(usize, Bounds)> = index
            .entries
            .iter()
            .enumerate()
            .map(|(i, (_, bounds))| (i, *bounds))
            .collect();

        let mut level = Self::pack_level(items, true, &mut index.nodes);
        index.height = 1;
        while level.len() > 1 {
            level = Self::pack_level(level, false, &mut index.nodes);
            index.height += 1;
        }
        index.root = level.first().map(|(node, _)| *node);
        index
    }

    /// Groups one level of items into parent nodes, returning the parents.
    fn pack_level(
        mut items: Vec<(usize, Bounds)>,
        leaf: bool,
        nodes: &mut Vec<IndexNode>,
    ) -> Vec<(usize, Bounds)> {
        let node_count = items.len().div_ceil(NODE_CAPACITY);
        let slice_count = (node_count as f64).sqrt().ceil() as usize;
        let slice_size = slice_count.max(1) * NODE_CAPACITY;

        items.sort_by(|a, b| a.1.center().0.total_cmp(&b.1.center().0));

        let mut parents = Vec::with_capacity(node_count);
        for slice in items.chunks_mut(slice_size) {
            slice.sort_by(|a, b| a.1.center().1.total_cmp(&b.1.center().1));
            for group in slice.chunks(NODE_CAPACITY) {
                let bounds = group
                    .iter()
                    .skip(1)
                    .fold(group[0].1, |acc, (_, b)| acc.union(b));
                nodes.push(IndexNode {
                    bounds,
                    children: group.iter().map(|(i, _)| *i).collect(),
                    leaf,
                });
                parents.push((nodes.len() - 1, bounds));
            }
        }
        parents
    }

    /// Ids of all entries whose bounds intersect `area`. Unordered.
    pub fn query(&self, area: &Bounds) -> Vec<usize> {
        let mut found = Vec::new();
        let Some(root) = self.root else {
            return found;
        };

        let mut stack = vec![root];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if !node.bounds.intersects(area) {
                continue;
            }
            if node.leaf {
                found.extend(
                    node.children
                        .iter()
                        .map(|&e| &self.entries[e])
                        .filter(|(_, bounds)| bounds.intersects(area))
                        .map(|(id, _)| *id),
                );
            } else {
                stack.extend(node.children.iter().copied());
            }
        }
        found
    }

    /// Ids of all entries whose bounds contain the point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<usize> {
        self.query(&Bounds::new(x, y, x, y))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn stats(&self) -> SpatialIndexStats {
        SpatialIndexStats {
            total_nodes: self.nodes.len(),
            total_items: self.entries.len(),
            height: self.height,
        }
    }
}
