//! Geometry primitives for wall snapping and device layout.
//!
//! Plain value types and the point-to-segment projection used by the snap
//! resolver. Angles returned by segment helpers are radians; device
//! rotations stored on nodes are degrees.

use serde::{Deserialize, Serialize};

/// A 2D coordinate in document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns the point displaced by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when both axis distances to `other` are strictly below `half_width`.
    pub fn within_box(&self, other: &Point, half_width: f64) -> bool {
        (self.x - other.x).abs() < half_width && (self.y - other.y).abs() < half_width
    }
}

/// A straight line piece between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Direction of travel from start to end, in radians.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// Orthogonal projection of `p`, clamped to the segment's endpoints.
    ///
    /// A zero-length segment projects every point onto its start.
    pub fn project(&self, p: &Point) -> Point {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.start;
        }

        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq;
        let t = t.clamp(0.0, 1.0);
        Point::new(self.start.x + t * dx, self.start.y + t * dy)
    }

    /// Distance from `p` to the nearest point of the segment.
    pub fn distance_to_point(&self, p: &Point) -> f64 {
        p.distance_to(&self.project(p))
    }
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}
