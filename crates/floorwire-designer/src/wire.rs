//! Geometry of rendered wires.

use crate::geometry::Point;
use crate::model::{Document, Edge};

/// Share of the endpoint vector used to bow light-switch curves.
pub const CURVE_BOW: f64 = 0.2;

/// Path of one wire on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum WireGeometry {
    /// Quadratic Bézier, used between a light and a switch.
    Curve {
        start: Point,
        control: Point,
        end: Point,
    },
    /// Straight pieces through any routing points.
    Polyline(Vec<Point>),
}

impl WireGeometry {
    pub fn start(&self) -> Point {
        match self {
            Self::Curve { start, .. } => *start,
            Self::Polyline(points) => points.first().copied().unwrap_or_default(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Curve { end, .. } => *end,
            Self::Polyline(points) => points.last().copied().unwrap_or_default(),
        }
    }

    /// Where the wire label is drawn: halfway between the endpoints.
    pub fn label_anchor(&self) -> Point {
        self.start().midpoint(&self.end())
    }

    /// SVG path data.
    pub fn to_svg_path(&self) -> String {
        match self {
            Self::Curve {
                start,
                control,
                end,
            } => format!(
                "M {} {} Q {} {} {} {}",
                start.x, start.y, control.x, control.y, end.x, end.y
            ),
            Self::Polyline(points) => points
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Default curve handle: the midpoint pushed sideways by a fifth of the
/// endpoint vector.
pub fn default_control_point(start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    start.midpoint(&end).offset(-dy * CURVE_BOW, dx * CURVE_BOW)
}

/// Geometry for `edge`, or `None` when an endpoint is missing.
pub fn wire_geometry(doc: &Document, edge: &Edge) -> Option<WireGeometry> {
    let source = doc.node(&edge.source)?;
    let target = doc.node(&edge.target)?;
    let (start, end) = (source.position, target.position);

    let light_switch = (source.is_light() && target.is_switch())
        || (source.is_switch() && target.is_light());
    if light_switch {
        let control = edge
            .data
            .control_point
            .unwrap_or_else(|| default_control_point(start, end));
        return Some(WireGeometry::Curve {
            start,
            control,
            end,
        });
    }

    let mut points = Vec::with_capacity(2 + edge.data.points.as_ref().map_or(0, Vec::len));
    points.push(start);
    points.extend(edge.data.points.iter().flatten().copied());
    points.push(end);
    Some(WireGeometry::Polyline(points))
}
