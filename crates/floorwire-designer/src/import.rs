//! # Wall Import Module
//!
//! Extracts wall polylines from an SVG floorplan.
//!
//! Recognised primitives:
//! - `<line>` becomes a two-point wall
//! - `<polyline>` keeps its point list (at least two valid points)
//! - `<rect>` expands to a closed five-point outline
//!
//! Walls are numbered `wall-0`, `wall-1`, ... in extraction order: all lines
//! first, then polylines, then rectangles. Missing numeric attributes read
//! as 0. Transforms and nested groups are not interpreted.

use std::path::Path;

use floorwire_core::ImportError;

use crate::geometry::Point;
use crate::model::WallSegment;

/// SVG wall extractor with a uniform coordinate scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgWallImporter {
    scale: f64,
}

impl Default for SvgWallImporter {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl SvgWallImporter {
    /// Creates an importer; `scale` must be positive and finite.
    pub fn new(scale: f64) -> Result<Self, ImportError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ImportError::InvalidScale(scale));
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Extracts walls from SVG text.
    pub fn import_str(&self, svg_content: &str) -> Result<Vec<WallSegment>, ImportError> {
        if find_tags(svg_content, "svg").next().is_none() {
            return Err(ImportError::MissingSvgRoot);
        }

        let mut outlines: Vec<Vec<Point>> = Vec::new();

        for tag in find_tags(svg_content, "line") {
            let x1 = number_attr(tag, "line", "x1")?;
            let y1 = number_attr(tag, "line", "y1")?;
            let x2 = number_attr(tag, "line", "x2")?;
            let y2 = number_attr(tag, "line", "y2")?;
            outlines.push(vec![Point::new(x1, y1), Point::new(x2, y2)]);
        }

        for tag in find_tags(svg_content, "polyline") {
            let points = parse_points(extract_attr_str(tag, "points").unwrap_or(""));
            if points.len() > 1 {
                outlines.push(points);
            }
        }

        for tag in find_tags(svg_content, "rect") {
            let x = number_attr(tag, "rect", "x")?;
            let y = number_attr(tag, "rect", "y")?;
            let width = number_attr(tag, "rect", "width")?;
            let height = number_attr(tag, "rect", "height")?;
            outlines.push(vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
                Point::new(x, y),
            ]);
        }

        let walls: Vec<WallSegment> = outlines
            .into_iter()
            .enumerate()
            .map(|(i, points)| {
                let points = points
                    .into_iter()
                    .map(|p| Point::new(p.x * self.scale, p.y * self.scale))
                    .collect();
                WallSegment::new(format!("wall-{}", i), points)
            })
            .collect();

        tracing::info!("Imported {} walls from SVG", walls.len());
        Ok(walls)
    }

    /// Reads and extracts walls from an SVG file.
    pub fn import_file(&self, path: &Path) -> floorwire_core::Result<Vec<WallSegment>> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.import_str(&content)?)
    }
}

/// Opening tags named exactly `name`, without the leading `<name` and the
/// closing `>`.
fn find_tags<'a>(content: &'a str, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let opener = format!("<{}", name);
    let mut search_pos = 0;
    std::iter::from_fn(move || {
        while let Some(found) = content[search_pos..].find(&opener) {
            let attrs_start = search_pos + found + opener.len();
            let boundary = content[attrs_start..].chars().next();
            let Some(tag_len) = content[attrs_start..].find('>') else {
                search_pos = content.len();
                return None;
            };
            search_pos = attrs_start + tag_len + 1;
            if matches!(boundary, Some(c) if c.is_whitespace() || c == '/' || c == '>') {
                return Some(&content[attrs_start..attrs_start + tag_len]);
            }
        }
        None
    })
}

/// Raw value of `attr`, single or double quoted.
fn extract_attr_str<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    for quote in ['"', '\''] {
        let pattern = format!("{}={}", attr, quote);
        let mut from = 0;
        while let Some(found) = tag[from..].find(&pattern) {
            let start = from + found;
            from = start + pattern.len();
            let preceded_by_space = tag[..start]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if !preceded_by_space {
                continue;
            }
            if let Some(end) = tag[from..].find(quote) {
                return Some(&tag[from..from + end]);
            }
        }
    }
    None
}

/// Numeric attribute; missing reads as 0, a `px` suffix is accepted.
fn number_attr(tag: &str, element: &str, attr: &str) -> Result<f64, ImportError> {
    let Some(raw) = extract_attr_str(tag, attr) else {
        return Ok(0.0);
    };
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ImportError::InvalidAttribute {
            element: element.to_string(),
            attribute: attr.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Parses `"x1,y1 x2,y2 ..."`; pairs with an unparsable coordinate are
/// dropped and a trailing odd value is ignored.
fn parse_points(points: &str) -> Vec<Point> {
    let coords: Vec<&str> = points
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    coords
        .chunks_exact(2)
        .filter_map(|pair| {
            let x = pair[0].parse::<f64>().ok().filter(|v| v.is_finite())?;
            let y = pair[1].parse::<f64>().ok().filter(|v| v.is_finite())?;
            Some(Point::new(x, y))
        })
        .collect()
}
