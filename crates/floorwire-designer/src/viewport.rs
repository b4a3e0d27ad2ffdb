//! Viewport zoom and pan.
//!
//! Maps between screen pixels and document coordinates. The visible region
//! is the view box `(-pan / zoom, size / zoom)`; there is no Y flip, document
//! space follows screen orientation.

use floorwire_settings::ViewportSettings;

use crate::geometry::Point;

/// Zoom and pan state. Not part of undo history.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    min_zoom: f64,
    max_zoom: f64,
    wheel_zoom_in: f64,
    wheel_zoom_out: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewportSettings::default())
    }
}

impl Viewport {
    /// Creates a viewport at zoom 1 with no pan.
    pub fn new(settings: &ViewportSettings) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            wheel_zoom_in: settings.wheel_zoom_in,
            wheel_zoom_out: settings.wheel_zoom_out,
        }
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Sets the zoom level, clamped to the configured limits.
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Multiplies the zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Applies one wheel notch. Positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            self.wheel_zoom_out
        } else {
            self.wheel_zoom_in
        };
        self.zoom_by(factor);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.pan = Point::new(x, y);
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.set_pan(self.pan.x + dx, self.pan.y + dy);
    }

    /// Fit to view: zoom 1, no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }

    /// Converts a screen pixel to document coordinates.
    pub fn screen_to_document(&self, screen_x: f64, screen_y: f64) -> Point {
        Point::new(
            (screen_x - self.pan.x) / self.zoom,
            (screen_y - self.pan.y) / self.zoom,
        )
    }

    /// Converts document coordinates to a screen pixel.
    pub fn document_to_screen(&self, point: Point) -> (f64, f64) {
        (
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    /// Visible document region `(x, y, width, height)` for a canvas size.
    pub fn view_box(&self, canvas_width: f64, canvas_height: f64) -> (f64, f64, f64, f64) {
        (
            -self.pan.x / self.zoom,
            -self.pan.y / self.zoom,
            canvas_width / self.zoom,
            canvas_height / self.zoom,
        )
    }
}
