use crate::graph::Point;
use serde::{Deserialize, Serialize};

/// The host's pan/zoom transform between client pixels and canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner of the canvas element in client pixels.
    pub origin: Point,
    /// Pan offset in client pixels.
    pub pan: Point,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            pan: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: Point, pan: Point, zoom: f64) -> Self {
        Self { origin, pan, zoom }
    }

    // Degenerate zoom values are treated as 1.0.
    fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > f64::EPSILON {
            self.zoom
        } else {
            1.0
        }
    }

    /// Translates a client pixel coordinate (e.g. a drop event) into canvas space.
    pub fn client_to_canvas(&self, client: Point) -> Point {
        (client - self.origin - self.pan) * (1.0 / self.effective_zoom())
    }

    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        canvas * self.effective_zoom() + self.pan + self.origin
    }
}
