//! Turns resolved anchor points into cubic Bézier edge paths and their paint.

use crate::geometry::{ResolvedEdge, Side};
use crate::graph::Point;
use serde::{Deserialize, Serialize};

mod paint;

pub use paint::*;

/// Number of segments used when measuring distances along a path.
const HIT_TEST_SEGMENTS: usize = 32;

/// Shape and paint parameters shared by every edge on a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathStyle {
    /// Fraction of the anchor distance used as control-point offset.
    pub curvature: f64,
    /// Upper bound for the control-point offset.
    pub max_offset: f64,
    pub stroke_width: f64,
    /// Width of the invisible path used for pointer hit-testing.
    pub hit_width: f64,
    pub peak_opacity: f64,
    /// Gradient position (0..1) where the stroke reaches peak opacity.
    pub fade_in: f64,
    /// Gradient position (0..1) where the stroke starts fading out.
    pub fade_out: f64,
    pub arrow_size: f64,
    pub color: String,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            curvature: 0.5,
            max_offset: 120.0,
            stroke_width: 2.0,
            hit_width: 20.0,
            peak_opacity: 0.9,
            fade_in: 0.12,
            fade_out: 0.88,
            arrow_size: 8.0,
            color: "#94a3b8".to_string(),
        }
    }
}

/// A cubic Bézier from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl EdgePath {
    /// Builds the curve between two anchors.
    ///
    /// Each control point sits on the outward normal of its side, displaced by
    /// `min(distance * curvature, max_offset)`.
    pub fn build(
        source_anchor: Point,
        source_side: Side,
        target_anchor: Point,
        target_side: Side,
        style: &PathStyle,
    ) -> Self {
        let offset = control_offset(source_anchor.distance_to(target_anchor), style);
        Self {
            start: source_anchor,
            control1: source_anchor + source_side.normal() * offset,
            control2: target_anchor + target_side.normal() * offset,
            end: target_anchor,
        }
    }

    pub fn from_resolved(resolved: &ResolvedEdge, style: &PathStyle) -> Self {
        Self::build(
            resolved.source_anchor,
            resolved.source_side,
            resolved.target_anchor,
            resolved.target_side,
            style,
        )
    }

    /// SVG path data: `M start C control1 control2 end`.
    pub fn to_svg(&self) -> String {
        format!(
            "M {} C {} {} {}",
            self.start, self.control1, self.control2, self.end
        )
    }

    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// First derivative of the curve at `t`.
    pub fn tangent_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.control1 - self.start) * (3.0 * u * u)
            + (self.control2 - self.control1) * (6.0 * u * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }

    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Approximate shortest distance from `point` to the curve.
    pub fn distance_to(&self, point: Point) -> f64 {
        let mut best = f64::INFINITY;
        let mut prev = self.start;
        for i in 1..=HIT_TEST_SEGMENTS {
            let next = self.point_at(i as f64 / HIT_TEST_SEGMENTS as f64);
            best = best.min(distance_to_segment(point, prev, next));
            prev = next;
        }
        best
    }
}

fn control_offset(distance: f64, style: &PathStyle) -> f64 {
    (distance * style.curvature).min(style.max_offset).max(0.0)
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return point.distance_to(a);
    }
    let ap = point - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    point.distance_to(a + ab * t)
}
