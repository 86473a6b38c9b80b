use super::{EdgePath, PathStyle};
use crate::geometry::Side;
use crate::graph::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis, 0..1.
    pub offset: f64,
    pub opacity: f64,
}

/// A linear opacity gradient laid along the edge from source to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: Point,
    pub to: Point,
    pub stops: Vec<GradientStop>,
}

/// Filled triangle at the target end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

/// How an edge is painted: a tapered gradient stroke, a wider invisible hit
/// path beneath it, and an arrowhead at the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePaint {
    pub color: String,
    pub stroke_width: f64,
    pub hit_width: f64,
    pub gradient: Gradient,
    pub arrowhead: Arrowhead,
    pub arrow_opacity: f64,
}

impl EdgePaint {
    pub fn new(path: &EdgePath, target_side: Side, style: &PathStyle) -> Self {
        Self {
            color: style.color.clone(),
            stroke_width: style.stroke_width,
            hit_width: style.hit_width,
            gradient: Gradient {
                from: path.start,
                to: path.end,
                stops: gradient_stops(style),
            },
            arrowhead: arrowhead(path, target_side, style.arrow_size),
            arrow_opacity: style.peak_opacity,
        }
    }
}

/// Opacity ramps 0 → peak → 0 so both ends fade into the node boundaries.
pub fn gradient_stops(style: &PathStyle) -> Vec<GradientStop> {
    let peak = style.peak_opacity;
    vec![
        GradientStop {
            offset: 0.0,
            opacity: 0.0,
        },
        GradientStop {
            offset: style.fade_in,
            opacity: peak,
        },
        GradientStop {
            offset: 0.5,
            opacity: peak,
        },
        GradientStop {
            offset: style.fade_out,
            opacity: peak,
        },
        GradientStop {
            offset: 1.0,
            opacity: 0.0,
        },
    ]
}

fn arrowhead(path: &EdgePath, target_side: Side, size: f64) -> Arrowhead {
    // A zero-length end tangent (coincident anchors) points into the target
    // through its attachment side instead.
    let direction = path
        .tangent_at(1.0)
        .normalized()
        .unwrap_or_else(|| target_side.normal() * -1.0);
    let tip = path.end;
    let base = tip - direction * size;
    let perpendicular = Point::new(-direction.y, direction.x) * (size / 2.0);
    Arrowhead {
        tip,
        left: base + perpendicular,
        right: base - perpendicular,
    }
}
