use super::{NodeGeometry, Side};
use crate::graph::Point;
use serde::{Deserialize, Serialize};

const COINCIDENT_EPSILON: f64 = 1e-9;

/// Sides used when the two centers coincide and no direction exists.
pub const FALLBACK_SIDES: SidePair = SidePair {
    source: Side::Right,
    target: Side::Left,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SidePair {
    pub source: Side,
    pub target: Side,
}

/// Full attachment geometry of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEdge {
    pub source_center: Point,
    pub target_center: Point,
    pub source_side: Side,
    pub target_side: Side,
    pub source_anchor: Point,
    pub target_anchor: Point,
}

/// Direction from `from` to `to` in degrees, or `None` when undefined.
fn direction_degrees(from: Point, to: Point) -> Option<f64> {
    let delta = to - from;
    if !delta.x.is_finite() || !delta.y.is_finite() {
        return None;
    }
    if delta.x.abs() < COINCIDENT_EPSILON && delta.y.abs() < COINCIDENT_EPSILON {
        return None;
    }
    Some(delta.y.atan2(delta.x).to_degrees())
}

/// Decides the attachment side on both nodes from their center points.
///
/// The target side is computed from the reverse direction on its own rather
/// than mirrored from the source side. Coincident centers fall back to
/// [`FALLBACK_SIDES`].
pub fn resolve_sides(source_center: Point, target_center: Point) -> SidePair {
    match (
        direction_degrees(source_center, target_center),
        direction_degrees(target_center, source_center),
    ) {
        (Some(forward), Some(backward)) => SidePair {
            source: Side::from_angle(forward),
            target: Side::from_angle(backward),
        },
        _ => FALLBACK_SIDES,
    }
}

/// Resolves sides and anchor points for an edge between two positioned nodes.
pub fn resolve_edge(
    source_geometry: &NodeGeometry,
    source_position: Point,
    target_geometry: &NodeGeometry,
    target_position: Point,
) -> ResolvedEdge {
    let source_center = source_geometry.center(source_position);
    let target_center = target_geometry.center(target_position);
    let sides = resolve_sides(source_center, target_center);

    ResolvedEdge {
        source_center,
        target_center,
        source_side: sides.source,
        target_side: sides.target,
        source_anchor: source_geometry.anchor(source_center, sides.source),
        target_anchor: target_geometry.anchor(target_center, sides.target),
    }
}
