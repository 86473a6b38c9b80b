//! Attachment geometry: which side of a node an edge uses and where exactly
//! on the node's perimeter it attaches.

use crate::graph::{NodeKind, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

mod cache;
mod resolver;

pub use cache::GeometryCache;
pub use resolver::*;

/// One of the four discrete attachment directions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Selects the side whose 90° sector contains `degrees`.
    ///
    /// Sectors are centered on 0° (right), 90° (bottom), 180° (left) and
    /// 270° (top). Lower sector bounds are inclusive.
    pub fn from_angle(degrees: f64) -> Side {
        let a = degrees.rem_euclid(360.0);
        if !(45.0..315.0).contains(&a) {
            Side::Right
        } else if a < 135.0 {
            Side::Bottom
        } else if a < 225.0 {
            Side::Left
        } else {
            Side::Top
        }
    }

    /// Unit vector pointing away from the node through this side.
    pub fn normal(self) -> Point {
        match self {
            Side::Top => Point::new(0.0, -1.0),
            Side::Right => Point::new(1.0, 0.0),
            Side::Bottom => Point::new(0.0, 1.0),
            Side::Left => Point::new(-1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visual footprint of a rendered node.
///
/// A node's icon is not drawn at `position` but inset by `padding`, so its
/// center sits at `position + (padding + icon_radius, padding + icon_radius)`.
/// Edges attach on a circle of `perimeter_radius` around that center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeGeometry {
    pub padding: f64,
    pub icon_radius: f64,
    pub perimeter_radius: f64,
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            padding: 12.0,
            icon_radius: 28.0,
            perimeter_radius: 30.0,
        }
    }
}

impl NodeGeometry {
    pub fn center(&self, position: Point) -> Point {
        let inset = self.padding + self.icon_radius;
        position + Point::new(inset, inset)
    }

    /// The perimeter point of a node centered at `center` on `side`.
    pub fn anchor(&self, center: Point, side: Side) -> Point {
        center + side.normal() * self.perimeter_radius
    }
}

/// Looks up the geometry a node of a given kind renders with.
pub trait GeometryLookup {
    fn geometry_for(&self, kind: NodeKind) -> NodeGeometry;
}

impl GeometryLookup for NodeGeometry {
    fn geometry_for(&self, _kind: NodeKind) -> NodeGeometry {
        *self
    }
}
