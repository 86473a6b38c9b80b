//! Tests for side selection, anchor placement and the geometry cache.
mod common;
use flowcanvas::geometry::{FALLBACK_SIDES, GeometryCache};
use flowcanvas::prelude::*;

fn sides(a: (f64, f64), b: (f64, f64)) -> SidePair {
    resolve_sides(Point::new(a.0, a.1), Point::new(b.0, b.1))
}

#[test]
fn test_horizontal_nodes_connect_right_to_left() {
    let geometry = NodeGeometry::default();
    let resolved = resolve_edge(
        &geometry,
        Point::new(0.0, 0.0),
        &geometry,
        Point::new(300.0, 0.0),
    );

    assert_eq!(resolved.source_side, Side::Right);
    assert_eq!(resolved.target_side, Side::Left);
    // center = position + padding + icon radius = +40, anchor = center +/- perimeter radius
    assert_eq!(resolved.source_center, Point::new(40.0, 40.0));
    assert_eq!(resolved.source_anchor, Point::new(70.0, 40.0));
    assert_eq!(resolved.target_anchor, Point::new(310.0, 40.0));
}

#[test]
fn test_each_direction_selects_matching_sides() {
    let origin = (0.0, 0.0);
    let below = sides(origin, (0.0, 300.0));
    assert_eq!((below.source, below.target), (Side::Bottom, Side::Top));

    let above = sides(origin, (0.0, -300.0));
    assert_eq!((above.source, above.target), (Side::Top, Side::Bottom));

    let left = sides(origin, (-300.0, 0.0));
    assert_eq!((left.source, left.target), (Side::Left, Side::Right));

    let mostly_right = sides(origin, (300.0, 200.0));
    assert_eq!((mostly_right.source, mostly_right.target), (Side::Right, Side::Left));

    let mostly_down = sides(origin, (200.0, 300.0));
    assert_eq!((mostly_down.source, mostly_down.target), (Side::Bottom, Side::Top));
}

#[test]
fn test_sector_boundaries() {
    assert_eq!(Side::from_angle(0.0), Side::Right);
    assert_eq!(Side::from_angle(44.9), Side::Right);
    assert_eq!(Side::from_angle(45.0), Side::Bottom);
    assert_eq!(Side::from_angle(134.9), Side::Bottom);
    assert_eq!(Side::from_angle(135.0), Side::Left);
    assert_eq!(Side::from_angle(180.0), Side::Left);
    assert_eq!(Side::from_angle(-180.0), Side::Left);
    assert_eq!(Side::from_angle(-90.0), Side::Top);
    assert_eq!(Side::from_angle(-45.0), Side::Right);
    assert_eq!(Side::from_angle(-45.1), Side::Top);
    assert_eq!(Side::from_angle(405.0), Side::Bottom);
}

#[test]
fn test_coincident_centers_fall_back_without_nan() {
    let geometry = NodeGeometry::default();
    let resolved = resolve_edge(
        &geometry,
        Point::new(120.0, 80.0),
        &geometry,
        Point::new(120.0, 80.0),
    );

    assert_eq!(resolved.source_side, FALLBACK_SIDES.source);
    assert_eq!(resolved.target_side, FALLBACK_SIDES.target);
    assert!(resolved.source_anchor.x.is_finite() && resolved.source_anchor.y.is_finite());
    assert!(resolved.target_anchor.x.is_finite() && resolved.target_anchor.y.is_finite());
}

#[test]
fn test_resolution_is_deterministic() {
    for i in 0..24 {
        let angle = (i as f64) * 15.0_f64.to_radians();
        let a = Point::new(13.0, -7.5);
        let b = Point::new(a.x + 250.0 * angle.cos(), a.y + 250.0 * angle.sin());
        assert_eq!(resolve_sides(a, b), resolve_sides(a, b));
    }
}

#[test]
fn test_target_side_matches_reverse_source_side() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(300.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(-40.0, 250.0),
        Point::new(-300.0, -299.0),
        Point::new(75.5, -12.25),
    ];
    for a in points {
        for b in points {
            if a == b {
                continue;
            }
            assert_eq!(
                resolve_sides(a, b).target,
                resolve_sides(b, a).source,
                "a = {:?}, b = {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_anchors_use_each_node_geometry() {
    let small = NodeGeometry::default();
    let large = NodeGeometry {
        padding: 0.0,
        icon_radius: 50.0,
        perimeter_radius: 60.0,
    };
    let resolved = resolve_edge(&small, Point::new(0.0, 0.0), &large, Point::new(400.0, 0.0));

    assert_eq!(resolved.target_center, Point::new(450.0, 50.0));
    assert_eq!(resolved.target_side, Side::Left);
    assert_eq!(resolved.target_anchor, Point::new(390.0, 50.0));
    assert_eq!(resolved.source_anchor, Point::new(70.0, 40.0));
}

#[test]
fn test_geometry_cache_hits_until_node_moves() {
    let geometry = NodeGeometry::default();
    let mut cache = GeometryCache::new(0.5);
    let a = Point::new(0.0, 0.0);
    let b = Point::new(300.0, 0.0);

    let first = cache.resolve("e", "A", "B", &geometry, a, &geometry, b);
    let second = cache.resolve("e", "A", "B", &geometry, a, &geometry, b);
    assert_eq!(first, second);
    assert_eq!(cache.stats(), (1, 1));

    let moved = cache.resolve("e", "A", "B", &geometry, a, &geometry, Point::new(0.0, 300.0));
    assert_eq!(moved.source_side, Side::Bottom);
    assert_eq!(cache.stats(), (1, 2));

    cache.invalidate_node("B");
    assert!(cache.is_empty());
}
