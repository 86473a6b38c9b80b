//! Tests for Bézier path construction, paint and hit-testing.
mod common;
use flowcanvas::path::gradient_stops;
use flowcanvas::prelude::*;

fn path_between(a: Point, b: Point) -> (ResolvedEdge, EdgePath) {
    let geometry = NodeGeometry::default();
    let resolved = resolve_edge(&geometry, a, &geometry, b);
    let path = EdgePath::from_resolved(&resolved, &PathStyle::default());
    (resolved, path)
}

#[test]
fn test_horizontal_edge_path_string() {
    let (_, path) = path_between(Point::new(0.0, 0.0), Point::new(300.0, 0.0));

    // anchors 240 apart: offset = min(240 * 0.5, 120) = 120
    assert_eq!(path.control1, Point::new(190.0, 40.0));
    assert_eq!(path.control2, Point::new(190.0, 40.0));
    assert_eq!(path.to_svg(), "M 70,40 C 190,40 190,40 310,40");
}

#[test]
fn test_control_offset_is_capped() {
    let (_, path) = path_between(Point::new(0.0, 0.0), Point::new(1000.0, 0.0));

    assert_eq!(path.start, Point::new(70.0, 40.0));
    assert_eq!(path.end, Point::new(1010.0, 40.0));
    assert_eq!(path.control1, Point::new(190.0, 40.0));
    assert_eq!(path.control2, Point::new(890.0, 40.0));
}

#[test]
fn test_short_edge_scales_offset_with_distance() {
    // anchors 100 apart: offset = 50
    let (_, path) = path_between(Point::new(0.0, 0.0), Point::new(160.0, 0.0));

    assert_eq!(path.start, Point::new(70.0, 40.0));
    assert_eq!(path.end, Point::new(170.0, 40.0));
    assert_eq!(path.control1, Point::new(120.0, 40.0));
    assert_eq!(path.control2, Point::new(120.0, 40.0));
}

#[test]
fn test_control_points_follow_side_normals() {
    let (resolved, path) = path_between(Point::new(0.0, 0.0), Point::new(0.0, 400.0));

    assert_eq!(resolved.source_side, Side::Bottom);
    assert_eq!(resolved.target_side, Side::Top);
    assert_eq!(path.start, Point::new(40.0, 70.0));
    assert_eq!(path.end, Point::new(40.0, 410.0));
    assert_eq!(path.control1, Point::new(40.0, 190.0));
    assert_eq!(path.control2, Point::new(40.0, 290.0));
}

#[test]
fn test_curve_endpoints_and_midpoint() {
    let (_, path) = path_between(Point::new(0.0, 0.0), Point::new(300.0, 0.0));

    assert_eq!(path.point_at(0.0), path.start);
    assert_eq!(path.point_at(1.0), path.end);
    assert_eq!(path.midpoint(), Point::new(190.0, 40.0));
}

#[test]
fn test_gradient_fades_at_both_ends() {
    let style = PathStyle::default();
    let stops = gradient_stops(&style);

    let offsets: Vec<f64> = stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.12, 0.5, 0.88, 1.0]);
    assert_eq!(stops.first().map(|s| s.opacity), Some(0.0));
    assert_eq!(stops.last().map(|s| s.opacity), Some(0.0));
    assert!(stops[1..4].iter().all(|s| s.opacity == style.peak_opacity));
}

#[test]
fn test_paint_spans_the_path_and_places_arrowhead() {
    let style = PathStyle::default();
    let (resolved, path) = path_between(Point::new(0.0, 0.0), Point::new(300.0, 0.0));
    let paint = EdgePaint::new(&path, resolved.target_side, &style);

    assert_eq!(paint.gradient.from, path.start);
    assert_eq!(paint.gradient.to, path.end);
    assert!(paint.hit_width > paint.stroke_width);

    // arrow points along +x into the left side of the target
    assert_eq!(paint.arrowhead.tip, Point::new(310.0, 40.0));
    assert_eq!(paint.arrowhead.left, Point::new(302.0, 44.0));
    assert_eq!(paint.arrowhead.right, Point::new(302.0, 36.0));
}

#[test]
fn test_degenerate_path_still_has_finite_arrowhead() {
    let style = PathStyle::default();
    let (resolved, path) = path_between(Point::new(50.0, 50.0), Point::new(50.0, 50.0));
    let paint = EdgePaint::new(&path, resolved.target_side, &style);

    for p in [paint.arrowhead.tip, paint.arrowhead.left, paint.arrowhead.right] {
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}

#[test]
fn test_distance_to_path() {
    let (_, path) = path_between(Point::new(0.0, 0.0), Point::new(300.0, 0.0));

    assert!(path.distance_to(Point::new(190.0, 40.0)) < 1e-6);
    assert!((path.distance_to(Point::new(190.0, 50.0)) - 10.0).abs() < 1e-6);
    assert!(path.distance_to(Point::new(190.0, 400.0)) > 300.0);
}
