use crate::canvas::{RenderedEdge, RenderedNode, Scene};
use crate::graph::{NodeKind, Point, format_coord};
use std::fmt::Write;

/// Margin around the scene bounds, in canvas units.
const MARGIN: f64 = 40.0;

/// Renders a complete scene into a standalone SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let (min, max) = bounds(scene);
    let width = max.x - min.x;
    let height = max.y - min.y;

    let mut output = String::new();
    writeln!(
        &mut output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        format_coord(min.x),
        format_coord(min.y),
        format_coord(width),
        format_coord(height),
        format_coord(width),
        format_coord(height)
    )
    .unwrap();

    writeln!(&mut output, "  <defs>").unwrap();
    for (i, edge) in scene.edges.iter().enumerate() {
        format_gradient(&mut output, i, edge);
    }
    writeln!(&mut output, "  </defs>").unwrap();

    // Edges first so nodes paint over the faded endpoints.
    for (i, edge) in scene.edges.iter().enumerate() {
        format_edge(&mut output, i, edge);
    }
    for node in &scene.nodes {
        format_node(&mut output, node);
    }

    writeln!(&mut output, "</svg>").unwrap();
    output
}

fn format_gradient(output: &mut String, index: usize, edge: &RenderedEdge) {
    let gradient = &edge.paint.gradient;
    writeln!(
        output,
        r#"    <linearGradient id="edge-gradient-{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        index,
        format_coord(gradient.from.x),
        format_coord(gradient.from.y),
        format_coord(gradient.to.x),
        format_coord(gradient.to.y)
    )
    .unwrap();
    for stop in &gradient.stops {
        writeln!(
            output,
            r#"      <stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            format_coord(stop.offset * 100.0),
            xml_escape(&edge.paint.color),
            format_coord(stop.opacity)
        )
        .unwrap();
    }
    writeln!(output, "    </linearGradient>").unwrap();
}

fn format_edge(output: &mut String, index: usize, edge: &RenderedEdge) {
    let d = edge.svg_path();
    let paint = &edge.paint;
    writeln!(
        output,
        r#"  <g class="edge" data-id="{}">"#,
        xml_escape(&edge.id)
    )
    .unwrap();
    writeln!(
        output,
        r#"    <path d="{}" fill="none" stroke="transparent" stroke-width="{}" pointer-events="stroke"/>"#,
        d,
        format_coord(paint.hit_width)
    )
    .unwrap();
    writeln!(
        output,
        r#"    <path d="{}" fill="none" stroke="url(#edge-gradient-{})" stroke-width="{}" stroke-linecap="round" pointer-events="none"/>"#,
        d,
        index,
        format_coord(paint.stroke_width)
    )
    .unwrap();
    let arrow = &paint.arrowhead;
    writeln!(
        output,
        r#"    <polygon points="{} {} {}" fill="{}" fill-opacity="{}"/>"#,
        arrow.tip,
        arrow.left,
        arrow.right,
        xml_escape(&paint.color),
        format_coord(paint.arrow_opacity)
    )
    .unwrap();
    if let Some(handle) = &edge.handle {
        let mid = edge.path.midpoint();
        writeln!(
            output,
            r#"    <text x="{}" y="{}" class="edge-label" text-anchor="middle">{}</text>"#,
            format_coord(mid.x),
            format_coord(mid.y - 6.0),
            xml_escape(handle)
        )
        .unwrap();
    }
    writeln!(output, "  </g>").unwrap();
}

fn format_node(output: &mut String, node: &RenderedNode) {
    let fill = node
        .color
        .clone()
        .unwrap_or_else(|| kind_color(node.kind).to_string());
    writeln!(
        output,
        r#"  <g class="node node-{}" data-id="{}">"#,
        node.kind,
        xml_escape(&node.id)
    )
    .unwrap();
    writeln!(
        output,
        r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        format_coord(node.center.x),
        format_coord(node.center.y),
        format_coord(node.icon_radius),
        xml_escape(&fill)
    )
    .unwrap();
    if node.has_internal_flow {
        writeln!(
            output,
            r#"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-dasharray="4 3"/>"#,
            format_coord(node.center.x),
            format_coord(node.center.y),
            format_coord(node.perimeter_radius),
            xml_escape(&fill)
        )
        .unwrap();
    }
    writeln!(
        output,
        r#"    <text x="{}" y="{}" text-anchor="middle">{}</text>"#,
        format_coord(node.center.x),
        format_coord(node.center.y + node.perimeter_radius + 16.0),
        xml_escape(&node.label)
    )
    .unwrap();
    writeln!(output, "  </g>").unwrap();
}

fn kind_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Step => "#0ea5e9",
        NodeKind::Decision => "#f59e0b",
        NodeKind::Actor => "#10b981",
        NodeKind::Icon => "#6366f1",
    }
}

fn bounds(scene: &Scene) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut include = |p: Point, r: f64| {
        min = Point::new(min.x.min(p.x - r), min.y.min(p.y - r));
        max = Point::new(max.x.max(p.x + r), max.y.max(p.y + r));
    };

    for node in &scene.nodes {
        include(node.center, node.perimeter_radius);
    }
    for edge in &scene.edges {
        for p in [edge.path.control1, edge.path.control2] {
            include(p, 0.0);
        }
    }

    if !min.x.is_finite() {
        return (Point::ORIGIN, Point::new(MARGIN * 2.0, MARGIN * 2.0));
    }
    (
        min - Point::new(MARGIN, MARGIN),
        max + Point::new(MARGIN, MARGIN),
    )
}

/// Escapes text for use in XML attributes and content.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
