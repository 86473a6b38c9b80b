use crate::config::CanvasConfig;
use crate::geometry::{GeometryCache, GeometryLookup, ResolvedEdge, resolve_edge};
use crate::graph::{Graph, NodeKind, NodePayload, Point};
use crate::path::{EdgePaint, EdgePath};
use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

/// A node as it is painted: its icon circle and attachment perimeter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub center: Point,
    pub icon_radius: f64,
    pub perimeter_radius: f64,
    pub color: Option<String>,
    pub has_internal_flow: bool,
}

/// An edge with its derived geometry, curve and paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub handle: Option<String>,
    pub geometry: ResolvedEdge,
    pub path: EdgePath,
    pub paint: EdgePaint,
}

impl RenderedEdge {
    pub fn svg_path(&self) -> String {
        self.path.to_svg()
    }
}

/// Everything needed to paint one graph. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<RenderedNode>,
    pub edges: Vec<RenderedEdge>,
    pub read_only: bool,
}

impl Scene {
    /// Derives the scene for `graph`. Edges with a missing endpoint are skipped.
    pub fn build(graph: &Graph, config: &CanvasConfig, mut cache: Option<&mut GeometryCache>) -> Scene {
        let nodes: Vec<RenderedNode> = graph
            .nodes
            .iter()
            .map(|node| {
                let geometry = config.geometry_for(node.kind());
                let color = match &node.payload {
                    NodePayload::Icon(icon) => Some(icon.color.clone()),
                    _ => None,
                };
                RenderedNode {
                    id: node.id.clone(),
                    kind: node.kind(),
                    label: node.label().to_string(),
                    center: geometry.center(node.position),
                    icon_radius: geometry.icon_radius,
                    perimeter_radius: geometry.perimeter_radius,
                    color,
                    has_internal_flow: node.internal_flow().is_some_and(|g| !g.nodes.is_empty()),
                }
            })
            .collect();

        let index: AHashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let (Some(&si), Some(&ti)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                debug!(edge_id = %edge.id, "Skipping dangling edge during render");
                continue;
            };
            let source = &graph.nodes[si];
            let target = &graph.nodes[ti];
            let source_geometry = config.geometry_for(source.kind());
            let target_geometry = config.geometry_for(target.kind());

            let resolved = match cache.as_deref_mut() {
                Some(cache) => cache.resolve(
                    &edge.id,
                    &source.id,
                    &target.id,
                    &source_geometry,
                    source.position,
                    &target_geometry,
                    target.position,
                ),
                None => resolve_edge(
                    &source_geometry,
                    source.position,
                    &target_geometry,
                    target.position,
                ),
            };
            let path = EdgePath::from_resolved(&resolved, &config.path);
            let paint = EdgePaint::new(&path, resolved.target_side, &config.path);

            edges.push(RenderedEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                handle: edge.source_handle.clone(),
                geometry: resolved,
                path,
                paint,
            });
        }

        Scene {
            nodes,
            edges,
            read_only: false,
        }
    }

    pub fn edge(&self, id: &str) -> Option<&RenderedEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The edge whose hit path contains `point`, nearest first.
    pub fn edge_at(&self, point: Point) -> Option<&RenderedEdge> {
        self.edges
            .iter()
            .map(|e| (e, e.path.distance_to(point)))
            .filter(|(e, distance)| *distance <= e.paint.hit_width / 2.0)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(e, _)| e)
    }

    /// The topmost node whose perimeter contains `point`.
    pub fn node_at(&self, point: Point) -> Option<&RenderedNode> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.center.distance_to(point) <= n.perimeter_radius)
    }
}
