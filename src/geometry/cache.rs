use super::{NodeGeometry, ResolvedEdge, resolve_edge};
use crate::graph::Point;
use ahash::AHashMap;

type PositionKey = ((i64, i64), (i64, i64));

struct CacheEntry {
    source: String,
    target: String,
    key: PositionKey,
    resolved: ResolvedEdge,
}

/// Per-edge memo of resolved geometry.
///
/// Entries are keyed by the edge id and the endpoint positions rounded to
/// `tolerance`, so a lookup with moved endpoints recomputes on its own.
/// `invalidate_node` drops every entry incident to a node explicitly.
pub struct GeometryCache {
    tolerance: f64,
    entries: AHashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl GeometryCache {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            entries: AHashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &mut self,
        edge_id: &str,
        source_id: &str,
        target_id: &str,
        source_geometry: &NodeGeometry,
        source_position: Point,
        target_geometry: &NodeGeometry,
        target_position: Point,
    ) -> ResolvedEdge {
        let key = (
            source_position.rounded_to(self.tolerance),
            target_position.rounded_to(self.tolerance),
        );

        if let Some(entry) = self.entries.get(edge_id) {
            if entry.key == key && entry.source == source_id && entry.target == target_id {
                self.hits += 1;
                return entry.resolved;
            }
        }

        self.misses += 1;
        let resolved = resolve_edge(
            source_geometry,
            source_position,
            target_geometry,
            target_position,
        );
        self.entries.insert(
            edge_id.to_string(),
            CacheEntry {
                source: source_id.to_string(),
                target: target_id.to_string(),
                key,
                resolved,
            },
        );
        resolved
    }

    /// Drops all entries for edges touching `node_id`.
    pub fn invalidate_node(&mut self, node_id: &str) {
        self.entries
            .retain(|_, entry| entry.source != node_id && entry.target != node_id);
    }

    pub fn invalidate_edge(&mut self, edge_id: &str) {
        self.entries.remove(edge_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
