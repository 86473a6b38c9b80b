use super::{Edge, Node};
use crate::error::SnapshotError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;

/// The node and edge collections of one canvas (or of one icon node's
/// internal flow). Order is only used for stable rendering and export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `{nodes, edges}` snapshot and checks id uniqueness, including
    /// inside nested internal flows.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let graph: Graph = serde_json::from_str(json)
            .map_err(|e| SnapshotError::JsonParseError(e.to_string()))?;
        graph.validate()?;
        Ok(graph)
    }

    /// Loads a snapshot from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::JsonParseError(e.to_string()))
    }

    /// Writes the snapshot to a JSON file.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut node_ids = AHashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(SnapshotError::DuplicateNodeId(node.id.clone()));
            }
            if let Some(flow) = node.internal_flow() {
                flow.validate()?;
            }
        }
        let mut edge_ids = AHashSet::new();
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(SnapshotError::DuplicateEdgeId(edge.id.clone()));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_ids(&self) -> AHashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Inserts a node unless its id is already taken.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.contains_node(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Inserts an edge unless an edge with the same id or the same
    /// `(source, target, handle)` triple already exists.
    pub fn insert_edge(&mut self, edge: Edge) -> bool {
        let duplicate = self.edges.iter().any(|e| {
            e.id == edge.id
                || e.same_connection(&edge.source, &edge.target, edge.source_handle.as_deref())
        });
        if duplicate {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Finds the edge that already represents a connection, if any.
    pub fn find_connection(&self, source: &str, target: &str, handle: Option<&str>) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.same_connection(source, target, handle))
    }

    /// Removes a node. Incident edges are left in place.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Removes every edge that references `node_id` on either end.
    pub fn remove_edges_touching(&mut self, node_id: &str) -> Vec<Edge> {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.touches(node_id));
        self.edges = kept;
        removed
    }

    /// Outgoing edges of a node in insertion order, dangling ones included.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Whether either endpoint of `edge` is missing from this graph.
    pub fn is_dangling(&self, edge: &Edge) -> bool {
        !self.contains_node(&edge.source) || !self.contains_node(&edge.target)
    }

    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids = self.node_ids();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Explicitly purges dangling edges and returns how many were removed.
    pub fn prune_dangling_edges(&mut self) -> usize {
        let ids: AHashSet<String> = self.nodes.iter().map(|n| n.id.clone()).collect();
        let before = self.edges.len();
        self.edges
            .retain(|e| ids.contains(&e.source) && ids.contains(&e.target));
        before - self.edges.len()
    }
}
