use super::{Branches, Diagnostic, Workflow, WorkflowActor, WorkflowEdge, WorkflowStep};
use crate::graph::{Edge, Graph, Node, NodePayload};
use ahash::{AHashMap, AHashSet};
use tracing::warn;

/// Serializes a graph into a [`Workflow`]. Pure and deterministic: the input
/// is never mutated and equal graphs give equal output.
pub fn serialize(graph: &Graph) -> Workflow {
    WorkflowSerializer::new(graph).serialize()
}

struct EdgeScan<'a> {
    edges: Vec<WorkflowEdge>,
    branches: AHashMap<&'a str, Branches>,
    diagnostics: Vec<Diagnostic>,
}

/// Walks one graph (and, recursively, the internal flows of its icon nodes).
pub struct WorkflowSerializer<'a> {
    graph: &'a Graph,
    node_ids: AHashSet<&'a str>,
}

impl<'a> WorkflowSerializer<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            node_ids: graph.node_ids(),
        }
    }

    pub fn serialize(&self) -> Workflow {
        let scan = self.scan_edges();

        let actors = self
            .graph
            .nodes
            .iter()
            .filter_map(|node| match &node.payload {
                NodePayload::Actor(actor) => Some(WorkflowActor {
                    id: node.id.clone(),
                    name: actor.name.clone(),
                    kind: actor.actor_type,
                    role: actor.role.clone(),
                }),
                _ => None,
            })
            .collect();

        let steps = self
            .graph
            .nodes
            .iter()
            .map(|node| self.step_for(node, &scan.branches))
            .collect();

        Workflow {
            actors,
            steps,
            edges: scan.edges,
            diagnostics: scan.diagnostics,
            exported_at: None,
        }
    }

    /// One pass over the edges in storage order: the flat edge list, decision
    /// branches (first match wins) and every diagnostic, in edge order.
    fn scan_edges(&self) -> EdgeScan<'a> {
        let mut scan = EdgeScan {
            edges: Vec::new(),
            branches: AHashMap::new(),
            diagnostics: Vec::new(),
        };

        let graph = self.graph;
        for edge in &graph.edges {
            if !self.is_resolvable(edge) {
                scan.diagnostics.push(self.dangling(edge));
                continue;
            }
            scan.edges.push(WorkflowEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                condition: edge.source_handle.clone(),
            });

            let Some(branch) = edge.branch() else {
                continue;
            };
            let is_decision = graph
                .node(&edge.source)
                .is_some_and(|node| matches!(node.payload, NodePayload::Decision(_)));
            if !is_decision {
                continue;
            }

            let branches = scan.branches.entry(edge.source.as_str()).or_default();
            if let Some(kept) = branches.get(branch) {
                warn!(
                    node_id = %edge.source,
                    handle = %branch,
                    kept = %kept,
                    ignored = %edge.target,
                    "Decision node has more than one edge for the same branch"
                );
                scan.diagnostics.push(Diagnostic::AmbiguousBranch {
                    node_id: edge.source.clone(),
                    handle: branch,
                    kept: kept.to_string(),
                    ignored: edge.target.clone(),
                });
            } else {
                *branches.slot(branch) = Some(edge.target.clone());
            }
        }
        scan
    }

    fn step_for(&self, node: &Node, branches: &AHashMap<&str, Branches>) -> WorkflowStep {
        let next = self
            .graph
            .outgoing(&node.id)
            .filter(|edge| self.is_resolvable(edge))
            .map(|edge| edge.target.clone())
            .collect();

        let (actor_ref, role) = match &node.payload {
            NodePayload::Actor(actor) => (Some(node.id.clone()), Some(actor.role.clone())),
            _ => (None, None),
        };

        let branches = match &node.payload {
            NodePayload::Decision(_) => Some(
                branches
                    .get(node.id.as_str())
                    .cloned()
                    .unwrap_or_default(),
            ),
            _ => None,
        };

        let sub_workflow = node
            .internal_flow()
            .filter(|flow| !flow.nodes.is_empty())
            .map(|flow| Box::new(serialize(flow)));

        WorkflowStep {
            id: node.id.clone(),
            kind: node.kind(),
            action: node.label().to_string(),
            actor_ref,
            role,
            branches,
            next,
            sub_workflow,
        }
    }

    fn is_resolvable(&self, edge: &Edge) -> bool {
        self.node_ids.contains(edge.source.as_str()) && self.node_ids.contains(edge.target.as_str())
    }

    fn dangling(&self, edge: &Edge) -> Diagnostic {
        let mut missing: Vec<String> = Vec::new();
        for id in [&edge.source, &edge.target] {
            if !self.node_ids.contains(id.as_str()) && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        warn!(edge_id = %edge.id, missing = ?missing, "Excluding dangling edge from workflow");
        Diagnostic::DanglingEdge {
            edge_id: edge.id.clone(),
            missing,
        }
    }
}
