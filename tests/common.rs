//! Common test utilities for building graphs and snapshots.
use flowcanvas::prelude::*;

#[allow(dead_code)]
pub fn step(id: &str, x: f64, y: f64) -> Node {
    Node::new(
        id,
        Point::new(x, y),
        NodePayload::Step(StepData {
            label: format!("Do {}", id),
            description: String::new(),
        }),
    )
}

#[allow(dead_code)]
pub fn decision(id: &str, x: f64, y: f64) -> Node {
    Node::new(
        id,
        Point::new(x, y),
        NodePayload::Decision(DecisionData {
            label: format!("{}?", id),
        }),
    )
}

#[allow(dead_code)]
pub fn actor(id: &str, name: &str, role: &str, actor_type: ActorType) -> Node {
    Node::new(
        id,
        Point::new(0.0, 300.0),
        NodePayload::Actor(ActorData {
            name: name.to_string(),
            role: role.to_string(),
            actor_type,
        }),
    )
}

/// `A@(0,0) -> B@(300,0)`, both steps.
#[allow(dead_code)]
pub fn create_line_graph() -> Graph {
    Graph {
        nodes: vec![step("A", 0.0, 0.0), step("B", 300.0, 0.0)],
        edges: vec![Edge::new("A", "B", None)],
    }
}

/// Decision `D` branching to `Y` on "yes" and `N` on "no".
#[allow(dead_code)]
pub fn create_decision_graph() -> Graph {
    Graph {
        nodes: vec![
            decision("D", 0.0, 0.0),
            step("Y", 300.0, -200.0),
            step("N", 300.0, 200.0),
        ],
        edges: vec![
            Edge::new("D", "Y", Some("yes".to_string())),
            Edge::new("D", "N", Some("no".to_string())),
        ],
    }
}

/// A host snapshot in the `{nodes, edges}` wire format.
#[allow(dead_code)]
pub const SNAPSHOT_JSON: &str = r##"{
  "nodes": [
    { "id": "intake", "type": "step", "position": { "x": 0, "y": 0 },
      "data": { "label": "Receive request", "description": "From the web form", "role": "ignored" } },
    { "id": "clerk", "type": "actor", "position": { "x": 0, "y": 250 },
      "data": { "name": "Clerk", "role": "Reviewer", "actorType": "human" } },
    { "id": "bot", "type": "actor", "position": { "x": 250, "y": 250 },
      "data": { "name": "Triage Bot", "role": "Classifier", "actorType": "digital" } },
    { "id": "approved", "type": "decision", "position": { "x": 300, "y": 0 },
      "data": { "label": "Approved?" } },
    { "id": "archive", "type": "icon", "position": { "x": 600, "y": -150 },
      "data": { "icon": "database", "color": "#22c55e", "label": "Archive",
        "internalFlow": {
          "nodes": [
            { "id": "compress", "type": "step", "position": { "x": 0, "y": 0 }, "data": { "label": "Compress" } },
            { "id": "store", "type": "step", "position": { "x": 200, "y": 0 }, "data": { "label": "Store" } }
          ],
          "edges": [ { "source": "compress", "target": "store" } ]
        } } },
    { "id": "notify", "type": "step", "position": { "x": 600, "y": 150 },
      "data": { "label": "Notify requester" } }
  ],
  "edges": [
    { "id": "e1", "source": "intake", "target": "approved" },
    { "id": "e2", "source": "approved", "target": "archive", "sourceHandle": "yes" },
    { "id": "e3", "source": "approved", "target": "notify", "sourceHandle": "no" },
    { "id": "e4", "source": "notify", "target": "ghost" }
  ]
}"##;
