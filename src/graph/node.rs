use super::{Graph, Point};
use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of node kinds a canvas can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Step,
    Decision,
    Actor,
    Icon,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Step,
        NodeKind::Decision,
        NodeKind::Actor,
        NodeKind::Icon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Step => "step",
            NodeKind::Decision => "decision",
            NodeKind::Actor => "actor",
            NodeKind::Icon => "icon",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    /// Parses a kind identifier. Surrounding whitespace and ASCII case are ignored,
    /// which matches what arrives over a browser drag-data channel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" => Ok(NodeKind::Step),
            "decision" => Ok(NodeKind::Decision),
            "actor" => Ok(NodeKind::Actor),
            "icon" => Ok(NodeKind::Icon),
            other => Err(other.to_string()),
        }
    }
}

/// Whether an actor is a person or an automated system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Digital,
    #[default]
    Human,
}

impl ActorType {
    fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("digital") {
            ActorType::Digital
        } else {
            ActorType::Human
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActorType::Digital => "digital",
            ActorType::Human => "human",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepData {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionData {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActorData {
    pub name: String,
    pub role: String,
    pub actor_type: ActorType,
}

/// Payload of an icon node. The optional internal flow is owned by the node
/// and is discarded together with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconData {
    pub icon: String,
    pub color: String,
    pub label: Option<String>,
    pub internal_flow: Option<Graph>,
}

/// Kind-specific node data. The variant determines the node's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Step(StepData),
    Decision(DecisionData),
    Actor(ActorData),
    Icon(IconData),
}

impl NodePayload {
    /// The payload a freshly created node of `kind` starts with.
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Step => NodePayload::Step(StepData {
                label: "New Step".to_string(),
                description: String::new(),
            }),
            NodeKind::Decision => NodePayload::Decision(DecisionData {
                label: "Decision?".to_string(),
            }),
            NodeKind::Actor => NodePayload::Actor(ActorData {
                name: "New Actor".to_string(),
                role: String::new(),
                actor_type: ActorType::Human,
            }),
            NodeKind::Icon => NodePayload::Icon(IconData {
                icon: "circle".to_string(),
                color: "#6366f1".to_string(),
                label: None,
                internal_flow: None,
            }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Step(_) => NodeKind::Step,
            NodePayload::Decision(_) => NodeKind::Decision,
            NodePayload::Actor(_) => NodeKind::Actor,
            NodePayload::Icon(_) => NodeKind::Icon,
        }
    }

    /// The human-readable text a node displays and exports as its action.
    pub fn label(&self) -> &str {
        match self {
            NodePayload::Step(data) => &data.label,
            NodePayload::Decision(data) => &data.label,
            NodePayload::Actor(data) => &data.name,
            NodePayload::Icon(data) => data.label.as_deref().unwrap_or(&data.icon),
        }
    }
}

/// A typed, positioned vertex in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord", into = "NodeRecord")]
pub struct Node {
    pub id: String,
    pub position: Point,
    pub payload: NodePayload,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Point, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            position,
            payload,
        }
    }

    /// Creates a node carrying the default payload for `kind`.
    pub fn with_kind(id: impl Into<String>, kind: NodeKind, position: Point) -> Self {
        Self::new(id, position, NodePayload::default_for(kind))
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn label(&self) -> &str {
        self.payload.label()
    }

    pub fn internal_flow(&self) -> Option<&Graph> {
        match &self.payload {
            NodePayload::Icon(data) => data.internal_flow.as_ref(),
            _ => None,
        }
    }

    pub fn internal_flow_mut(&mut self) -> Option<&mut Graph> {
        match &mut self.payload {
            NodePayload::Icon(data) => data.internal_flow.as_mut(),
            _ => None,
        }
    }
}

// --- Wire format ---
// Nodes travel as `{id, type, position, data}`. `data` is a superset of every
// kind's fields so that fields meant for another kind are simply ignored.

#[derive(Serialize, Deserialize)]
struct NodeRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    position: Point,
    #[serde(default)]
    data: NodeData,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    internal_flow: Option<Graph>,
}

impl TryFrom<NodeRecord> for Node {
    type Error = SnapshotError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let kind: NodeKind = record
            .kind
            .parse()
            .map_err(|kind| SnapshotError::UnknownNodeKind {
                node_id: record.id.clone(),
                kind,
            })?;
        let data = record.data;

        let payload = match NodePayload::default_for(kind) {
            NodePayload::Step(defaults) => NodePayload::Step(StepData {
                label: data.label.unwrap_or(defaults.label),
                description: data.description.unwrap_or(defaults.description),
            }),
            NodePayload::Decision(defaults) => NodePayload::Decision(DecisionData {
                label: data.label.unwrap_or(defaults.label),
            }),
            NodePayload::Actor(defaults) => NodePayload::Actor(ActorData {
                name: data.name.or(data.label).unwrap_or(defaults.name),
                role: data.role.unwrap_or(defaults.role),
                actor_type: data
                    .actor_type
                    .as_deref()
                    .map(ActorType::parse_lenient)
                    .unwrap_or(defaults.actor_type),
            }),
            NodePayload::Icon(defaults) => NodePayload::Icon(IconData {
                icon: data.icon.unwrap_or(defaults.icon),
                color: data.color.unwrap_or(defaults.color),
                label: data.label,
                internal_flow: data.internal_flow,
            }),
        };

        Ok(Node {
            id: record.id,
            position: record.position,
            payload,
        })
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        let kind = node.kind().as_str().to_string();
        let data = match node.payload {
            NodePayload::Step(step) => NodeData {
                label: Some(step.label),
                description: Some(step.description),
                ..NodeData::default()
            },
            NodePayload::Decision(decision) => NodeData {
                label: Some(decision.label),
                ..NodeData::default()
            },
            NodePayload::Actor(actor) => NodeData {
                name: Some(actor.name),
                role: Some(actor.role),
                actor_type: Some(actor.actor_type.as_str().to_string()),
                ..NodeData::default()
            },
            NodePayload::Icon(icon) => NodeData {
                label: icon.label,
                icon: Some(icon.icon),
                color: Some(icon.color),
                internal_flow: icon.internal_flow,
                ..NodeData::default()
            },
        };
        NodeRecord {
            id: node.id,
            kind,
            position: node.position,
            data,
        }
    }
}
