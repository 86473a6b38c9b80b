//! The execution-oriented description exported from a graph snapshot.
//!
//! A [`Workflow`] lists the actors, one step per node (with generic `next`
//! adjacency and, for decisions, the interpreted `branches`) and a flat edge
//! list. It describes the shape of a process only; nothing here runs it.

use crate::graph::{ActorType, Branch, NodeKind};
use serde::{Deserialize, Serialize};

pub mod prompt;
mod serializer;

pub use prompt::render_prompt;
pub use serializer::{WorkflowSerializer, serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub actors: Vec<WorkflowActor>,
    pub steps: Vec<WorkflowStep>,
    pub edges: Vec<WorkflowEdge>,
    /// Ambiguities and skipped edges found while serializing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    /// Unix milliseconds at export time. Only set by `Canvas::export`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowActor {
    pub id: String,
    pub name: String,
    pub kind: ActorType,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub id: String,
    pub kind: NodeKind,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Branches>,
    pub next: Vec<String>,
    /// The serialized internal flow of an icon node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_workflow: Option<Box<Workflow>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Branches {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
}

impl Branches {
    pub fn get(&self, branch: Branch) -> Option<&str> {
        match branch {
            Branch::Yes => self.yes.as_deref(),
            Branch::No => self.no.as_deref(),
        }
    }

    fn slot(&mut self, branch: Branch) -> &mut Option<String> {
        match branch {
            Branch::Yes => &mut self.yes,
            Branch::No => &mut self.no,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Diagnostic {
    /// A decision node has more than one outgoing edge for the same branch.
    /// The first one in edge order is kept.
    AmbiguousBranch {
        node_id: String,
        handle: Branch,
        kept: String,
        ignored: String,
    },
    /// An edge references a node that does not exist and was left out.
    DanglingEdge {
        edge_id: String,
        missing: Vec<String>,
    },
}

impl Workflow {
    pub fn step(&self, id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn actor(&self, id: &str) -> Option<&WorkflowActor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
