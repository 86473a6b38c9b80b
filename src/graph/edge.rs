use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A directed connection between two nodes, optionally tagged with a source
/// handle that discriminates decision branches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EdgeRecord")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        rename = "sourceHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
}

/// The two outcomes of a decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Yes,
    No,
}

impl Branch {
    pub fn as_str(self) -> &'static str {
        match self {
            Branch::Yes => "yes",
            Branch::No => "no",
        }
    }

    pub fn parse(handle: &str) -> Option<Self> {
        match handle {
            "yes" => Some(Branch::Yes),
            "no" => Some(Branch::No),
            _ => None,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Edge {
    /// Creates an edge whose id is derived from its endpoints and handle.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        source_handle: Option<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let id = Self::id_for(&source, &target, source_handle.as_deref());
        Self {
            id,
            source,
            target,
            source_handle,
        }
    }

    /// Deterministic edge id, so re-rendering the same connect gesture never
    /// produces a second edge.
    ///
    /// Components are joined with `-`. A `-` or `~` inside a component is
    /// escaped with `~`, so distinct triples never derive the same id.
    pub fn id_for(source: &str, target: &str, source_handle: Option<&str>) -> String {
        match source_handle {
            Some(handle) => format!(
                "edge-{}-{}-{}",
                escape_component(source),
                escape_component(handle),
                escape_component(target)
            ),
            None => format!(
                "edge-{}-{}",
                escape_component(source),
                escape_component(target)
            ),
        }
    }

    /// The decision branch this edge represents, if its handle is `yes` or `no`.
    pub fn branch(&self) -> Option<Branch> {
        self.source_handle.as_deref().and_then(Branch::parse)
    }

    /// Whether this edge connects the same endpoints through the same handle.
    pub fn same_connection(&self, source: &str, target: &str, handle: Option<&str>) -> bool {
        self.source == source && self.target == target && self.source_handle.as_deref() == handle
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[derive(Deserialize)]
struct EdgeRecord {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    #[serde(default, alias = "sourceHandle")]
    source_handle: Option<String>,
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| {
                Edge::id_for(&record.source, &record.target, record.source_handle.as_deref())
            });
        Edge {
            id,
            source: record.source,
            target: record.target,
            source_handle: record.source_handle,
        }
    }
}

fn escape_component(component: &str) -> Cow<'_, str> {
    if !component.contains(['-', '~']) {
        return Cow::Borrowed(component);
    }
    let mut escaped = String::with_capacity(component.len() + 4);
    for c in component.chars() {
        if c == '-' || c == '~' {
            escaped.push('~');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
