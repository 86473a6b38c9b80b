use thiserror::Error;

/// Errors that can occur while loading or saving a graph snapshot.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Failed to parse graph snapshot JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{node_id}' has an unknown kind: '{kind}'")]
    UnknownNodeKind { node_id: String, kind: String },

    #[error("Node id '{0}' appears more than once in the snapshot")]
    DuplicateNodeId(String),

    #[error("Edge id '{0}' appears more than once in the snapshot")]
    DuplicateEdgeId(String),

    #[error("Snapshot I/O failed for '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised when a canvas configuration is rejected.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Could not read configuration file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that can occur when converting a host-specific format into a `Graph`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
