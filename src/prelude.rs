//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! flowcanvas crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowcanvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = Graph::from_file("path/to/snapshot.json")?;
//! let config = CanvasConfig::from_file("path/to/canvas.json")?;
//!
//! let canvas = Canvas::builder(graph).with_config(config).read_only().build();
//! let svg = scene_to_svg(&canvas.render());
//! let workflow = canvas.export();
//!
//! println!("{} bytes of SVG, {} steps", svg.len(), workflow.steps.len());
//! # Ok(())
//! # }
//! ```

// Canvas and configuration
pub use crate::canvas::{Canvas, CanvasBuilder, CanvasMode, RenderedEdge, RenderedNode, Scene, Viewport};
pub use crate::config::{CanvasConfig, DeletePolicy};

// Graph model
pub use crate::graph::{
    ActorData, ActorType, Branch, DecisionData, Edge, Graph, IconData, IntoGraph, Node, NodeKind,
    NodePayload, Point, StepData,
};

// Geometry and paths
pub use crate::geometry::{NodeGeometry, ResolvedEdge, Side, SidePair, resolve_edge, resolve_sides};
pub use crate::path::{EdgePaint, EdgePath, PathStyle};

// Export
pub use crate::render::scene_to_svg;
pub use crate::workflow::{Branches, Diagnostic, Workflow, render_prompt, serialize};

// Error types
pub use crate::error::{ConfigError, ConversionError, SnapshotError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
