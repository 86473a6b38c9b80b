//! # FlowCanvas - Visual Workflow Graph Core
//!
//! **FlowCanvas** is the model and geometry core behind a visual workflow
//! editor. It keeps a typed node/edge graph, decides where two nodes visually
//! connect and how the connecting curve is drawn, and serializes the free-form
//! graph into a structured workflow description with branching semantics for
//! decision nodes.
//!
//! ## Core Workflow
//!
//! 1.  **Mount a Graph**: Parse the host's `{nodes, edges}` snapshot (or implement
//!     `IntoGraph` for your own format) and build a `Canvas` with `Canvas::builder`.
//! 2.  **Edit**: Translate user gestures into `add_node`, `connect`, `move_node`
//!     and the delete operations. Change listeners receive the graph after every
//!     structural change.
//! 3.  **Render**: `Canvas::render` derives a `Scene` with resolved anchor sides,
//!     cubic Bézier paths and their tapered paint. Nothing is cached unless asked.
//! 4.  **Export**: `Canvas::export` serializes a frozen snapshot into a `Workflow`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowcanvas::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut canvas = Canvas::builder(Graph::new())
//!         .on_change(|graph| println!("graph now has {} node(s)", graph.nodes.len()))
//!         .build();
//!
//!     let a = canvas.add_node(NodeKind::Step, Point::new(0.0, 0.0)).unwrap();
//!     let d = canvas.add_node(NodeKind::Decision, Point::new(300.0, 0.0)).unwrap();
//!     let y = canvas.add_node(NodeKind::Step, Point::new(600.0, -150.0)).unwrap();
//!     let n = canvas.add_node(NodeKind::Step, Point::new(600.0, 150.0)).unwrap();
//!
//!     canvas.connect(&a, &d, None);
//!     canvas.connect(&d, &y, Some("yes"));
//!     canvas.connect(&d, &n, Some("no"));
//!
//!     // Geometry and paths are derived from the current positions.
//!     let scene = canvas.render();
//!     for edge in &scene.edges {
//!         println!("{} -> {}: {}", edge.source, edge.target, edge.svg_path());
//!     }
//!
//!     // Export the workflow description.
//!     let workflow = canvas.export();
//!     println!("{}", workflow.to_json()?);
//!     println!("{}", render_prompt(&workflow));
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod path;
pub mod prelude;
pub mod render;
pub mod workflow;

#[cfg(feature = "python-bindings")]
mod python;
