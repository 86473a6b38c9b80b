use crate::canvas::{Canvas, CanvasMode};
use crate::config::CanvasConfig;
use crate::graph::{Graph, NodeKind, Point};
use crate::render::scene_to_svg;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// A workflow canvas holding one graph.
///
/// Mutating methods return `None`/`False` instead of raising when the canvas
/// is read-only or the referenced nodes do not exist, mirroring how an
/// interactive editor tolerates invalid intermediate states.
#[pyclass(name = "FlowCanvas", unsendable)]
struct FlowCanvasPy {
    canvas: Canvas,
}

#[pymethods]
impl FlowCanvasPy {
    /// Mounts a canvas from a `{nodes, edges}` JSON snapshot.
    ///
    /// Args:
    ///     snapshot_json (str): The graph snapshot. Use "{}" for an empty canvas.
    ///     read_only (bool): Whether mutations are ignored.
    ///     config_json (str | None): Optional canvas configuration.
    ///
    /// Raises:
    ///     ValueError: If the snapshot or configuration cannot be parsed.
    #[new]
    #[pyo3(signature = (snapshot_json, read_only = false, config_json = None))]
    fn new(snapshot_json: &str, read_only: bool, config_json: Option<&str>) -> PyResult<Self> {
        let graph =
            Graph::from_json(snapshot_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let config = match config_json {
            Some(json) => {
                CanvasConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => CanvasConfig::default(),
        };
        let mode = if read_only {
            CanvasMode::ReadOnly
        } else {
            CanvasMode::Editable
        };
        let canvas = Canvas::builder(graph)
            .with_config(config)
            .with_mode(mode)
            .build();
        Ok(FlowCanvasPy { canvas })
    }

    /// Adds a node of the given kind ("step", "decision", "actor", "icon").
    fn add_node(&mut self, kind: &str, x: f64, y: f64) -> PyResult<Option<String>> {
        let kind: NodeKind = kind
            .parse()
            .map_err(|k| PyValueError::new_err(format!("unknown node kind '{}'", k)))?;
        Ok(self.canvas.add_node(kind, Point::new(x, y)))
    }

    #[pyo3(signature = (source, target, source_handle = None))]
    fn connect(&mut self, source: &str, target: &str, source_handle: Option<&str>) -> Option<String> {
        self.canvas.connect(source, target, source_handle)
    }

    fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.canvas.move_node(id, Point::new(x, y))
    }

    fn delete_node(&mut self, id: &str) -> bool {
        self.canvas.delete_node(id).is_some()
    }

    fn delete_edge(&mut self, id: &str) -> bool {
        self.canvas.delete_edge(id).is_some()
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.canvas.set_mode(if read_only {
            CanvasMode::ReadOnly
        } else {
            CanvasMode::Editable
        });
    }

    /// Returns the root graph as a JSON snapshot.
    fn snapshot_json(&self) -> PyResult<String> {
        self.canvas
            .graph()
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Exports the workflow description as JSON.
    fn export_json(&self) -> PyResult<String> {
        self.canvas
            .export()
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Renders the focused graph as an SVG document.
    fn render_svg(&self) -> String {
        scene_to_svg(&self.canvas.render())
    }
}

/// Python bindings for the flowcanvas graph model, edge geometry and
/// workflow serializer.
#[pymodule]
fn flowcanvas(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FlowCanvasPy>()?;
    Ok(())
}
