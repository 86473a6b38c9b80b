use super::definition::Graph;
use crate::error::ConversionError;

/// A trait for host data models that can be converted into a canvas `Graph`.
///
/// Hosts rarely store their flows in exactly the `{nodes, edges}` shape the
/// canvas mounts. Implementing this trait on the host's own structs provides
/// the translation layer, and `Canvas::builder` accepts the result.
///
/// # Example
///
/// ```rust,no_run
/// use flowcanvas::prelude::*;
/// use flowcanvas::error::ConversionError;
///
/// struct Checklist { items: Vec<String> }
///
/// impl IntoGraph for Checklist {
///     fn into_graph(self) -> std::result::Result<Graph, ConversionError> {
///         if self.items.is_empty() {
///             return Err(ConversionError::ValidationError("empty checklist".into()));
///         }
///         let mut graph = Graph::new();
///         for (i, item) in self.items.iter().enumerate() {
///             let payload = NodePayload::Step(StepData { label: item.clone(), description: String::new() });
///             graph.insert_node(Node::new(format!("item-{}", i), Point::new(i as f64 * 200.0, 0.0), payload));
///             if i > 0 {
///                 graph.insert_edge(Edge::new(format!("item-{}", i - 1), format!("item-{}", i), None));
///             }
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a canvas graph.
    fn into_graph(self) -> Result<Graph, ConversionError>;
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        self.validate()?;
        Ok(self)
    }
}

/// A raw `{nodes, edges}` JSON snapshot.
impl IntoGraph for &str {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        Ok(Graph::from_json(self)?)
    }
}
