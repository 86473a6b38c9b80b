//! The interaction surface: owns the live graph, turns gestures into graph
//! mutations and derives a fresh [`Scene`] on demand.

use crate::config::{CanvasConfig, DeletePolicy};
use crate::geometry::GeometryCache;
use crate::graph::{Edge, Graph, Node, NodeKind, NodePayload, Point};
use crate::workflow::{self, Workflow};
use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

mod scene;
mod viewport;

pub use scene::{RenderedEdge, RenderedNode, Scene};
pub use viewport::Viewport;

/// Whether the canvas accepts mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasMode {
    #[default]
    Editable,
    /// Only rendering, hover and expand interactions are allowed.
    ReadOnly,
}

/// Called with the root graph after every structural change.
pub type ChangeListener = Box<dyn FnMut(&Graph)>;

pub struct Canvas {
    root: Graph,
    /// Icon node ids leading from the root to the graph being edited.
    focus: Vec<String>,
    mode: CanvasMode,
    config: CanvasConfig,
    next_node_seq: u64,
    listeners: Vec<ChangeListener>,
    cache: Option<RefCell<GeometryCache>>,
}

pub struct CanvasBuilder {
    graph: Graph,
    config: CanvasConfig,
    mode: CanvasMode,
    listeners: Vec<ChangeListener>,
}

impl CanvasBuilder {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            config: CanvasConfig::default(),
            mode: CanvasMode::Editable,
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mode(mut self, mode: CanvasMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn read_only(self) -> Self {
        self.with_mode(CanvasMode::ReadOnly)
    }

    pub fn on_change(mut self, listener: impl FnMut(&Graph) + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Canvas {
        let cache = self
            .config
            .memoize_geometry
            .then(|| RefCell::new(GeometryCache::new(self.config.geometry_tolerance)));
        Canvas {
            root: self.graph,
            focus: Vec::new(),
            mode: self.mode,
            config: self.config,
            next_node_seq: 0,
            listeners: self.listeners,
            cache,
        }
    }
}

impl Canvas {
    pub fn builder(graph: Graph) -> CanvasBuilder {
        CanvasBuilder::new(graph)
    }

    /// An editable canvas with the default configuration.
    pub fn new(graph: Graph) -> Self {
        CanvasBuilder::new(graph).build()
    }

    // --- Mode ---

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    /// Switches mode. The graph contents are untouched.
    pub fn set_mode(&mut self, mode: CanvasMode) {
        self.mode = mode;
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == CanvasMode::ReadOnly
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn on_change(&mut self, listener: impl FnMut(&Graph) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // --- Graph access ---

    /// The root graph.
    pub fn graph(&self) -> &Graph {
        &self.root
    }

    /// The graph currently being edited: the root, or an open internal flow.
    pub fn focused_graph(&self) -> &Graph {
        graph_at(&self.root, &self.focus).unwrap_or(&self.root)
    }

    /// A frozen copy of the root graph.
    pub fn snapshot(&self) -> Graph {
        self.root.clone()
    }

    pub fn focus_path(&self) -> &[String] {
        &self.focus
    }

    // --- Mutations ---

    /// Adds a node of `kind` with its default payload and returns its id.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> Option<String> {
        if self.reject_if_read_only("add_node") {
            return None;
        }
        let id = self.allocate_node_id(kind)?;
        let graph = graph_at_mut(&mut self.root, &self.focus)?;
        graph.insert_node(Node::with_kind(id.clone(), kind, position));
        debug!(node_id = %id, kind = %kind, "Node added");
        self.notify();
        Some(id)
    }

    /// Handles a palette drop: decodes the kind carried in the drag payload and
    /// places the node at the drop point translated into canvas space.
    pub fn drop_node(&mut self, payload: &str, client: Point, viewport: &Viewport) -> Option<String> {
        let kind = match payload.parse::<NodeKind>() {
            Ok(kind) => kind,
            Err(unknown) => {
                debug!(payload = %unknown, "Ignoring drop with unknown node kind");
                return None;
            }
        };
        self.add_node(kind, viewport.client_to_canvas(client))
    }

    /// Connects two nodes and returns the id of the edge representing the
    /// connection. Connecting an existing `(source, target, handle)` again
    /// returns the existing edge and changes nothing.
    pub fn connect(&mut self, source: &str, target: &str, source_handle: Option<&str>) -> Option<String> {
        if self.reject_if_read_only("connect") {
            return None;
        }
        let graph = graph_at_mut(&mut self.root, &self.focus)?;

        let Some(source_node) = graph.node(source) else {
            debug!(from = source, to = target, "Ignoring connect from a missing node");
            return None;
        };
        if !graph.contains_node(target) {
            debug!(from = source, to = target, "Ignoring connect to a missing node");
            return None;
        }

        let handle = match (source_node.kind(), source_handle) {
            (NodeKind::Decision, handle) => handle,
            (_, Some(handle)) => {
                debug!(from = source, handle, "Dropping handle on a non-decision source");
                None
            }
            (_, None) => None,
        };

        if let Some(existing) = graph.find_connection(source, target, handle) {
            debug!(edge_id = %existing.id, "Connection already exists");
            return Some(existing.id.clone());
        }

        let mut edge = Edge::new(source, target, handle.map(str::to_string));
        // Snapshot edges may carry host-chosen ids that shadow the derived one.
        let mut attempt = 1;
        while graph.edge(&edge.id).is_some() {
            attempt += 1;
            edge.id = format!("{}~{}", Edge::id_for(source, target, handle), attempt);
        }
        if let Some(branch) = edge.branch() {
            if graph.outgoing(source).any(|e| e.branch() == Some(branch)) {
                warn!(from = source, branch = %branch, "Decision node now has more than one edge for this branch");
            }
        }

        let id = edge.id.clone();
        if !graph.insert_edge(edge) {
            warn!(edge_id = %id, "Edge id collides with a different connection");
            return None;
        }
        debug!(edge_id = %id, "Edge connected");
        self.notify();
        Some(id)
    }

    /// Moves a node. Incident edges are re-resolved on the next render.
    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        if self.reject_if_read_only("move_node") {
            return false;
        }
        let Some(node) = graph_at_mut(&mut self.root, &self.focus).and_then(|g| g.node_mut(id)) else {
            return false;
        };
        node.position = position;
        if let Some(cache) = &self.cache {
            cache.borrow_mut().invalidate_node(id);
        }
        self.notify();
        true
    }

    /// Replaces a node's payload. The new payload must be of the same kind.
    /// An icon payload without an internal flow keeps the existing one.
    pub fn update_payload(&mut self, id: &str, payload: NodePayload) -> bool {
        if self.reject_if_read_only("update_payload") {
            return false;
        }
        let Some(node) = graph_at_mut(&mut self.root, &self.focus).and_then(|g| g.node_mut(id)) else {
            return false;
        };
        if node.kind() != payload.kind() {
            debug!(node_id = %id, from = %node.kind(), to = %payload.kind(), "Rejecting payload of a different kind");
            return false;
        }
        let mut payload = payload;
        if let (NodePayload::Icon(new), NodePayload::Icon(old)) = (&mut payload, &mut node.payload) {
            if new.internal_flow.is_none() {
                new.internal_flow = old.internal_flow.take();
            }
        }
        node.payload = payload;
        self.notify();
        true
    }

    /// Deletes a node. Incident edges follow the configured [`DeletePolicy`];
    /// an icon node's internal flow is discarded with it.
    pub fn delete_node(&mut self, id: &str) -> Option<Node> {
        if self.reject_if_read_only("delete_node") {
            return None;
        }
        let policy = self.config.delete_policy;
        let graph = graph_at_mut(&mut self.root, &self.focus)?;
        let node = graph.remove_node(id)?;
        if policy == DeletePolicy::Cascade {
            let removed = graph.remove_edges_touching(id);
            debug!(node_id = %id, edges = removed.len(), "Cascade-deleted incident edges");
        }
        if let Some(cache) = &self.cache {
            cache.borrow_mut().invalidate_node(id);
        }
        debug!(node_id = %id, "Node deleted");
        self.notify();
        Some(node)
    }

    pub fn delete_edge(&mut self, id: &str) -> Option<Edge> {
        if self.reject_if_read_only("delete_edge") {
            return None;
        }
        let edge = graph_at_mut(&mut self.root, &self.focus)?.remove_edge(id)?;
        if let Some(cache) = &self.cache {
            cache.borrow_mut().invalidate_edge(id);
        }
        debug!(edge_id = %id, "Edge deleted");
        self.notify();
        Some(edge)
    }

    /// Removes edges with a missing endpoint from the focused graph.
    pub fn prune_dangling_edges(&mut self) -> usize {
        if self.reject_if_read_only("prune_dangling_edges") {
            return 0;
        }
        let Some(graph) = graph_at_mut(&mut self.root, &self.focus) else {
            return 0;
        };
        let removed = graph.prune_dangling_edges();
        if removed > 0 {
            debug!(removed, "Pruned dangling edges");
            self.notify();
        }
        removed
    }

    // --- Nested flows ---

    /// Opens an icon node's internal flow for editing. In editable mode an
    /// empty internal flow is created if the node has none.
    pub fn open_internal_flow(&mut self, icon_id: &str) -> bool {
        let editable = !self.is_read_only();
        let Some(graph) = graph_at_mut(&mut self.root, &self.focus) else {
            return false;
        };
        let Some(node) = graph.node_mut(icon_id) else {
            return false;
        };
        let NodePayload::Icon(icon) = &mut node.payload else {
            debug!(node_id = %icon_id, "Only icon nodes carry an internal flow");
            return false;
        };
        if icon.internal_flow.is_none() {
            if !editable {
                return false;
            }
            icon.internal_flow = Some(Graph::new());
        }
        self.focus.push(icon_id.to_string());
        self.clear_cache();
        debug!(node_id = %icon_id, depth = self.focus.len(), "Opened internal flow");
        true
    }

    /// Returns to the parent graph. Returns `false` when already at the root.
    pub fn close_internal_flow(&mut self) -> bool {
        let closed = self.focus.pop().is_some();
        if closed {
            self.clear_cache();
        }
        closed
    }

    // --- Rendering and export ---

    /// Derives the scene for the focused graph. Dangling edges are skipped.
    pub fn render(&self) -> Scene {
        let mut cache = self.cache.as_ref().map(|c| c.borrow_mut());
        let mut scene = Scene::build(self.focused_graph(), &self.config, cache.as_deref_mut());
        scene.read_only = self.is_read_only();
        scene
    }

    /// Serializes a frozen snapshot of the root graph into a [`Workflow`].
    pub fn export(&self) -> Workflow {
        let snapshot = self.snapshot();
        let mut workflow = workflow::serialize(&snapshot);
        workflow.exported_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_millis() as u64);
        info!(
            actors = workflow.actors.len(),
            steps = workflow.steps.len(),
            edges = workflow.edges.len(),
            diagnostics = workflow.diagnostics.len(),
            "Workflow exported"
        );
        workflow
    }

    // --- Internals ---

    fn reject_if_read_only(&self, operation: &str) -> bool {
        if self.is_read_only() {
            debug!(operation, "Ignoring mutation in read-only mode");
            true
        } else {
            false
        }
    }

    fn allocate_node_id(&mut self, kind: NodeKind) -> Option<String> {
        let graph = graph_at(&self.root, &self.focus)?;
        loop {
            self.next_node_seq += 1;
            let id = format!("{}-{}", kind, self.next_node_seq);
            if !graph.contains_node(&id) {
                return Some(id);
            }
        }
    }

    fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.borrow_mut().clear();
        }
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.root);
        }
    }
}

fn graph_at<'a>(graph: &'a Graph, path: &[String]) -> Option<&'a Graph> {
    match path.split_first() {
        None => Some(graph),
        Some((head, rest)) => graph_at(graph.node(head)?.internal_flow()?, rest),
    }
}

fn graph_at_mut<'a>(graph: &'a mut Graph, path: &[String]) -> Option<&'a mut Graph> {
    match path.split_first() {
        None => Some(graph),
        Some((head, rest)) => graph_at_mut(graph.node_mut(head)?.internal_flow_mut()?, rest),
    }
}
