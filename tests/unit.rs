//! Unit tests for parsing, display formatting, errors and configuration.
mod common;
use common::*;
use flowcanvas::graph::format_coord;
use flowcanvas::prelude::*;

#[test]
fn test_node_kind_parsing() {
    assert_eq!("step".parse::<NodeKind>(), Ok(NodeKind::Step));
    assert_eq!(" Decision\n".parse::<NodeKind>(), Ok(NodeKind::Decision));
    assert_eq!("ICON".parse::<NodeKind>(), Ok(NodeKind::Icon));
    assert_eq!("widget".parse::<NodeKind>(), Err("widget".to_string()));

    for kind in NodeKind::ALL {
        assert_eq!(kind.to_string().parse::<NodeKind>(), Ok(kind));
    }
}

#[test]
fn test_display_formats() {
    assert_eq!(Side::Right.to_string(), "right");
    assert_eq!(Side::Top.opposite(), Side::Bottom);
    assert_eq!(Branch::No.to_string(), "no");
    assert_eq!(Branch::parse("yes"), Some(Branch::Yes));
    assert_eq!(Branch::parse("maybe"), None);
    assert_eq!(Point::new(70.0, 40.5).to_string(), "70,40.5");
    assert_eq!(format_coord(1.0 / 3.0), "0.33");
    assert_eq!(format_coord(-12.0), "-12");
}

#[test]
fn test_edge_ids_are_derived_from_endpoints() {
    assert_eq!(Edge::id_for("a", "b", None), "edge-a-b");
    assert_eq!(Edge::id_for("a", "b", Some("no")), "edge-a-no-b");
    assert_eq!(Edge::new("a", "b", Some("no".to_string())).branch(), Some(Branch::No));
}

#[test]
fn test_edge_ids_escape_separators() {
    assert_eq!(Edge::id_for("step-1", "step-2", None), "edge-step~-1-step~-2");
    assert_ne!(Edge::id_for("a", "b-c", None), Edge::id_for("a-b", "c", None));
    assert_ne!(Edge::id_for("a", "b~-c", None), Edge::id_for("a~", "-c", None));
    assert_ne!(
        Edge::id_for("a", "b", Some("x-y")),
        Edge::id_for("a", "x-y-b", None)
    );
}

#[test]
fn test_error_messages() {
    let err = SnapshotError::DuplicateNodeId("A".to_string());
    assert_eq!(err.to_string(), "Node id 'A' appears more than once in the snapshot");

    let err = SnapshotError::UnknownNodeKind {
        node_id: "n1".to_string(),
        kind: "widget".to_string(),
    };
    assert_eq!(err.to_string(), "Node 'n1' has an unknown kind: 'widget'");

    let err = ConversionError::from(SnapshotError::DuplicateEdgeId("e1".to_string()));
    assert_eq!(err.to_string(), "Edge id 'e1' appears more than once in the snapshot");
}

#[test]
fn test_snapshot_rejects_unknown_kind() {
    let json = r#"{"nodes": [{"id": "n1", "type": "widget", "position": {"x": 0, "y": 0}}]}"#;
    let err = Graph::from_json(json).unwrap_err();

    assert!(matches!(err, SnapshotError::JsonParseError(_)));
    assert!(err.to_string().contains("unknown kind: 'widget'"));
}

#[test]
fn test_snapshot_rejects_duplicate_ids() {
    let json = r#"{"nodes": [
        {"id": "n1", "type": "step", "position": {"x": 0, "y": 0}},
        {"id": "n1", "type": "decision", "position": {"x": 100, "y": 0}}
    ]}"#;
    assert!(matches!(
        Graph::from_json(json),
        Err(SnapshotError::DuplicateNodeId(id)) if id == "n1"
    ));

    let json = r#"{"nodes": [], "edges": [
        {"id": "e", "source": "a", "target": "b"},
        {"id": "e", "source": "b", "target": "a"}
    ]}"#;
    assert!(matches!(
        Graph::from_json(json),
        Err(SnapshotError::DuplicateEdgeId(id)) if id == "e"
    ));
}

#[test]
fn test_snapshot_data_is_lenient() {
    let json = r#"{"nodes": [
        {"id": "s", "type": "step", "position": {"x": 1, "y": 2}, "data": {"role": "ignored"}},
        {"id": "a", "type": "actor", "position": {"x": 0, "y": 0}, "data": {"label": "Legacy Name", "actorType": "Digital"}},
        {"id": "i", "type": "icon"}
    ]}"#;
    let graph = Graph::from_json(json).unwrap();

    assert_eq!(graph.node("s").unwrap().label(), "New Step");
    assert_eq!(graph.node("s").unwrap().position, Point::new(1.0, 2.0));
    match &graph.node("a").unwrap().payload {
        NodePayload::Actor(actor) => {
            assert_eq!(actor.name, "Legacy Name");
            assert_eq!(actor.actor_type, ActorType::Digital);
        }
        other => panic!("expected actor payload, got {:?}", other),
    }
    assert_eq!(graph.node("i").unwrap().position, Point::ORIGIN);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_edge_without_id_gets_derived_id() {
    let json = r#"{"nodes": [], "edges": [
        {"source": "a", "target": "b", "sourceHandle": "yes"},
        {"id": "", "source": "b", "target": "c"}
    ]}"#;
    let graph = Graph::from_json(json).unwrap();

    assert_eq!(graph.edges[0].id, "edge-a-yes-b");
    assert_eq!(graph.edges[0].source_handle.as_deref(), Some("yes"));
    assert_eq!(graph.edges[1].id, "edge-b-c");
}

#[test]
fn test_graph_round_trips_through_json() {
    let graph = create_decision_graph();
    let json = graph.to_json().unwrap();

    assert!(json.contains("\"sourceHandle\": \"yes\""));
    assert_eq!(Graph::from_json(&json).unwrap(), graph);
}

#[test]
fn test_graph_dangling_helpers() {
    let mut graph = create_line_graph();
    graph.remove_node("B");

    assert_eq!(graph.dangling_edges().len(), 1);
    assert!(graph.is_dangling(&graph.edges[0]));
    assert_eq!(graph.prune_dangling_edges(), 1);
    assert!(graph.dangling_edges().is_empty());
}

#[test]
fn test_insert_edge_rejects_same_connection() {
    let mut graph = create_line_graph();
    let mut duplicate = Edge::new("A", "B", None);
    duplicate.id = "other-id".to_string();

    assert!(!graph.insert_edge(duplicate));
    assert!(graph.insert_edge(Edge::new("B", "A", None)));
    assert_eq!(graph.outgoing("B").count(), 1);
}

#[test]
fn test_default_config_is_valid() {
    let config = CanvasConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.delete_policy, DeletePolicy::RetainEdges);
    assert_eq!(config.geometry, NodeGeometry::default());
}

#[test]
fn test_config_from_json_with_overrides() {
    let json = r#"{
        "geometry": { "padding": 8 },
        "kindOverrides": { "decision": { "padding": 0, "iconRadius": 36, "perimeterRadius": 40 } },
        "path": { "maxOffset": 80 },
        "deletePolicy": "cascade"
    }"#;
    let config = CanvasConfig::from_json(json).unwrap();

    assert_eq!(config.geometry.padding, 8.0);
    assert_eq!(config.geometry.icon_radius, 28.0);
    assert_eq!(config.path.max_offset, 80.0);
    assert_eq!(config.path.curvature, 0.5);
    assert_eq!(config.delete_policy, DeletePolicy::Cascade);

    let canvas = Canvas::builder(create_decision_graph())
        .with_config(config)
        .build();
    let scene = canvas.render();
    assert_eq!(scene.node("D").unwrap().perimeter_radius, 40.0);
    assert_eq!(scene.node("Y").unwrap().perimeter_radius, 30.0);
}

#[test]
fn test_config_validation_errors() {
    let err = CanvasConfig::from_json(r#"{"geometry": {"iconRadius": 0}}"#).unwrap_err();
    assert!(matches!(&err, ConfigError::Invalid { field, .. } if field == "geometry.iconRadius"));

    let err = CanvasConfig::from_json(r#"{"path": {"fadeIn": 0.6}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = CanvasConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));

    let err = CanvasConfig::from_file("/nonexistent/canvas.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_config_validation_rejects_nan() {
    let mut config = CanvasConfig::default();
    config.path.stroke_width = f64::NAN;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "path.strokeWidth"));

    let mut config = CanvasConfig::default();
    config.geometry.perimeter_radius = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = CanvasConfig::default();
    config.path.arrow_size = f64::INFINITY;
    assert!(config.validate().is_err());

    let mut config = CanvasConfig::default();
    config.geometry_tolerance = f64::NAN;
    assert!(config.validate().is_err());

    let mut config = CanvasConfig::default();
    config.path.hit_width = f64::NAN;
    assert!(config.validate().is_err());
}
