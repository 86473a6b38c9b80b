use clap::Parser;
use flowcanvas::graph::{
    ActorData, ActorType, DecisionData, Edge, Graph, IconData, Node, NodePayload, Point, StepData,
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// A CLI tool to generate random canvas snapshots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated snapshot JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Number of nodes to generate
    #[arg(short, long, default_value_t = 40)]
    nodes: usize,

    /// Fraction of nodes that are decisions
    #[arg(long, default_value_t = 0.2)]
    decision_ratio: f64,

    /// Number of edges pointing at nodes that do not exist
    #[arg(long, default_value_t = 0)]
    dangling: usize,

    /// Width and height of the square area nodes are scattered over
    #[arg(long, default_value_t = 2000.0)]
    extent: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.decision_ratio) {
        eprintln!(
            "Error: --decision-ratio ({}) must lie within [0, 1]",
            cli.decision_ratio
        );
        std::process::exit(1);
    }
    if cli.extent <= 0.0 {
        eprintln!("Error: --extent ({}) must be positive", cli.extent);
        std::process::exit(1);
    }

    println!(
        "Generating a graph with {} node(s) and {} dangling edge(s)...",
        cli.nodes, cli.dangling
    );

    let mut graph = Graph::new();
    for i in 0..cli.nodes {
        graph.insert_node(generate_node(&mut rng, i, cli.decision_ratio, cli.extent));
    }
    println!("-> Generated {} node(s).", graph.nodes.len());

    connect_nodes(&mut rng, &mut graph);
    println!("-> Generated {} edge(s).", graph.edges.len());

    for i in 0..cli.dangling {
        let source = format!("node-{}", rng.random_range(0..cli.nodes.max(1)));
        graph.insert_edge(Edge::new(source, format!("missing-{}", i), None));
    }

    graph.save(&cli.output)?;
    println!("Successfully generated and saved graph to '{}'", cli.output);
    Ok(())
}

fn generate_node(rng: &mut ThreadRng, index: usize, decision_ratio: f64, extent: f64) -> Node {
    let position = Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent));
    let payload = if rng.random_bool(decision_ratio) {
        NodePayload::Decision(DecisionData {
            label: format!("Check #{}?", index),
        })
    } else {
        match rng.random_range(0..10) {
            0 => NodePayload::Actor(ActorData {
                name: format!("Actor {}", index),
                role: "Operator".to_string(),
                actor_type: if rng.random_bool(0.5) {
                    ActorType::Digital
                } else {
                    ActorType::Human
                },
            }),
            1 => NodePayload::Icon(IconData {
                icon: "database".to_string(),
                color: "#6366f1".to_string(),
                label: Some(format!("Store {}", index)),
                internal_flow: None,
            }),
            _ => NodePayload::Step(StepData {
                label: format!("Step {}", index),
                description: String::new(),
            }),
        }
    };
    Node::new(format!("node-{}", index), position, payload)
}

/// Links every node to one or two later nodes; decisions get a yes and a no branch.
fn connect_nodes(rng: &mut ThreadRng, graph: &mut Graph) {
    let count = graph.nodes.len();
    let mut edges = Vec::new();
    for (i, node) in graph.nodes.iter().enumerate() {
        if i + 1 >= count {
            break;
        }
        let mut pick = || format!("node-{}", rng.random_range(i + 1..count));
        match node.payload {
            NodePayload::Decision(_) => {
                edges.push(Edge::new(node.id.clone(), pick(), Some("yes".to_string())));
                edges.push(Edge::new(node.id.clone(), pick(), Some("no".to_string())));
            }
            _ => edges.push(Edge::new(node.id.clone(), pick(), None)),
        }
    }
    for edge in edges {
        graph.insert_edge(edge);
    }
}
