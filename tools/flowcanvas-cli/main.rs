use clap::Parser;
use flowcanvas::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Renders and exports visual workflow graph snapshots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the `{nodes, edges}` snapshot JSON file
    snapshot_path: String,

    /// Optional path to a canvas configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Write an SVG rendering of the graph to this path
    #[arg(long)]
    svg: Option<String>,

    /// Write the exported workflow JSON to this path instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print the textual execution prompt after the workflow
    #[arg(short, long)]
    prompt: bool,

    /// Mount the canvas read-only
    #[arg(long)]
    read_only: bool,

    /// Remove dangling edges before rendering and exporting
    #[arg(long, conflicts_with = "read_only")]
    prune: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowcanvas=info,warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let graph = Graph::from_file(&cli.snapshot_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load snapshot '{}': {}",
            &cli.snapshot_path, e
        ))
    });
    let config = match &cli.config {
        Some(path) => CanvasConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e))),
        None => CanvasConfig::default(),
    };
    let load_duration = load_start.elapsed();

    let mut builder = Canvas::builder(graph).with_config(config);
    if cli.read_only {
        builder = builder.read_only();
    }
    let mut canvas = builder.build();

    if cli.prune {
        let removed = canvas.prune_dangling_edges();
        eprintln!("Pruned {} dangling edge(s).", removed);
    }

    // --- 2. Rendering ---
    let render_start = Instant::now();
    let scene = canvas.render();
    let render_duration = render_start.elapsed();

    if let Some(svg_path) = &cli.svg {
        fs::write(svg_path, scene_to_svg(&scene)).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write SVG '{}': {}", svg_path, e))
        });
        eprintln!("SVG written to '{}'.", svg_path);
    }

    // --- 3. Export ---
    let export_start = Instant::now();
    let workflow = canvas.export();
    let export_duration = export_start.elapsed();

    let json = workflow
        .to_json()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode workflow: {}", e)));
    match &cli.output {
        Some(path) => {
            fs::write(path, &json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write workflow '{}': {}", path, e))
            });
            eprintln!("Workflow written to '{}'.", path);
        }
        None => println!("{}", json),
    }

    if cli.prompt {
        println!("\n{}", render_prompt(&workflow));
    }

    // --- 4. Summary ---
    let graph = canvas.graph();
    eprintln!("\n--- Graph Summary ---");
    eprintln!("Nodes:               {}", graph.nodes.len());
    eprintln!("Edges:               {}", graph.edges.len());
    eprintln!("Rendered Edges:      {}", scene.edges.len());
    eprintln!("Dangling Edges:      {}", graph.dangling_edges().len());
    eprintln!("Diagnostics:         {}", workflow.diagnostics.len());

    eprintln!("\n--- Performance Summary ---");
    eprintln!("Snapshot Loading:    {:?}", load_duration);
    eprintln!("Scene Rendering:     {:?}", render_duration);
    eprintln!("Workflow Export:     {:?}", export_duration);
    eprintln!("-----------------------------");
    eprintln!("Total Execution:     {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
