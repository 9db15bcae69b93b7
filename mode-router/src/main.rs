use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use mode_router::domain::{Cost, Route};
use mode_router::graph::GraphDocument;
use mode_router::logging::init_tracing;
use mode_router::planner::{PathOutcome, Planner, SearchConfig};
use mode_router::weighting::TransitionPenalty;

/// Find the cheapest multi-modal route through a JSON graph.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Graph document to load
    graph: PathBuf,

    /// Start node id
    start: String,

    /// Goal node id
    goal: String,

    /// Uniform mode-switch penalty, overriding the document's weighting
    #[arg(long, value_parser = parse_cost)]
    penalty: Option<Cost>,

    /// Give up after expanding this many states
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_cost(s: &str) -> Result<Cost, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Cost::new(value).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("Warning: failed to initialise logging: {e}");
    }

    let document = match GraphDocument::from_path(&cli.graph) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let (graph, weighting) = document.into_parts();
    let mut weighting = weighting.unwrap_or_default();
    if let Some(penalty) = cli.penalty {
        weighting = weighting.with_transition(TransitionPenalty::Uniform(penalty));
    }
    let config = SearchConfig::new(cli.max_expansions, cli.time_budget_ms);

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        start = %cli.start,
        goal = %cli.goal,
        "Planning route"
    );

    let planner = Planner::new(&graph, &weighting, &config);
    let result = match planner.find_path(&cli.start, &cli.goal) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    match result.outcome {
        PathOutcome::Found(route) => {
            if cli.json {
                match serde_json::to_string_pretty(&route) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_route(&route);
            }
            ExitCode::SUCCESS
        }
        PathOutcome::Unreachable => {
            println!("No path from {} to {}", cli.start, cli.goal);
            ExitCode::FAILURE
        }
        PathOutcome::Incomplete(limit) => {
            println!(
                "Search incomplete after {} expansions ({limit:?})",
                result.states_expanded
            );
            ExitCode::FAILURE
        }
    }
}

fn print_route(route: &Route<String>) {
    println!("Path: {}", route.nodes().join(" -> "));
    println!("Cost: {}", route.total_cost());
    println!("Mode switches: {}", route.mode_switches());
    for segment in route.segments() {
        let mode = segment.mode.as_ref().map_or("-", |m| m.as_str());
        println!(
            "  {mode:<10} {} -> {} ({} edges)",
            segment.origin(),
            segment.destination(),
            segment.len()
        );
    }
}
