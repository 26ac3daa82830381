//! Command-line front end for the waymark searches.
//!
//! Run: cargo run --bin waymark -- grid demos/maps/gap.txt --start 0,0 --target 4,4
//!
//! Pass `-v` (or set `RUST_LOG=debug`) to see every cell or vertex the
//! search checks.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use waymark_core::Point;
use waymark_demos::{load_graph, load_grid, parse_point};
use waymark_paths::{GridSearch, VisitPolicy, backtracking_route, dijkstra_route};

#[derive(Parser)]
#[command(name = "waymark", version, about = "Find routes through grids and graphs")]
struct Cli {
    /// Trace every visited cell or vertex.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Backtrack through a grid map (`0` = open).
    Grid {
        map: PathBuf,
        #[arg(long, value_parser = parse_point)]
        start: Point,
        #[arg(long, value_parser = parse_point)]
        target: Point,
        #[arg(long, value_enum, default_value_t = Policy::Monotonic)]
        policy: Policy,
    },
    /// Search a graph file between two labelled vertices.
    Graph {
        file: PathBuf,
        #[arg(long)]
        start: String,
        #[arg(long)]
        target: String,
        #[arg(long, value_enum, default_value_t = Algo::Dijkstra)]
        algo: Algo,
    },
    /// Print a graph file's adjacency list.
    Show { file: PathBuf },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Enter each cell once.
    Monotonic,
    /// Unclaim cells on backtrack; slow on open maps with no route.
    PathLocal,
}

impl From<Policy> for VisitPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::PathLocal => VisitPolicy::PathLocal,
            Policy::Monotonic => VisitPolicy::Monotonic,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algo {
    Backtracking,
    Dijkstra,
}

/// Runs the command; `Ok(false)` means the search found no path.
fn run(command: Command) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Grid {
            map,
            start,
            target,
            policy,
        } => {
            let grid = load_grid(&map)?;
            let search = GridSearch::new().with_policy(policy.into());
            let Some(path) = search.search(&grid, start, target)? else {
                return Ok(false);
            };
            println!("Path found:");
            for p in &path {
                println!(" {p}");
            }
            Ok(true)
        }
        Command::Graph {
            file,
            start,
            target,
            algo,
        } => {
            let graph = load_graph(&file)?;
            let from = graph
                .find(&start)
                .ok_or_else(|| format!("no vertex labelled {start:?}"))?;
            let to = graph
                .find(&target)
                .ok_or_else(|| format!("no vertex labelled {target:?}"))?;
            let route = match algo {
                Algo::Backtracking => backtracking_route(&graph, from, to)?,
                Algo::Dijkstra => dijkstra_route(&graph, from, to)?,
            };
            let Some(route) = route else {
                return Ok(false);
            };
            println!("Path found (cost {}):", route.cost());
            for label in route.labels(&graph)? {
                println!(" {label}");
            }
            Ok(true)
        }
        Command::Show { file } => {
            println!("{}", load_graph(&file)?);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("No path found");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(2)
        }
    }
}
