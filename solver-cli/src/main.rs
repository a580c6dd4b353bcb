//! Command-line front end for the MILP solver.

mod problems;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use solver_core::SolverSettings;
use solver_mip::{spawn, BranchingRule, MipSettings, MipSolution, SolveRequest, SolverMessage};

use problems::DemoProblem;

/// Solve pure integer linear programs with best-first branch-and-bound.
#[derive(Parser, Debug)]
#[command(name = "solver-cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a JSON request file
    Solve {
        /// Request file: {"problem": {"c", "A", "b", "maximize"}, ...}
        request: PathBuf,

        #[command(flatten)]
        opts: SolveOpts,
    },

    /// Solve one of the built-in problems
    Demo {
        #[arg(value_enum)]
        problem: DemoProblem,

        #[command(flatten)]
        opts: SolveOpts,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct SolveOpts {
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Print the search tree
    #[arg(long)]
    tree: bool,

    /// Wall-clock limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Branching variable selection (overrides the request)
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Node budget (overrides the request)
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Simplex pivot budget per node relaxation
    #[arg(long)]
    max_lp_iter: Option<usize>,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Strategy {
    MostFractional,
    FirstFractional,
    MaxCoefficient,
}

impl From<Strategy> for BranchingRule {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::MostFractional => BranchingRule::MostFractional,
            Strategy::FirstFractional => BranchingRule::FirstFractional,
            Strategy::MaxCoefficient => BranchingRule::MaxCoefficient,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Solve { opts, .. } | Command::Demo { opts, .. } => opts.verbose,
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "info" } else { "warn" }),
    )
    .init();

    match cli.command {
        Command::Solve { request, opts } => {
            let text = fs::read_to_string(&request)
                .with_context(|| format!("Failed to read {}", request.display()))?;
            let parsed: SolveRequest = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse request {}", request.display()))?;
            run(parsed, &opts)
        }
        Command::Demo { problem, opts } => {
            if !opts.json {
                println!("{}", problem.name());
                println!("{}\n", problem.description());
            }
            let prob = problem
                .problem()
                .with_context(|| format!("Invalid demo problem {:?}", problem))?;
            run(SolveRequest::new(prob), &opts)
        }
    }
}

/// Apply command-line overrides to a request.
fn apply_overrides(mut request: SolveRequest, opts: &SolveOpts) -> (SolveRequest, MipSettings) {
    if let Some(strategy) = opts.strategy {
        request.branch_strategy = strategy.into();
    }
    if let Some(max_nodes) = opts.max_nodes {
        request.max_nodes = Some(max_nodes);
    }

    let mut settings = MipSettings {
        verbose: opts.verbose,
        ..MipSettings::default()
    };
    if let Some(seconds) = opts.time_limit {
        settings = settings.with_time_limit(seconds);
    }
    if let Some(max_iter) = opts.max_lp_iter {
        settings.lp_settings = SolverSettings::default().with_max_iter(max_iter);
    }
    (request, settings)
}

fn run(request: SolveRequest, opts: &SolveOpts) -> Result<()> {
    if let Some(seconds) = opts.time_limit {
        if seconds.is_nan() || seconds < 0.0 {
            bail!("--time-limit must be non-negative, got {}", seconds);
        }
    }

    let (request, settings) = apply_overrides(request, opts);
    log::info!(
        "Solving with {:?}, node budget {}",
        request.branch_strategy,
        request.max_nodes.unwrap_or(settings.max_nodes)
    );

    let handle = spawn(request, settings).context("Failed to start solver")?;
    let mut outcome = None;
    for message in handle.messages() {
        match message {
            SolverMessage::Progress(p) => log::info!(
                "Explored {} nodes ({}%), best {}",
                p.nodes_explored,
                p.percent,
                p.best_value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
            ),
            SolverMessage::Finished(result) => outcome = Some(result),
        }
    }

    let Some(result) = outcome else {
        bail!("Solver stopped without a result");
    };
    let solution = result.context("Solve failed")?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_summary(&solution);
        if opts.tree {
            print_tree(&solution);
        }
    }
    Ok(())
}

fn print_summary(sol: &MipSolution) {
    println!("Status:     {}", sol.status);
    match (&sol.x, sol.obj_val) {
        (Some(x), Some(obj)) => {
            let values: Vec<String> = x
                .iter()
                .enumerate()
                .map(|(i, v)| format!("x{} = {}", i + 1, v.round()))
                .collect();
            println!("Solution:   {}", values.join(", "));
            println!("Objective:  {}", format_value(obj));
        }
        _ => println!("Solution:   none"),
    }
    println!(
        "Nodes:      {} explored, {} pruned, {} created",
        sol.nodes_explored,
        sol.nodes_pruned,
        sol.tree.len()
    );
    match sol.lp_relaxation {
        Some(lp) => println!("LP bound:   {}", format_value(lp)),
        None => println!("LP bound:   none"),
    }
    println!(
        "Gap:        {:.2}% (root relaxation {:.2}%)",
        sol.gap, sol.integrality_gap
    );
    if let Some(limit) = sol.limit {
        println!("Stopped by: {:?}", limit);
    }
    if sol.nodes_stalled > 0 {
        println!("Stalled:    {} relaxations hit the pivot budget", sol.nodes_stalled);
    }
    println!("Time:       {} ms", sol.solve_time_ms);
}

fn print_tree(sol: &MipSolution) {
    println!("\nSearch tree:");
    for node in &sol.tree {
        println!(
            "{:indent$}#{} {} [{:?}] {}",
            "",
            node.id,
            node.branch_desc.as_deref().unwrap_or("root"),
            node.node_type,
            node.lp_value.map_or_else(|| "-".to_string(), format_value),
            indent = 2 + node.depth * 2
        );
    }
}

fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round())
    } else {
        format!("{:.4}", v)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "solver-cli",
            "solve",
            "request.json",
            "--json",
            "--strategy",
            "max-coefficient",
            "--max-nodes",
            "25",
        ])
        .unwrap();

        let Command::Solve { request, opts } = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(request, PathBuf::from("request.json"));
        assert!(opts.json);
        assert_eq!(opts.strategy, Some(Strategy::MaxCoefficient));
        assert_eq!(opts.max_nodes, Some(25));
    }

    #[test]
    fn test_parse_demo() {
        let cli = Cli::try_parse_from(["solver-cli", "demo", "facility", "--time-limit", "2.5"])
            .unwrap();

        let Command::Demo { problem, opts } = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(problem, DemoProblem::Facility);
        assert_eq!(opts.time_limit, Some(2.5));
        assert!(Cli::try_parse_from(["solver-cli", "demo", "sudoku"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let prob = DemoProblem::Knapsack.problem().unwrap();
        let mut request = SolveRequest::new(prob);
        request.max_nodes = Some(10);

        let opts = SolveOpts {
            strategy: Some(Strategy::FirstFractional),
            time_limit: Some(1.0),
            max_lp_iter: Some(50),
            ..SolveOpts::default()
        };
        let (request, settings) = apply_overrides(request, &opts);
        assert_eq!(settings.lp_settings.max_iter, 50);

        assert_eq!(request.branch_strategy, BranchingRule::FirstFractional);
        assert_eq!(request.max_nodes, Some(10));
        assert_eq!(settings.time_limit_ms, Some(1000));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(40.0), "40");
        assert_eq!(format_value(39.999999999999), "40");
        assert_eq!(format_value(41.25), "41.2500");
    }
}
