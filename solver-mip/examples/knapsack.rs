//! Walk through a small knapsack solve and print the search tree.
//!
//! Run with: cargo run -p solver-mip --example knapsack

use std::time::Instant;

use solver_core::{LpProblem, Sense, SolverSettings};
use solver_mip::{solve_mip_observed, MipProblem, MipSettings, Progress};

fn main() {
    println!("=== Knapsack Branch-and-Bound ===\n");
    println!("max 5x1 + 8x2 s.t. x1 + x2 <= 6, 5x1 + 9x2 <= 45, x integer\n");

    let c = vec![5.0, 8.0];
    let a = vec![vec![1.0, 1.0], vec![5.0, 9.0]];
    let b = vec![6.0, 45.0];

    // First the LP relaxation directly with solver-core
    let lp = LpProblem::new(c.clone(), a.clone(), b.clone(), Sense::Maximize);
    match solver_core::solve(&lp, &SolverSettings::default()) {
        Ok(result) => {
            println!("LP status: {}", result.status);
            println!("LP obj: {:.6}", result.obj_val);
            println!("LP x: {:?}\n", result.x);
        }
        Err(e) => println!("LP error: {}\n", e),
    }

    let prob = match MipProblem::new(c, a, b, true) {
        Ok(prob) => prob,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let settings = MipSettings {
        progress_freq: 1,
        ..MipSettings::default()
    };

    let start = Instant::now();
    let mut on_progress = |p: &Progress| {
        println!(
            "  explored {:>3} | best {:>8} | {:>3}%",
            p.nodes_explored,
            p.best_value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v)),
            p.percent
        );
    };
    let result = solve_mip_observed(&prob, &settings, &mut on_progress);
    let elapsed = start.elapsed();

    match result {
        Ok(sol) => {
            println!("\nStatus: {}", sol.status);
            if let (Some(x), Some(obj)) = (&sol.x, sol.obj_val) {
                println!("Objective: {:.6}", obj);
                println!("Solution: {:?}", x);
            }
            println!("Gap: {:.4}% (root LP gap {:.4}%)", sol.gap, sol.integrality_gap);
            println!("Nodes: {} explored, {} pruned\n", sol.nodes_explored, sol.nodes_pruned);

            for node in &sol.tree {
                println!(
                    "{:indent$}#{} {:<10} {:?} {}",
                    "",
                    node.id,
                    node.branch_desc.as_deref().unwrap_or("root"),
                    node.node_type,
                    node.lp_value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v)),
                    indent = node.depth * 2
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    println!("\nTime: {:.3}s", elapsed.as_secs_f64());
}
