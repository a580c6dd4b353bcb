//! Simple LP example for the dense simplex solver.
//!
//! Solves:
//!   minimize    x1 + x2
//!   subject to  x1 + 2 x2 >= 3
//!               2 x1 + x2 >= 3
//!               x1, x2 >= 0
//!
//! Optimal solution: x1 = 1, x2 = 1, objective = 2.0
//!
//! Both rows have a negative right-hand side once written as `<=`, so the
//! solve goes through phase 1.

use solver_core::{solve, LpProblem, PivotRule, Sense, SolverSettings};

fn main() {
    println!("Simple LP Example");
    println!("=================");
    println!();

    // `>=` rows are negated into `row . x <= rhs`
    let prob = LpProblem::new(
        vec![1.0, 1.0],
        vec![vec![-1.0, -2.0], vec![-2.0, -1.0]],
        vec![-3.0, -3.0],
        Sense::Minimize,
    );

    for rule in [PivotRule::Dantzig, PivotRule::FirstProfitable] {
        let settings = SolverSettings::default().with_pivot_rule(rule);

        println!("Pivot rule: {:?}", rule);
        match solve(&prob, &settings) {
            Ok(result) => {
                println!("  Status:     {}", result.status);
                println!("  Objective:  {:.6}", result.obj_val);
                println!("  Solution:   {:?}", result.x);
                println!("  Pivots:     {}", result.iterations);
                println!("  Violation:  {:.2e}", prob.max_violation(&result.x));
            }
            Err(e) => println!("  Error: {}", e),
        }
        println!();
    }
}
