//! Dense simplex solver for LP relaxations.
//!
//! Solves linear programs of the form
//!
//! ```text
//! optimize    c^T x
//! subject to  A x <= b
//!             x >= 0
//! ```
//!
//! with the tableau form of the primal simplex method. Rows with a negative
//! right-hand side are handled by a genuine first phase over artificial
//! variables, so infeasible systems are reported as such rather than
//! misclassified.
//!
//! # Example
//!
//! ```
//! use solver_core::{solve, LpProblem, Sense, SolverSettings, SolveStatus};
//!
//! // max x + y s.t. 2x + y <= 4, x + 2y <= 4
//! let prob = LpProblem::new(
//!     vec![1.0, 1.0],
//!     vec![vec![2.0, 1.0], vec![1.0, 2.0]],
//!     vec![4.0, 4.0],
//!     Sense::Maximize,
//! );
//!
//! let result = solve(&prob, &SolverSettings::default()).unwrap();
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert!((result.obj_val - 8.0 / 3.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod problem;
pub mod simplex;

pub use error::{LpError, LpResult};
pub use problem::{LpProblem, LpSolution, PivotRule, Sense, SolveStatus, SolverSettings};

/// Main solve entry point.
///
/// Validates the problem, then runs both simplex phases.
pub fn solve(problem: &LpProblem, settings: &SolverSettings) -> LpResult<LpSolution> {
    problem.validate()?;
    Ok(simplex::solve_two_phase(problem, settings))
}
