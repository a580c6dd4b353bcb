//! Branch-and-bound solver for pure integer linear programs.
//!
//! Solves
//!
//! ```text
//! optimize    c^T x
//! subject to  A x <= b
//!             x >= 0, x integer
//! ```
//!
//! with best-first branch-and-bound over LP relaxations solved by
//! [`solver_core`]. The full search tree is returned with the result.
//!
//! # Example
//!
//! ```
//! use solver_mip::{solve_mip, MipProblem, MipSettings, MipStatus};
//!
//! // max x + y s.t. 2x + y <= 4, x + 2y <= 4, x, y integer
//! let prob = MipProblem::new(
//!     vec![1.0, 1.0],
//!     vec![vec![2.0, 1.0], vec![1.0, 2.0]],
//!     vec![4.0, 4.0],
//!     true,
//! )
//! .unwrap();
//!
//! let solution = solve_mip(&prob, &MipSettings::default()).unwrap();
//! assert_eq!(solution.status, MipStatus::Optimal);
//! assert!((solution.obj_val.unwrap() - 2.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod master;
pub mod model;
pub mod progress;
pub mod search;
pub mod settings;
pub mod worker;

pub use error::{MipError, MipResult};
pub use master::{relax_node, MasterResult, MasterStatus, RelaxationBackend, SimplexBackend};
pub use model::{IncumbentTracker, MipProblem, MipSolution, MipStatus, SearchLimit};
pub use progress::{Progress, ProgressObserver};
pub use search::{
    select_branch_variable, BoundConstraint, BoundDirection, BranchAndBound, NodeType, SearchNode,
    SearchTree,
};
pub use settings::{BranchingRule, MipSettings};
pub use worker::{spawn, SolveHandle, SolveRequest, SolverMessage};

/// Solve an integer program.
pub fn solve_mip(prob: &MipProblem, settings: &MipSettings) -> MipResult<MipSolution> {
    solve_mip_observed(prob, settings, &mut ())
}

/// Solve an integer program, reporting progress to `observer`.
pub fn solve_mip_observed<O: ProgressObserver>(
    prob: &MipProblem,
    settings: &MipSettings,
    observer: &mut O,
) -> MipResult<MipSolution> {
    prob.validate()?;
    BranchAndBound::new(prob, settings.clone()).solve(observer)
}
