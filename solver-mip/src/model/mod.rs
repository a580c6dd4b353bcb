//! Problem and solution types for MIP solver.

mod problem;
mod solution;

pub use problem::{fractionality, MipProblem};
pub use solution::{IncumbentTracker, MipSolution, MipStatus, SearchLimit};
