//! Error types for the MIP solver.

use thiserror::Error;

/// Errors that can occur during MIP solving.
///
/// Infeasible or stalled node relaxations are not errors; they only close
/// their subtree. These variants end the whole solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MipError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// The root relaxation is unbounded, so the integer program may be too
    #[error("Root LP relaxation is unbounded")]
    Unbounded,

    /// Relaxation backend rejected a node LP
    #[error("Relaxation failed: {0}")]
    RelaxationFailed(#[from] solver_core::LpError),

    /// Solver worker thread failed
    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Result type for MIP operations.
pub type MipResult<T> = Result<T, MipError>;
