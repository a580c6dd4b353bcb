//! Error types for the LP solver.

use thiserror::Error;

/// Errors raised before the simplex method starts.
///
/// Infeasibility, unboundedness and the iteration limit are solve outcomes,
/// reported through [`crate::SolveStatus`], not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LpError {
    /// Inconsistent problem dimensions
    #[error("Invalid dimensions: {0}")]
    Dimension(String),

    /// NaN or infinite coefficient
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Result type for LP operations.
pub type LpResult<T> = Result<T, LpError>;
