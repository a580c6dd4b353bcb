//! MIP problem representation.

use serde::{Deserialize, Serialize};
use solver_core::{LpProblem, Sense};

use crate::error::{MipError, MipResult};

/// Pure integer linear program.
///
/// ```text
/// optimize    c^T x
/// subject to  A x <= b
///             x >= 0, x integer
/// ```
///
/// Field names follow the request format (`c`, `A`, `b`, `maximize`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MipProblem {
    /// Objective coefficients.
    pub c: Vec<f64>,

    /// Constraint rows.
    #[serde(rename = "A")]
    pub a: Vec<Vec<f64>>,

    /// Right-hand side.
    pub b: Vec<f64>,

    /// Maximize instead of minimize.
    #[serde(default)]
    pub maximize: bool,
}

impl MipProblem {
    /// Create a validated problem.
    pub fn new(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>, maximize: bool) -> MipResult<Self> {
        let prob = Self { c, a, b, maximize };
        prob.validate()?;
        Ok(prob)
    }

    /// Check dimensions and finiteness.
    ///
    /// Deserialized problems bypass [`MipProblem::new`], so the driver calls
    /// this again before solving.
    pub fn validate(&self) -> MipResult<()> {
        self.base_relaxation()
            .validate()
            .map_err(|e| MipError::InvalidProblem(e.to_string()))
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Optimization direction.
    pub fn sense(&self) -> Sense {
        Sense::from_maximize(self.maximize)
    }

    /// LP relaxation without any branching bounds.
    pub fn base_relaxation(&self) -> LpProblem {
        LpProblem::new(self.c.clone(), self.a.clone(), self.b.clone(), self.sense())
    }

    /// Check if a solution is integer-feasible within tolerance.
    pub fn is_integer_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.iter().all(|&val| fractionality(val) <= tol)
    }

    /// Check `A x <= b` and `x >= 0` within tolerance.
    pub fn satisfies_constraints(&self, x: &[f64], tol: f64) -> bool {
        if x.len() != self.num_vars() || x.iter().any(|&v| v < -tol) {
            return false;
        }
        self.a.iter().zip(&self.b).all(|(row, &rhs)| {
            let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
            lhs <= rhs + tol
        })
    }
}

/// Distance of a value to the nearest integer.
pub fn fractionality(val: f64) -> f64 {
    (val - val.round()).abs()
}
