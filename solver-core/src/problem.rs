//! Problem data structures and validation.
//!
//! This module defines the LP representation accepted by the simplex solver
//! and all associated types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LpError, LpResult};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    /// Minimize the objective.
    #[default]
    Minimize,
    /// Maximize the objective.
    Maximize,
}

impl Sense {
    /// Sense from a `maximize` flag.
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Sense::Maximize
        } else {
            Sense::Minimize
        }
    }

    /// Returns true for maximization.
    pub fn is_maximize(self) -> bool {
        matches!(self, Sense::Maximize)
    }

    /// Returns true if `candidate` is strictly better than `reference`.
    pub fn improves(self, candidate: f64, reference: f64) -> bool {
        match self {
            Sense::Maximize => candidate > reference,
            Sense::Minimize => candidate < reference,
        }
    }

    /// The worst possible objective value for this sense.
    pub fn worst_value(self) -> f64 {
        match self {
            Sense::Maximize => f64::NEG_INFINITY,
            Sense::Minimize => f64::INFINITY,
        }
    }
}

/// Linear program in inequality form.
///
/// The solver works with the formulation:
///
/// ```text
/// optimize    c^T x
/// subject to  A x <= b
///             x >= 0
/// ```
///
/// A `>=` row is passed by negating both the row and its right-hand side.
///
/// # Dimensions
///
/// - `n`: number of decision variables (length of c)
/// - `m`: number of constraint rows (length of b, number of rows in A)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpProblem {
    /// Objective coefficients (length n).
    pub c: Vec<f64>,

    /// Constraint rows (m rows of length n).
    pub a: Vec<Vec<f64>>,

    /// Right-hand side (length m).
    pub b: Vec<f64>,

    /// Optimization direction.
    pub sense: Sense,
}

impl LpProblem {
    /// Create a problem without validating it.
    pub fn new(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>, sense: Sense) -> Self {
        Self { c, a, b, sense }
    }

    /// Get the number of decision variables (n).
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Get the number of constraint rows (m).
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Append the row `coefs · x <= rhs`.
    pub fn push_row(&mut self, coefs: Vec<f64>, rhs: f64) {
        self.a.push(coefs);
        self.b.push(rhs);
    }

    /// Largest violation of `A x <= b` (zero if satisfied).
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        self.a
            .iter()
            .zip(&self.b)
            .map(|(row, &rhs)| {
                let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
                (lhs - rhs).max(0.0)
            })
            .fold(0.0_f64, f64::max)
    }

    /// Validate dimensions and finiteness.
    pub fn validate(&self) -> LpResult<()> {
        let n = self.num_vars();
        let m = self.num_constraints();

        if n == 0 {
            return Err(LpError::Dimension("objective has no coefficients".to_string()));
        }

        if self.a.len() != m {
            return Err(LpError::Dimension(format!(
                "A has {} rows, b has {} entries",
                self.a.len(),
                m
            )));
        }

        for (i, row) in self.a.iter().enumerate() {
            if row.len() != n {
                return Err(LpError::Dimension(format!(
                    "row {} has {} coefficients, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }

        if self.c.iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite("c"));
        }
        if self.a.iter().flatten().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite("A"));
        }
        if self.b.iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFinite("b"));
        }

        Ok(())
    }
}

/// Entering-column selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotRule {
    /// Most negative reduced cost, ties to the lowest column.
    #[default]
    Dantzig,

    /// First column with a negative reduced cost.
    ///
    /// Together with the lowest-index ratio test this is Bland's rule and
    /// cannot cycle.
    FirstProfitable,
}

/// Solver settings and parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Maximum number of pivots, counted over both phases.
    pub max_iter: usize,

    /// Entering-column selection rule.
    pub pivot_rule: PivotRule,

    /// Reduced costs below `-tol_cost` are considered improving.
    pub tol_cost: f64,

    /// Column entries above `tol_pivot` are admissible in the ratio test.
    pub tol_pivot: f64,

    /// Phase-1 objective above this value proves infeasibility.
    pub tol_feas: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iter: 100,
            pivot_rule: PivotRule::default(),
            tol_cost: 1e-10,
            tol_pivot: 1e-10,
            tol_feas: 1e-9,
        }
    }
}

impl SolverSettings {
    /// Set the pivot budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the entering-column rule.
    pub fn with_pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }
}

/// Solution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Optimal basic feasible solution found
    Optimal,

    /// No point satisfies the constraints
    Infeasible,

    /// Objective can be improved without bound
    Unbounded,

    /// Pivot budget exhausted before convergence
    MaxIterations,
}

impl SolveStatus {
    /// Returns true if a solution vector is available.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::MaxIterations => write!(f, "max_iterations"),
        }
    }
}

/// Solve result with solution and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpSolution {
    /// Solution status
    pub status: SolveStatus,

    /// Decision variables (length n when optimal, empty otherwise)
    pub x: Vec<f64>,

    /// Objective value `c^T x` in the problem's own sense.
    ///
    /// `+inf`/`-inf` when unbounded in the direction of optimization, NaN
    /// when no solution is available.
    pub obj_val: f64,

    /// Pivots performed over both phases
    pub iterations: usize,
}

impl LpSolution {
    pub(crate) fn optimal(x: Vec<f64>, obj_val: f64, iterations: usize) -> Self {
        Self {
            status: SolveStatus::Optimal,
            x,
            obj_val,
            iterations,
        }
    }

    pub(crate) fn infeasible(iterations: usize) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            x: Vec::new(),
            obj_val: f64::NAN,
            iterations,
        }
    }

    pub(crate) fn unbounded(sense: Sense, iterations: usize) -> Self {
        Self {
            status: SolveStatus::Unbounded,
            x: Vec::new(),
            obj_val: match sense {
                Sense::Maximize => f64::INFINITY,
                Sense::Minimize => f64::NEG_INFINITY,
            },
            iterations,
        }
    }

    pub(crate) fn max_iterations(iterations: usize) -> Self {
        Self {
            status: SolveStatus::MaxIterations,
            x: Vec::new(),
            obj_val: f64::NAN,
            iterations,
        }
    }
}
