//! Relaxation backend trait and types.

use solver_core::{LpProblem, LpSolution, SolveStatus, SolverSettings};

use crate::error::MipResult;
use crate::model::MipProblem;
use crate::search::BoundConstraint;

/// Status of a node relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterStatus {
    /// Optimal solution found.
    Optimal,

    /// Relaxation is infeasible (node can be pruned).
    Infeasible,

    /// Relaxation is unbounded.
    Unbounded,

    /// The simplex pivot budget ran out.
    IterationLimit,
}

impl From<SolveStatus> for MasterStatus {
    fn from(status: SolveStatus) -> Self {
        match status {
            SolveStatus::Optimal => MasterStatus::Optimal,
            SolveStatus::Infeasible => MasterStatus::Infeasible,
            SolveStatus::Unbounded => MasterStatus::Unbounded,
            SolveStatus::MaxIterations => MasterStatus::IterationLimit,
        }
    }
}

/// Result from solving a node relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterResult {
    /// Solve status.
    pub status: MasterStatus,

    /// LP status as reported by the simplex solver.
    pub lp_status: SolveStatus,

    /// Primal solution x (empty unless optimal).
    pub x: Vec<f64>,

    /// Objective value (only when optimal).
    pub obj_val: Option<f64>,

    /// Simplex pivots spent.
    pub iterations: usize,
}

impl From<LpSolution> for MasterResult {
    fn from(lp: LpSolution) -> Self {
        let obj_val = lp.status.is_optimal().then_some(lp.obj_val);
        Self {
            status: lp.status.into(),
            lp_status: lp.status,
            x: lp.x,
            obj_val,
            iterations: lp.iterations,
        }
    }
}

/// Trait for node relaxation backends.
///
/// A backend holds the base LP relaxation of the integer program and solves
/// it under a set of branching bounds.
pub trait RelaxationBackend {
    /// Solve the relaxation with the given bounds added.
    fn solve(&mut self, bounds: &[BoundConstraint]) -> MipResult<MasterResult>;

    /// Get the number of variables.
    fn num_vars(&self) -> usize;

    /// Get the number of constraints (excluding bounds).
    fn num_base_constraints(&self) -> usize;

    /// Number of relaxations solved so far.
    fn num_solves(&self) -> u64;
}

/// Backend that re-solves every node from scratch with the dense simplex.
///
/// Each bound becomes one extra `row · x <= rhs` row.
#[derive(Debug, Clone)]
pub struct SimplexBackend {
    base: LpProblem,
    settings: SolverSettings,
    solves: u64,
}

impl SimplexBackend {
    /// Create a backend for the problem's relaxation.
    pub fn new(problem: &MipProblem, settings: SolverSettings) -> Self {
        Self {
            base: problem.base_relaxation(),
            settings,
            solves: 0,
        }
    }

    /// Build the node LP for a set of bounds.
    pub fn node_problem(&self, bounds: &[BoundConstraint]) -> LpProblem {
        let n = self.base.num_vars();
        let mut lp = self.base.clone();
        for bound in bounds {
            let (row, rhs) = bound.to_row(n);
            lp.push_row(row, rhs);
        }
        lp
    }
}

impl RelaxationBackend for SimplexBackend {
    fn solve(&mut self, bounds: &[BoundConstraint]) -> MipResult<MasterResult> {
        let lp = self.node_problem(bounds);
        let solution = solver_core::solve(&lp, &self.settings)?;
        self.solves += 1;
        Ok(solution.into())
    }

    fn num_vars(&self) -> usize {
        self.base.num_vars()
    }

    fn num_base_constraints(&self) -> usize {
        self.base.num_constraints()
    }

    fn num_solves(&self) -> u64 {
        self.solves
    }
}

/// Solve a single node relaxation in isolation.
///
/// Produces the same result the search saw for a node with these bounds.
pub fn relax_node(
    problem: &MipProblem,
    bounds: &[BoundConstraint],
    settings: &SolverSettings,
) -> MipResult<MasterResult> {
    SimplexBackend::new(problem, settings.clone()).solve(bounds)
}
