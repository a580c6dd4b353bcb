//! MIP solution types.

use serde::{Deserialize, Serialize};
use solver_core::Sense;

use crate::search::SearchNode;

/// Status of the MIP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MipStatus {
    /// The frontier emptied with an incumbent: the incumbent is optimal.
    Optimal,

    /// A limit stopped the search after an incumbent was found.
    FeasibleNotProven,

    /// The frontier emptied without any integer solution.
    Infeasible,

    /// A limit stopped the search before any integer solution was found.
    NoIncumbentBudgetExhausted,
}

impl MipStatus {
    /// Returns true if a feasible solution was found.
    pub fn has_solution(&self) -> bool {
        matches!(self, MipStatus::Optimal | MipStatus::FeasibleNotProven)
    }

    /// Returns true if optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, MipStatus::Optimal)
    }
}

impl std::fmt::Display for MipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MipStatus::Optimal => write!(f, "optimal"),
            MipStatus::FeasibleNotProven => write!(f, "feasible (not proven optimal)"),
            MipStatus::Infeasible => write!(f, "infeasible"),
            MipStatus::NoIncumbentBudgetExhausted => write!(f, "no solution (budget exhausted)"),
        }
    }
}

/// Which limit stopped the search early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLimit {
    /// `max_nodes` nodes were explored.
    NodeLimit,

    /// The wall-clock limit elapsed.
    TimeLimit,

    /// The frontier emptied, but a node relaxation hit its pivot budget in a
    /// subtree that could still beat the incumbent.
    IterationLimit,
}

/// Complete MIP solution with diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MipSolution {
    /// Solve status.
    pub status: MipStatus,

    /// Best integer solution (if found).
    #[serde(rename = "solution")]
    pub x: Option<Vec<f64>>,

    /// Objective value of the best integer solution.
    #[serde(rename = "optimal_value")]
    pub obj_val: Option<f64>,

    /// Objective value of the root LP relaxation (None when it has none).
    pub lp_relaxation: Option<f64>,

    /// Remaining gap in percent between the best open bound and the incumbent.
    ///
    /// Stalled subtrees count as open through their parent's bound. This is 0
    /// exactly when optimality is proven. This is not the gap against the root
    /// relaxation; that one is `integrality_gap`.
    pub gap: f64,

    /// Gap in percent between the root relaxation and the incumbent.
    pub integrality_gap: f64,

    /// Number of nodes taken from the frontier.
    pub nodes_explored: u64,

    /// Number of nodes closed by bound.
    pub nodes_pruned: u64,

    /// Number of nodes discarded because their relaxation hit the pivot budget.
    #[serde(default)]
    pub nodes_stalled: u64,

    /// Limit that stopped the search, if any.
    pub limit: Option<SearchLimit>,

    /// Every node created during the search, indexed by id.
    pub tree: Vec<SearchNode>,

    /// Total solve time in milliseconds.
    #[serde(rename = "elapsed_ms")]
    pub solve_time_ms: u64,

    /// Number of times the incumbent was improved.
    pub incumbent_updates: u64,
}

impl MipSolution {
    /// Relative difference in percent, 0 when `reference` is numerically zero.
    pub fn compute_gap(reference: f64, incumbent: f64) -> f64 {
        if !reference.is_finite() || !incumbent.is_finite() {
            return 0.0;
        }
        if reference.abs() <= 1e-10 {
            return 0.0;
        }
        (reference - incumbent).abs() / reference.abs() * 100.0
    }
}

/// Tracks the best known feasible solution (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Objective value of incumbent.
    /// Starts at the worst value for the sense.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,

    sense: Sense,
}

impl IncumbentTracker {
    /// Create an empty tracker for the given direction.
    pub fn new(sense: Sense) -> Self {
        Self {
            solution: None,
            obj_val: sense.worst_value(),
            update_count: 0,
            sense,
        }
    }

    /// Try to update the incumbent. Returns true on strict improvement.
    pub fn update(&mut self, x: &[f64], obj_val: f64) -> bool {
        if self.solution.is_none() || self.sense.improves(obj_val, self.obj_val) {
            self.solution = Some(x.to_vec());
            self.obj_val = obj_val;
            self.update_count += 1;
            true
        } else {
            false
        }
    }

    /// Check if we have an incumbent.
    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    /// Objective value of the incumbent, if any.
    pub fn value(&self) -> Option<f64> {
        self.solution.as_ref().map(|_| self.obj_val)
    }

    /// Whether a node with this LP value could still contain a better solution.
    pub fn can_improve(&self, lp_value: f64) -> bool {
        self.solution.is_none() || self.sense.improves(lp_value, self.obj_val)
    }
}
