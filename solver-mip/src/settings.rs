//! Configuration settings for the MIP solver.

use serde::{Deserialize, Serialize};
use solver_core::SolverSettings;

/// Branching variable selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchingRule {
    /// Select variable with fractional part closest to 0.5.
    #[default]
    MostFractional,

    /// Select the lowest-indexed fractional variable.
    FirstFractional,

    /// Maximize |objective coefficient| × fractional part.
    ///
    /// Prefers variables with the largest expected objective impact.
    MaxCoefficient,
}

/// MIP solver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MipSettings {
    // === Termination criteria ===
    /// Maximum number of nodes to explore.
    pub max_nodes: u64,

    /// Time limit in milliseconds (None = unlimited).
    ///
    /// Checked between node explorations, like the node budget.
    pub time_limit_ms: Option<u64>,

    /// Integer feasibility tolerance.
    /// A variable is considered integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Search strategy ===
    /// Branching variable selection rule.
    pub branching_rule: BranchingRule,

    // === Solver settings ===
    /// Settings for the node LP relaxations.
    pub lp_settings: SolverSettings,

    // === Output ===
    /// Log progress at info level instead of debug.
    pub verbose: bool,

    /// Progress frequency (observe every N explored nodes).
    pub progress_freq: u64,
}

impl Default for MipSettings {
    fn default() -> Self {
        Self {
            // Termination
            max_nodes: 1000,
            time_limit_ms: None,
            int_feas_tol: 1e-6,

            // Search
            branching_rule: BranchingRule::default(),

            // Solver
            lp_settings: SolverSettings::default(),

            // Output
            verbose: false,
            progress_freq: 10,
        }
    }
}

impl MipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Set the branching rule.
    pub fn with_branching_rule(mut self, rule: BranchingRule) -> Self {
        self.branching_rule = rule;
        self
    }
}
