//! Branching variable selection.

use super::BoundConstraint;
use crate::model::fractionality;
use crate::settings::BranchingRule;

/// A branching decision.
#[derive(Debug, Clone)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Bound for the "down" branch (x <= floor(value)).
    pub down_branch: BoundConstraint,

    /// Bound for the "up" branch (x >= ceil(value)).
    pub up_branch: BoundConstraint,
}

impl BranchDecision {
    /// Create the decision for branching on `var` at `value`.
    pub fn new(var: usize, value: f64) -> Self {
        Self {
            var,
            value,
            down_branch: BoundConstraint::down_branch(var, value),
            up_branch: BoundConstraint::up_branch(var, value),
        }
    }
}

/// Branching variable selector bound to one objective.
#[derive(Debug, Clone)]
pub struct BranchingSelector {
    /// Branching rule to use.
    rule: BranchingRule,

    /// Objective coefficients, used by `MaxCoefficient`.
    c: Vec<f64>,

    /// Integrality tolerance.
    tol: f64,
}

impl BranchingSelector {
    /// Create a new branching selector.
    pub fn new(rule: BranchingRule, c: &[f64], tol: f64) -> Self {
        Self {
            rule,
            c: c.to_vec(),
            tol,
        }
    }

    /// Select a branching variable.
    ///
    /// Returns None if the solution is integer-feasible.
    pub fn select(&self, x: &[f64]) -> Option<BranchDecision> {
        let var = select_branch_variable(x, &self.c, self.rule, self.tol)?;
        Some(BranchDecision::new(var, x[var]))
    }
}

/// Pick the variable to branch on, or None if `x` is integral within `tol`.
///
/// Only variables with fractional part strictly above `tol` are eligible.
/// Every rule breaks ties towards the lowest index.
pub fn select_branch_variable(
    x: &[f64],
    c: &[f64],
    rule: BranchingRule,
    tol: f64,
) -> Option<usize> {
    let mut fractional = x
        .iter()
        .enumerate()
        .map(|(i, &v)| (i, fractionality(v)))
        .filter(|&(_, frac)| frac > tol);

    match rule {
        BranchingRule::FirstFractional => fractional.next().map(|(i, _)| i),
        BranchingRule::MostFractional => best_score(fractional),
        BranchingRule::MaxCoefficient => best_score(
            fractional.map(|(i, frac)| (i, c.get(i).copied().unwrap_or(0.0).abs() * frac)),
        ),
    }
}

/// Index with the strictly largest score; the first one wins ties.
fn best_score(scores: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
