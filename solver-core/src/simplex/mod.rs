//! Two-phase tableau simplex.
//!
//! Phase 1 finds a basic feasible solution (skipped when the origin is
//! feasible), phase 2 optimizes the real objective from that basis. Both
//! phases share one pivot budget.

mod phase_one;
mod tableau;

pub use tableau::Tableau;

use crate::problem::{LpProblem, LpSolution, Sense, SolverSettings};
use phase_one::{find_feasible_basis, standardize, Feasibility};

/// Result of one run of the primal simplex iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimalOutcome {
    /// No improving column remains.
    Optimal,

    /// An improving column has no positive entry.
    Unbounded,

    /// The shared pivot budget ran out.
    IterationLimit,
}

/// Reduce the objective row until no reduced cost among the first
/// `num_candidates` columns is negative.
pub(crate) fn primal(
    tableau: &mut Tableau,
    settings: &SolverSettings,
    num_candidates: usize,
    iterations: &mut usize,
) -> PrimalOutcome {
    loop {
        let Some(col) =
            tableau.select_entering(settings.pivot_rule, num_candidates, settings.tol_cost)
        else {
            return PrimalOutcome::Optimal;
        };

        let Some(row) = tableau.select_leaving(col, settings.tol_pivot) else {
            return PrimalOutcome::Unbounded;
        };

        if *iterations >= settings.max_iter {
            return PrimalOutcome::IterationLimit;
        }

        log::trace!(
            "pivot {}: column {} enters, row {} (column {}) leaves",
            *iterations,
            col,
            row,
            tableau.basis()[row]
        );
        tableau.pivot(row, col);
        *iterations += 1;
    }
}

/// Solve a validated problem with the two-phase method.
pub fn solve_two_phase(problem: &LpProblem, settings: &SolverSettings) -> LpSolution {
    let n = problem.num_vars();
    let mut iterations = 0;

    let standardized = standardize(problem, settings);
    let num_structural = standardized.num_structural;

    let mut tableau = match find_feasible_basis(standardized, settings, &mut iterations) {
        Feasibility::Feasible(tableau) => tableau,
        Feasibility::Infeasible => return LpSolution::infeasible(iterations),
        Feasibility::IterationLimit => return LpSolution::max_iterations(iterations),
    };

    // Maximization is handled as minimization of -c.
    let sign = if problem.sense.is_maximize() { -1.0 } else { 1.0 };
    let costs: Vec<f64> = (0..num_structural)
        .map(|j| if j < n { sign * problem.c[j] } else { 0.0 })
        .collect();
    tableau.set_objective(&costs);

    let outcome = primal(&mut tableau, settings, num_structural, &mut iterations);
    let result = match outcome {
        PrimalOutcome::Optimal => {
            // The objective constant holds -(min form value).
            let obj_val = match problem.sense {
                Sense::Maximize => tableau.objective_constant(),
                Sense::Minimize => -tableau.objective_constant(),
            };
            let x = tableau.primal_values(n);
            log::trace!("simplex: max row violation {:.3e}", problem.max_violation(&x));
            LpSolution::optimal(x, obj_val, iterations)
        }
        PrimalOutcome::Unbounded => LpSolution::unbounded(problem.sense, iterations),
        PrimalOutcome::IterationLimit => LpSolution::max_iterations(iterations),
    };

    log::debug!(
        "simplex: {} after {} pivots (m={}, n={})",
        result.status,
        iterations,
        problem.num_constraints(),
        n
    );

    result
}
