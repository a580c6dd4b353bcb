//! Finding an initial basic feasible solution.
//!
//! Rows with a nonnegative right-hand side start with their slack in the
//! basis. Every other row is negated and receives an artificial variable.
//! Minimizing the sum of artificials then either reaches zero, which gives a
//! feasible basis for the original system, or proves that none exists.

use nalgebra::DMatrix;

use super::tableau::Tableau;
use super::{primal, PrimalOutcome};
use crate::problem::{LpProblem, SolverSettings};

/// Outcome of the first phase.
#[derive(Debug)]
pub(crate) enum Feasibility {
    /// Tableau over decision and slack columns with a feasible basis.
    Feasible(Tableau),

    /// The constraints admit no point with `x >= 0`.
    Infeasible,

    /// Pivot budget ran out during the first phase.
    IterationLimit,
}

/// Standard-form tableau with slack and artificial columns.
pub(crate) struct Standardized {
    pub(crate) tableau: Tableau,

    /// Number of decision plus slack columns.
    pub(crate) num_structural: usize,

    /// Number of artificial columns, stored after the structural ones.
    pub(crate) num_artificial: usize,
}

/// Build `[A | I | R | b]` where `R` holds one artificial column per row
/// with a negative right-hand side. The objective row is left at zero.
pub(crate) fn standardize(problem: &LpProblem, settings: &SolverSettings) -> Standardized {
    let n = problem.num_vars();
    let m = problem.num_constraints();

    let negated: Vec<bool> = problem.b.iter().map(|&b| b < -settings.tol_feas).collect();
    let num_artificial = negated.iter().filter(|&&neg| neg).count();
    let num_structural = n + m;
    let width = num_structural + num_artificial + 1;

    let mut data = DMatrix::zeros(m + 1, width);
    let mut basis = Vec::with_capacity(m);
    let mut next_artificial = num_structural;

    for (i, (row, &rhs)) in problem.a.iter().zip(&problem.b).enumerate() {
        let sign = if negated[i] { -1.0 } else { 1.0 };

        for (j, &coef) in row.iter().enumerate() {
            data[(i, j)] = sign * coef;
        }
        data[(i, n + i)] = sign;
        data[(i, width - 1)] = sign * rhs;

        if negated[i] {
            data[(i, next_artificial)] = 1.0;
            basis.push(next_artificial);
            next_artificial += 1;
        } else {
            basis.push(n + i);
        }
    }

    Standardized {
        tableau: Tableau::new(data, basis),
        num_structural,
        num_artificial,
    }
}

/// Drive the artificial variables to zero.
///
/// On success the returned tableau has the artificial columns removed, along
/// with any redundant rows whose artificial could not be pivoted out.
pub(crate) fn find_feasible_basis(
    standardized: Standardized,
    settings: &SolverSettings,
    iterations: &mut usize,
) -> Feasibility {
    let Standardized {
        mut tableau,
        num_structural,
        num_artificial,
    } = standardized;

    if num_artificial == 0 {
        return Feasibility::Feasible(tableau);
    }

    let costs: Vec<f64> = (0..tableau.cols())
        .map(|j| if j >= num_structural { 1.0 } else { 0.0 })
        .collect();
    tableau.set_objective(&costs);

    // Artificials never re-enter once they leave the basis.
    match primal(&mut tableau, settings, num_structural, iterations) {
        PrimalOutcome::Optimal => {}
        PrimalOutcome::IterationLimit => return Feasibility::IterationLimit,
        PrimalOutcome::Unbounded => {
            // The artificial objective is bounded below by zero.
            log::warn!("phase 1 reported an unbounded ray; treating the system as infeasible");
            return Feasibility::Infeasible;
        }
    }

    let infeasibility = -tableau.objective_constant();
    if infeasibility > settings.tol_feas {
        log::debug!("phase 1 optimum {:.3e} > 0: infeasible", infeasibility);
        return Feasibility::Infeasible;
    }

    let mut keep_rows = Vec::with_capacity(tableau.rows());
    for row in 0..tableau.rows() {
        if tableau.basis()[row] < num_structural {
            keep_rows.push(row);
            continue;
        }

        // Degenerate artificial at zero level: swap in any structural column.
        let replacement =
            (0..num_structural).find(|&j| tableau.get(row, j).abs() > settings.tol_pivot);
        match replacement {
            Some(col) => {
                tableau.pivot(row, col);
                keep_rows.push(row);
            }
            None => log::debug!("dropping redundant row {}", row),
        }
    }

    Feasibility::Feasible(tableau.restrict(&keep_rows, num_structural))
}
