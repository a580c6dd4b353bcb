//! Built-in demo problems.

use clap::ValueEnum;
use solver_mip::{MipProblem, MipResult};

/// A built-in problem.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoProblem {
    /// Two-item knapsack with a fractional relaxation
    Knapsack,
    /// Worker assignment with an integral relaxation
    Assignment,
    /// Facility location with an integral relaxation
    Facility,
}

impl DemoProblem {
    pub fn name(self) -> &'static str {
        match self {
            DemoProblem::Knapsack => "Knapsack Problem",
            DemoProblem::Assignment => "Assignment Problem",
            DemoProblem::Facility => "Facility Location",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DemoProblem::Knapsack => {
                "max z = 5x1 + 8x2 (value)\n\
                 s.t.  x1 + x2 <= 6     (item count)\n      \
                 5x1 + 9x2 <= 45  (weight capacity)\n      \
                 x1, x2 >= 0, integer"
            }
            DemoProblem::Assignment => {
                "max z = 7x1 + 6x2 (productivity)\n\
                 s.t.  x1 + x2 <= 5     (workers)\n      \
                 3x1 + 2x2 <= 12  (hours)\n      \
                 2x1 + 4x2 <= 16  (tasks)\n      \
                 x1, x2 >= 0, integer"
            }
            DemoProblem::Facility => {
                "max z = 10x1 + 12x2 (revenue)\n\
                 s.t.  2x1 + 3x2 <= 18  (land)\n      \
                 4x1 + 2x2 <= 20  (budget)\n      \
                 x1 + x2 <= 7     (max facilities)\n      \
                 x1, x2 >= 0, integer"
            }
        }
    }

    pub fn problem(self) -> MipResult<MipProblem> {
        match self {
            DemoProblem::Knapsack => MipProblem::new(
                vec![5.0, 8.0],
                vec![vec![1.0, 1.0], vec![5.0, 9.0]],
                vec![6.0, 45.0],
                true,
            ),
            DemoProblem::Assignment => MipProblem::new(
                vec![7.0, 6.0],
                vec![vec![1.0, 1.0], vec![3.0, 2.0], vec![2.0, 4.0]],
                vec![5.0, 12.0, 16.0],
                true,
            ),
            DemoProblem::Facility => MipProblem::new(
                vec![10.0, 12.0],
                vec![vec![2.0, 3.0], vec![4.0, 2.0], vec![1.0, 1.0]],
                vec![18.0, 20.0, 7.0],
                true,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use solver_mip::{solve_mip, MipSettings, MipStatus};

    use super::*;

    #[test]
    fn test_demo_optima() {
        let cases = [
            (DemoProblem::Knapsack, 40.0, [0.0, 5.0], 41.25),
            (DemoProblem::Assignment, 32.0, [2.0, 3.0], 32.0),
            (DemoProblem::Facility, 78.0, [3.0, 4.0], 78.0),
        ];

        for (demo, value, x, lp) in cases {
            let sol = solve_mip(&demo.problem().unwrap(), &MipSettings::default()).unwrap();

            assert_eq!(sol.status, MipStatus::Optimal, "{}", demo.name());
            assert_relative_eq!(sol.obj_val.unwrap(), value, epsilon = 1e-9);
            assert_relative_eq!(sol.lp_relaxation.unwrap(), lp, epsilon = 1e-9);

            let sol_x = sol.x.unwrap();
            assert_relative_eq!(sol_x[0], x[0], epsilon = 1e-6);
            assert_relative_eq!(sol_x[1], x[1], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_descriptions_match_data() {
        for demo in DemoProblem::value_variants() {
            let prob = demo.problem().unwrap();
            // One line for the objective, one per constraint, one for integrality
            assert_eq!(demo.description().lines().count(), prob.num_constraints() + 2);
        }
    }
}
