//! Integration tests for integer linear programs.

use approx::assert_relative_eq;
use solver_core::{Sense, SolveStatus, SolverSettings};
use solver_mip::{
    relax_node, solve_mip, spawn, BoundDirection, BranchingRule, MipError, MipProblem,
    MipSettings, MipSolution, MipStatus, NodeType, SearchLimit, SolveRequest, SolverMessage,
};

/// max x0 + x1 s.t. 2x0 + x1 <= 4, x0 + 2x1 <= 4
fn two_constraint_scenario() -> MipProblem {
    MipProblem::new(
        vec![1.0, 1.0],
        vec![vec![2.0, 1.0], vec![1.0, 2.0]],
        vec![4.0, 4.0],
        true,
    )
    .unwrap()
}

/// max 5x0 + 8x1 s.t. x0 + x1 <= 6, 5x0 + 9x1 <= 45
fn knapsack() -> MipProblem {
    MipProblem::new(
        vec![5.0, 8.0],
        vec![vec![1.0, 1.0], vec![5.0, 9.0]],
        vec![6.0, 45.0],
        true,
    )
    .unwrap()
}

/// min 3x0 + 2x1 s.t. x0 + x1 >= 2.5
fn covering() -> MipProblem {
    MipProblem::new(vec![3.0, 2.0], vec![vec![-1.0, -1.0]], vec![-2.5], false).unwrap()
}

fn solve_default(prob: &MipProblem) -> MipSolution {
    solve_mip(prob, &MipSettings::default()).expect("Solve failed")
}

#[test]
fn test_scenario_value() {
    let sol = solve_default(&two_constraint_scenario());

    assert_eq!(sol.status, MipStatus::Optimal);
    assert_relative_eq!(sol.lp_relaxation.unwrap(), 8.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(sol.obj_val.unwrap(), 2.0, epsilon = 1e-9);

    let x = sol.x.unwrap();
    assert!(two_constraint_scenario().satisfies_constraints(&x, 1e-9));
    assert_relative_eq!(x[0] + x[1], 2.0, epsilon = 1e-9);
}

#[test]
fn test_infeasible_root() {
    let prob = MipProblem::new(vec![1.0], vec![vec![1.0]], vec![-1.0], true).unwrap();
    let sol = solve_default(&prob);

    assert_eq!(sol.status, MipStatus::Infeasible);
    assert_eq!(sol.tree.len(), 1);
    assert_eq!(sol.tree[0].node_type, NodeType::Infeasible);
    assert_eq!(sol.nodes_explored, 0);
    assert!(sol.x.is_none());
    assert!(sol.obj_val.is_none());
    assert!(sol.lp_relaxation.is_none());
}

#[test]
fn test_unbounded_root() {
    let prob = MipProblem::new(vec![1.0, 0.0], vec![vec![0.0, 1.0]], vec![1.0], true).unwrap();
    let err = solve_mip(&prob, &MipSettings::default()).unwrap_err();

    assert_eq!(err, MipError::Unbounded);
}

#[test]
fn test_invalid_request_rejected() {
    // Deserialized problems skip construction-time checks
    let prob = MipProblem {
        c: vec![1.0, 1.0],
        a: vec![vec![1.0, 1.0]],
        b: vec![1.0, 2.0],
        maximize: true,
    };
    let err = solve_mip(&prob, &MipSettings::default()).unwrap_err();

    assert!(matches!(err, MipError::InvalidProblem(_)));
}

#[test]
fn test_knapsack() {
    let sol = solve_default(&knapsack());

    assert_eq!(sol.status, MipStatus::Optimal);
    assert_relative_eq!(sol.lp_relaxation.unwrap(), 41.25, epsilon = 1e-9);
    assert_relative_eq!(sol.obj_val.unwrap(), 40.0, epsilon = 1e-9);

    let x = sol.x.as_ref().unwrap();
    assert_relative_eq!(x[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(x[1], 5.0, epsilon = 1e-6);

    assert_eq!(sol.gap, 0.0);
    assert_relative_eq!(sol.integrality_gap, 1.25 / 41.25 * 100.0, epsilon = 1e-6);
    assert!(sol.nodes_explored > 0);
    assert!(sol.limit.is_none());
}

#[test]
fn test_integral_roots() {
    // (problem, value, x)
    let cases = [
        (
            MipProblem::new(
                vec![7.0, 6.0],
                vec![vec![1.0, 1.0], vec![3.0, 2.0], vec![2.0, 4.0]],
                vec![5.0, 12.0, 16.0],
                true,
            )
            .unwrap(),
            32.0,
            [2.0, 3.0],
        ),
        (
            MipProblem::new(
                vec![10.0, 12.0],
                vec![vec![2.0, 3.0], vec![4.0, 2.0], vec![1.0, 1.0]],
                vec![18.0, 20.0, 7.0],
                true,
            )
            .unwrap(),
            78.0,
            [3.0, 4.0],
        ),
    ];

    for (prob, value, expected) in cases {
        let sol = solve_default(&prob);

        assert_eq!(sol.status, MipStatus::Optimal);
        assert_eq!(sol.tree.len(), 1);
        assert_eq!(sol.tree[0].node_type, NodeType::Optimal);
        assert_eq!(sol.nodes_explored, 0);
        assert_relative_eq!(sol.obj_val.unwrap(), value, epsilon = 1e-9);
        assert_eq!(sol.gap, 0.0);
        assert_eq!(sol.integrality_gap, 0.0);

        let x = sol.x.unwrap();
        assert_relative_eq!(x[0], expected[0], epsilon = 1e-9);
        assert_relative_eq!(x[1], expected[1], epsilon = 1e-9);
    }
}

#[test]
fn test_minimization() {
    let sol = solve_default(&covering());

    assert_eq!(sol.status, MipStatus::Optimal);
    assert_relative_eq!(sol.lp_relaxation.unwrap(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(sol.obj_val.unwrap(), 6.0, epsilon = 1e-9);

    let x = sol.x.unwrap();
    assert_relative_eq!(x[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(x[1], 3.0, epsilon = 1e-9);

    // Branching x1 <= 2 then x0 <= 0 leaves nothing feasible
    assert!(sol.tree.iter().any(|n| n.node_type == NodeType::Infeasible));
    assert!(sol.tree.iter().any(|n| n.node_type == NodeType::Integer));
}

#[test]
fn test_bound_monotonicity() {
    for (prob, sense) in [(knapsack(), Sense::Maximize), (covering(), Sense::Minimize)] {
        let sol = solve_default(&prob);
        for node in &sol.tree {
            let (Some(parent_id), Some(value)) = (node.parent_id, node.lp_value) else {
                continue;
            };
            let parent_value = sol.tree[parent_id].lp_value.unwrap();
            match sense {
                Sense::Maximize => assert!(value <= parent_value + 1e-9),
                Sense::Minimize => assert!(value >= parent_value - 1e-9),
            }
        }
    }
}

#[test]
fn test_branch_completeness() {
    let sol = solve_default(&knapsack());

    for node in &sol.tree {
        let children: Vec<_> = sol
            .tree
            .iter()
            .filter(|n| n.parent_id == Some(node.id))
            .collect();
        if children.is_empty() {
            continue;
        }
        assert_eq!(children.len(), 2);

        let down = children[0].constraints.last().unwrap();
        let up = children[1].constraints.last().unwrap();
        assert_eq!(down.direction, BoundDirection::Upper);
        assert_eq!(up.direction, BoundDirection::Lower);
        assert_eq!(down.var, up.var);
        assert_eq!(down.value + 1.0, up.value);

        // The parent's relaxation sits strictly between the two bounds
        let v = node.lp_solution[down.var];
        assert!(v > down.value && v < up.value);

        // Children extend the parent's bounds by exactly one
        assert_eq!(children[0].constraints.len(), node.constraints.len() + 1);
        assert_eq!(children[0].depth, node.depth + 1);
    }
}

#[test]
fn test_node_ids_are_indices() {
    let sol = solve_default(&knapsack());
    for (i, node) in sol.tree.iter().enumerate() {
        assert_eq!(node.id, i);
        if let Some(parent) = node.parent_id {
            assert!(parent < i);
        }
    }
}

#[test]
fn test_determinism() {
    let settings = MipSettings::default();
    let first = solve_mip(&knapsack(), &settings).unwrap();
    let second = solve_mip(&knapsack(), &settings).unwrap();

    assert_eq!(first.tree.len(), second.tree.len());
    assert_eq!(first.nodes_explored, second.nodes_explored);
    assert_eq!(first.nodes_pruned, second.nodes_pruned);
    assert_eq!(first.x, second.x);
    for (a, b) in first.tree.iter().zip(&second.tree) {
        assert_eq!(a.node_type, b.node_type);
        assert_eq!(a.branch_desc, b.branch_desc);
        assert_eq!(a.lp_value, b.lp_value);
        assert_eq!(a.lp_solution, b.lp_solution);
    }
}

#[test]
fn test_relax_node_reproduces_values() {
    let prob = knapsack();
    let settings = MipSettings::default();
    let sol = solve_mip(&prob, &settings).unwrap();

    for node in &sol.tree {
        let result = relax_node(&prob, &node.constraints, &settings.lp_settings).unwrap();
        assert_eq!(result.obj_val, node.lp_value);
        assert_eq!(result.lp_status, node.lp_status);
    }
}

#[test]
fn test_optimality_certificate() {
    for prob in [two_constraint_scenario(), knapsack(), covering()] {
        let sol = solve_default(&prob);
        assert_eq!(sol.status, MipStatus::Optimal);
        assert!(sol.limit.is_none());
        assert_eq!(sol.nodes_stalled, 0);
        assert_eq!(sol.gap, 0.0);
    }
}

#[test]
fn test_node_budget_exhausted() {
    let settings = MipSettings::default().with_max_nodes(1);
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    // One branching of the root finds (3, 3) but leaves a fractional child open
    assert_eq!(sol.status, MipStatus::FeasibleNotProven);
    assert_eq!(sol.limit, Some(SearchLimit::NodeLimit));
    assert_eq!(sol.nodes_explored, 1);
    assert_relative_eq!(sol.obj_val.unwrap(), 39.0, epsilon = 1e-9);
    assert!(sol.gap > 0.0);
}

#[test]
fn test_time_limit_exhausted() {
    let settings = MipSettings::default().with_time_limit(0.0);
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    assert_eq!(sol.status, MipStatus::NoIncumbentBudgetExhausted);
    assert_eq!(sol.limit, Some(SearchLimit::TimeLimit));
    assert_eq!(sol.nodes_explored, 0);
    assert_eq!(sol.gap, 0.0);
}

#[test]
fn test_branching_rules_agree() {
    for rule in [
        BranchingRule::MostFractional,
        BranchingRule::FirstFractional,
        BranchingRule::MaxCoefficient,
    ] {
        let settings = MipSettings::default().with_branching_rule(rule);
        let sol = solve_mip(&knapsack(), &settings).unwrap();

        assert_eq!(sol.status, MipStatus::Optimal, "rule {:?}", rule);
        assert_relative_eq!(sol.obj_val.unwrap(), 40.0, epsilon = 1e-9);
    }
}

#[test]
fn test_max_coefficient_branches_on_heavier_variable() {
    // Root (2.25, 3.75): both fractional parts are 0.25, x2 has the larger cost
    let settings = MipSettings::default().with_branching_rule(BranchingRule::MaxCoefficient);
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    assert_eq!(sol.tree[1].branch_var, Some(1));
    assert_eq!(sol.tree[1].branch_desc.as_deref(), Some("x2 <= 3"));
    assert_eq!(sol.tree[2].branch_desc.as_deref(), Some("x2 >= 4"));
}

#[test]
fn test_first_fractional_branches_on_lowest_index() {
    let settings = MipSettings::default().with_branching_rule(BranchingRule::FirstFractional);
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    assert_eq!(sol.tree[1].branch_desc.as_deref(), Some("x1 <= 2"));
    assert_eq!(sol.tree[2].branch_desc.as_deref(), Some("x1 >= 3"));
}

#[test]
fn test_worker_message_order() {
    let settings = MipSettings {
        progress_freq: 1,
        ..MipSettings::default()
    };
    let handle = spawn(SolveRequest::new(knapsack()), settings).unwrap();
    let messages: Vec<SolverMessage> = handle.messages().collect();

    let (last, progress) = messages.split_last().unwrap();
    let SolverMessage::Finished(Ok(sol)) = last else {
        panic!("last message must be the result, got {:?}", last);
    };
    assert_relative_eq!(sol.obj_val.unwrap(), 40.0, epsilon = 1e-9);
    assert_eq!(progress.len() as u64, sol.nodes_explored);

    let mut previous = 0;
    for message in progress {
        let SolverMessage::Progress(p) = message else {
            panic!("unexpected message before the result");
        };
        assert!(p.nodes_explored > previous);
        assert!(p.percent <= 100);
        previous = p.nodes_explored;
    }
}

#[test]
fn test_worker_wait() {
    let request: SolveRequest = serde_json::from_str(
        r#"{
            "problem": {"c": [5, 8], "A": [[1, 1], [5, 9]], "b": [6, 45], "maximize": true},
            "branch_strategy": "first_fractional",
            "max_nodes": 100
        }"#,
    )
    .unwrap();

    let sol = spawn(request, MipSettings::default()).unwrap().wait().unwrap();
    assert_eq!(sol.status, MipStatus::Optimal);
    assert_relative_eq!(sol.obj_val.unwrap(), 40.0, epsilon = 1e-9);
}

#[test]
fn test_solution_json_shape() {
    let sol = solve_default(&knapsack());
    let json = serde_json::to_value(&sol).unwrap();

    assert_eq!(json["status"], "optimal");
    assert_eq!(json["solution"].as_array().unwrap().len(), 2);
    assert!(json["optimal_value"].is_number());
    assert!(json["elapsed_ms"].is_number());
    assert!(json["limit"].is_null());
    assert_eq!(json["tree"].as_array().unwrap().len(), sol.tree.len());
    assert_eq!(json["tree"][0]["node_type"], "branch");
    assert!(json["tree"][0]["parent_id"].is_null());
}

#[test]
fn test_lp_settings_flow_to_nodes() {
    // A one-pivot budget stalls the root, which is then treated as infeasible
    let settings = MipSettings {
        lp_settings: SolverSettings::default().with_max_iter(1),
        ..MipSettings::default()
    };
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    assert_eq!(sol.status, MipStatus::Infeasible);
    assert_eq!(sol.tree.len(), 1);
    assert_eq!(sol.nodes_stalled, 1);
    assert_eq!(sol.tree[0].lp_status, SolveStatus::MaxIterations);
}

#[test]
fn test_child_iteration_limit_blocks_proof() {
    // Two pivots solve the root but not every child, so part of the tree is lost
    let settings = MipSettings {
        lp_settings: SolverSettings::default().with_max_iter(2),
        ..MipSettings::default()
    };
    let sol = solve_mip(&knapsack(), &settings).unwrap();

    assert!(sol.nodes_stalled > 0);
    let stalled: Vec<_> = sol
        .tree
        .iter()
        .filter(|n| n.lp_status == SolveStatus::MaxIterations)
        .collect();
    assert_eq!(stalled.len() as u64, sol.nodes_stalled);
    assert!(stalled.iter().all(|n| n.node_type == NodeType::Infeasible));

    assert_ne!(sol.status, MipStatus::Optimal);
    assert_eq!(sol.limit, Some(SearchLimit::IterationLimit));
    if sol.status.has_solution() {
        assert_eq!(sol.status, MipStatus::FeasibleNotProven);
        assert!(sol.gap > 0.0);
        assert!(sol.obj_val.unwrap() <= 40.0 + 1e-9);
    } else {
        assert_eq!(sol.status, MipStatus::NoIncumbentBudgetExhausted);
    }

    // The full budget proves 40
    let full = solve_default(&knapsack());
    assert_eq!(full.status, MipStatus::Optimal);
    assert_eq!(full.nodes_stalled, 0);
    assert_relative_eq!(full.obj_val.unwrap(), 40.0, epsilon = 1e-9);
}
