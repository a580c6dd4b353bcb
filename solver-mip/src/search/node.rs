//! Search node representation.

use std::fmt;

use serde::{Deserialize, Serialize};
use solver_core::SolveStatus;

/// Role of a node in the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Root node, before its relaxation has been classified.
    Root,

    /// Node LP relaxation is integral.
    Integer,

    /// Fractional node waiting in (or taken from) the frontier.
    Branch,

    /// Node was closed by bound.
    Pruned,

    /// Node LP relaxation has no usable solution.
    Infeasible,

    /// Root relaxation was integral and solved the problem outright.
    Optimal,
}

/// Direction of a branching bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundDirection {
    /// `x_i <= value`
    Upper,

    /// `x_i >= value`
    Lower,
}

/// A single bound added by branching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundConstraint {
    /// Variable index.
    pub var: usize,

    /// Bound direction.
    pub direction: BoundDirection,

    /// Integer bound value.
    pub value: f64,
}

impl BoundConstraint {
    /// Create a "down" branch: x <= floor(value).
    pub fn down_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BoundDirection::Upper,
            value: value.floor(),
        }
    }

    /// Create an "up" branch: x >= ceil(value).
    pub fn up_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BoundDirection::Lower,
            value: value.ceil(),
        }
    }

    /// Express the bound as a `row · x <= rhs` constraint over `n` variables.
    ///
    /// Lower bounds are negated.
    pub fn to_row(&self, n: usize) -> (Vec<f64>, f64) {
        let mut row = vec![0.0; n];
        match self.direction {
            BoundDirection::Upper => {
                row[self.var] = 1.0;
                (row, self.value)
            }
            BoundDirection::Lower => {
                row[self.var] = -1.0;
                (row, -self.value)
            }
        }
    }
}

impl fmt::Display for BoundConstraint {
    // Variables are numbered from 1 in descriptions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.direction {
            BoundDirection::Upper => "<=",
            BoundDirection::Lower => ">=",
        };
        write!(f, "x{} {} {}", self.var + 1, op, self.value)
    }
}

/// A node in the B&B search tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchNode {
    /// Unique node identifier, equal to its index in the tree.
    pub id: usize,

    /// Parent node ID (None for root).
    pub parent_id: Option<usize>,

    /// All bounds on the path from the root to this node.
    pub constraints: Vec<BoundConstraint>,

    /// LP relaxation solution (empty when the LP has none).
    pub lp_solution: Vec<f64>,

    /// LP relaxation objective value.
    pub lp_value: Option<f64>,

    /// LP relaxation status.
    pub lp_status: SolveStatus,

    /// Role of the node.
    pub node_type: NodeType,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Variable branched on to create this node.
    pub branch_var: Option<usize>,

    /// Human-readable branching bound, e.g. `x1 <= 1`.
    pub branch_desc: Option<String>,
}

impl SearchNode {
    /// Create the root node.
    pub fn root() -> Self {
        Self {
            id: 0,
            parent_id: None,
            constraints: Vec::new(),
            lp_solution: Vec::new(),
            lp_value: None,
            lp_status: SolveStatus::Infeasible,
            node_type: NodeType::Root,
            depth: 0,
            branch_var: None,
            branch_desc: None,
        }
    }

    /// Create a child node from a bound.
    ///
    /// The child inherits the parent's bounds; its relaxation is unset.
    pub fn child(&self, id: usize, bound: BoundConstraint) -> Self {
        let mut constraints = self.constraints.clone();
        constraints.push(bound);
        Self {
            id,
            parent_id: Some(self.id),
            constraints,
            lp_solution: Vec::new(),
            lp_value: None,
            lp_status: SolveStatus::Infeasible,
            node_type: NodeType::Branch,
            depth: self.depth + 1,
            branch_var: Some(bound.var),
            branch_desc: Some(bound.to_string()),
        }
    }

    /// Store the outcome of this node's relaxation.
    pub fn set_relaxation(&mut self, status: SolveStatus, x: Vec<f64>, value: Option<f64>) {
        self.lp_status = status;
        self.lp_solution = x;
        self.lp_value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = SearchNode::root();
        assert_eq!(root.id, 0);
        assert!(root.parent_id.is_none());
        assert_eq!(root.depth, 0);
        assert!(root.constraints.is_empty());
        assert_eq!(root.node_type, NodeType::Root);
    }

    #[test]
    fn test_child_node() {
        let root = SearchNode::root();
        let child = root.child(1, BoundConstraint::down_branch(0, 1.5));
        let grandchild = child.child(3, BoundConstraint::up_branch(1, 0.4));

        assert_eq!(child.id, 1);
        assert_eq!(child.parent_id, Some(0));
        assert_eq!(child.depth, 1);
        assert_eq!(child.branch_var, Some(0));
        assert_eq!(child.branch_desc.as_deref(), Some("x1 <= 1"));

        assert_eq!(grandchild.parent_id, Some(1));
        assert_eq!(grandchild.depth, 2);
        assert_eq!(grandchild.constraints.len(), 2);
        assert_eq!(grandchild.branch_desc.as_deref(), Some("x2 >= 1"));
    }

    #[test]
    fn test_bound_constraints() {
        // Down branch on x with value 2.7: x <= 2
        let down = BoundConstraint::down_branch(0, 2.7);
        assert_eq!(down.value, 2.0);
        assert_eq!(down.to_row(2), (vec![1.0, 0.0], 2.0));

        // Up branch on x with value 2.7: x >= 3
        let up = BoundConstraint::up_branch(1, 2.7);
        assert_eq!(up.value, 3.0);
        assert_eq!(up.to_row(2), (vec![0.0, -1.0], -3.0));

        // Siblings leave a unit gap on the branching variable
        let down = BoundConstraint::down_branch(0, 2.5);
        let up = BoundConstraint::up_branch(0, 2.5);
        assert_eq!(up.value - down.value, 1.0);
    }
}
