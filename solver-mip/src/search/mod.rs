//! Branch-and-bound search tree management.

mod branching;
mod node;
mod queue;
mod tree;

pub use branching::{select_branch_variable, BranchDecision, BranchingSelector};
pub use node::{BoundConstraint, BoundDirection, NodeType, SearchNode};
pub use queue::NodeQueue;
pub use tree::{BranchAndBound, SearchTree};
