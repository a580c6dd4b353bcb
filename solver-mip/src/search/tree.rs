//! Branch-and-bound tree controller.

use std::ops::{Index, IndexMut};
use std::time::Instant;

use solver_core::Sense;

use super::{BranchingSelector, NodeQueue, NodeType, SearchNode};
use crate::error::{MipError, MipResult};
use crate::master::{MasterResult, MasterStatus, RelaxationBackend, SimplexBackend};
use crate::model::{IncumbentTracker, MipProblem, MipSolution, MipStatus, SearchLimit};
use crate::progress::{Progress, ProgressObserver};
use crate::settings::MipSettings;

/// Arena of every node created during a search.
///
/// Node ids are indices into the arena.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next pushed node will receive.
    pub fn next_id(&self) -> usize {
        self.nodes.len()
    }

    /// Append a node, assigning it the next id.
    pub fn push(&mut self, mut node: SearchNode) -> usize {
        let id = self.nodes.len();
        node.id = id;
        self.nodes.push(node);
        id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consume the tree, returning its nodes.
    pub fn into_nodes(self) -> Vec<SearchNode> {
        self.nodes
    }
}

impl Index<usize> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: usize) -> &SearchNode {
        &self.nodes[id]
    }
}

impl IndexMut<usize> for SearchTree {
    fn index_mut(&mut self, id: usize) -> &mut SearchNode {
        &mut self.nodes[id]
    }
}

/// Branch-and-bound tree controller.
///
/// Owns the tree, frontier, and incumbent of one solve.
pub struct BranchAndBound<B> {
    /// Node relaxation solver.
    backend: B,

    /// Optimization direction.
    sense: Sense,

    /// Every node created so far.
    tree: SearchTree,

    /// Frontier of open `Branch` nodes.
    queue: NodeQueue,

    /// Branching variable selector.
    branching: BranchingSelector,

    /// Incumbent solution tracker.
    incumbent: IncumbentTracker,

    /// Root relaxation value.
    lp_relaxation: Option<f64>,

    /// Nodes taken from the frontier.
    nodes_explored: u64,

    /// Nodes closed by bound.
    nodes_pruned: u64,

    /// Nodes whose relaxation stopped before an answer.
    nodes_stalled: u64,

    /// Best parent bound over stalled children.
    stalled_bound: Option<f64>,

    /// Start time.
    start_time: Option<Instant>,

    /// Settings.
    settings: MipSettings,
}

impl BranchAndBound<SimplexBackend> {
    /// Create a controller that solves node LPs with the dense simplex.
    pub fn new(problem: &MipProblem, settings: MipSettings) -> Self {
        let backend = SimplexBackend::new(problem, settings.lp_settings.clone());
        Self::with_backend(problem, settings, backend)
    }
}

impl<B: RelaxationBackend> BranchAndBound<B> {
    /// Create a controller around a custom relaxation backend.
    pub fn with_backend(problem: &MipProblem, settings: MipSettings, backend: B) -> Self {
        let sense = problem.sense();
        Self {
            backend,
            sense,
            tree: SearchTree::new(),
            queue: NodeQueue::new(sense),
            branching: BranchingSelector::new(
                settings.branching_rule,
                &problem.c,
                settings.int_feas_tol,
            ),
            incumbent: IncumbentTracker::new(sense),
            lp_relaxation: None,
            nodes_explored: 0,
            nodes_pruned: 0,
            nodes_stalled: 0,
            stalled_bound: None,
            start_time: None,
            settings,
        }
    }

    /// Run the search to completion or until a limit is hit.
    pub fn solve<O: ProgressObserver>(mut self, observer: &mut O) -> MipResult<MipSolution> {
        self.start_time = Some(Instant::now());

        let msg = format!(
            "Solving MILP: {} variables, {} constraints, {:?}",
            self.backend.num_vars(),
            self.backend.num_base_constraints(),
            self.sense
        );
        if self.settings.verbose {
            log::info!("{}", msg);
        } else {
            log::debug!("{}", msg);
        }

        let root = self.backend.solve(&[])?;
        let mut node = SearchNode::root();
        node.set_relaxation(root.lp_status, root.x.clone(), root.obj_val);
        self.lp_relaxation = root.obj_val;

        match root.status {
            MasterStatus::Unbounded => return Err(MipError::Unbounded),
            MasterStatus::Infeasible | MasterStatus::IterationLimit => {
                if root.status == MasterStatus::IterationLimit {
                    log::warn!(
                        "Root LP hit the iteration limit after {} pivots; treating as infeasible",
                        root.iterations
                    );
                    self.nodes_stalled += 1;
                }
                node.node_type = NodeType::Infeasible;
                self.tree.push(node);
                return Ok(self.finalize(None));
            }
            MasterStatus::Optimal => {}
        }

        let root_value = root.obj_val.unwrap_or_else(|| self.sense.worst_value());
        if self.branching.select(&root.x).is_none() {
            node.node_type = NodeType::Optimal;
            self.tree.push(node);
            self.incumbent.update(&root.x, root_value);
            log::debug!("Root relaxation is integral: obj={:.6}", root_value);
            return Ok(self.finalize(None));
        }

        node.node_type = NodeType::Branch;
        let root_id = self.tree.push(node);
        self.queue.push(root_id, root_value);
        log::debug!("Root relaxation: obj={:.6}, branching", root_value);

        let limit = loop {
            if self.queue.is_empty() {
                break None;
            }
            if self.nodes_explored >= self.settings.max_nodes {
                break Some(SearchLimit::NodeLimit);
            }
            if self.time_limit_exceeded() {
                break Some(SearchLimit::TimeLimit);
            }

            let Some(id) = self.queue.pop() else {
                break None;
            };
            self.nodes_explored += 1;
            self.explore(id)?;

            let freq = self.settings.progress_freq;
            if freq > 0 && self.nodes_explored % freq == 0 {
                self.report_progress(observer);
            }
        };

        Ok(self.finalize(limit))
    }

    /// Process one node taken from the frontier.
    fn explore(&mut self, id: usize) -> MipResult<()> {
        let value = self.tree[id]
            .lp_value
            .unwrap_or_else(|| self.sense.worst_value());

        if !self.incumbent.can_improve(value) {
            self.tree[id].node_type = NodeType::Pruned;
            self.nodes_pruned += 1;
            log::debug!("Node {} pruned at dequeue: obj={:.6}", id, value);
            return Ok(());
        }

        let Some(decision) = self.branching.select(&self.tree[id].lp_solution) else {
            log::warn!("Node {} in the frontier has an integral relaxation; skipping", id);
            return Ok(());
        };

        log::debug!(
            "Node {} (depth {}): branching on x{} = {:.6}",
            id,
            self.tree[id].depth,
            decision.var + 1,
            decision.value
        );

        let parent = self.tree[id].clone();
        for bound in [decision.down_branch, decision.up_branch] {
            let mut child = parent.child(self.tree.next_id(), bound);
            let result = self.backend.solve(&child.constraints)?;
            child.set_relaxation(result.lp_status, result.x.clone(), result.obj_val);
            child.node_type = self.classify(child.id, value, &result);

            let child_id = self.tree.push(child);
            if self.tree[child_id].node_type == NodeType::Branch {
                self.queue.push(child_id, result.obj_val.unwrap_or(value));
            }
        }

        Ok(())
    }

    /// Decide what a freshly solved child is, updating incumbent and counters.
    ///
    /// A child whose relaxation stalls is discarded; its parent's bound stays
    /// open for the gap and the final status.
    fn classify(&mut self, id: usize, parent_value: f64, result: &MasterResult) -> NodeType {
        let value = match (result.status, result.obj_val) {
            (MasterStatus::Optimal, Some(value)) => value,
            (MasterStatus::Infeasible, _) => return NodeType::Infeasible,
            (status, _) => {
                log::warn!(
                    "Node {} relaxation ended as {:?}; treating as infeasible",
                    id,
                    status
                );
                self.nodes_stalled += 1;
                self.stalled_bound = Some(match self.stalled_bound {
                    Some(bound) if !self.sense.improves(parent_value, bound) => bound,
                    _ => parent_value,
                });
                return NodeType::Infeasible;
            }
        };

        if self.branching.select(&result.x).is_none() {
            if self.incumbent.update(&result.x, value) {
                let msg = format!("New incumbent at node {}: obj={:.6}", id, value);
                if self.settings.verbose {
                    log::info!("{}", msg);
                } else {
                    log::debug!("{}", msg);
                }
            }
            NodeType::Integer
        } else if self.incumbent.can_improve(value) {
            NodeType::Branch
        } else {
            self.nodes_pruned += 1;
            NodeType::Pruned
        }
    }

    fn report_progress<O: ProgressObserver>(&self, observer: &mut O) {
        let progress = Progress::new(
            self.nodes_explored,
            self.settings.max_nodes,
            self.incumbent.value(),
        );

        let msg = format!(
            "Nodes: {} ({} open) | Incumbent: {} | Gap: {:.2}% | Budget: {}% | Time: {:.1}s",
            self.nodes_explored,
            self.queue.len(),
            progress
                .best_value
                .map_or_else(|| "none".to_string(), |v| format!("{:.6}", v)),
            self.gap(),
            progress.percent,
            self.elapsed_ms() as f64 / 1000.0,
        );
        if self.settings.verbose {
            log::info!("{}", msg);
        } else {
            log::debug!("{}", msg);
        }

        observer.observe(&progress);
    }

    /// Best value any open or stalled subtree could still reach.
    ///
    /// Subtrees that cannot beat the incumbent do not count; with none
    /// left the incumbent is its own bound.
    pub fn best_bound(&self) -> Option<f64> {
        [self.queue.best_bound(), self.stalled_bound]
            .into_iter()
            .flatten()
            .filter(|&bound| self.incumbent.can_improve(bound))
            .reduce(|a, b| if self.sense.improves(b, a) { b } else { a })
            .or(self.incumbent.value())
    }

    /// Whether a stalled subtree might still hold a better solution.
    fn stall_unresolved(&self) -> bool {
        self.stalled_bound
            .is_some_and(|bound| self.incumbent.can_improve(bound))
    }

    /// Remaining gap in percent, 0 without an incumbent.
    pub fn gap(&self) -> f64 {
        match (self.best_bound(), self.incumbent.value()) {
            (Some(bound), Some(incumbent)) => MipSolution::compute_gap(bound, incumbent),
            _ => 0.0,
        }
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Check if time limit is exceeded.
    pub fn time_limit_exceeded(&self) -> bool {
        if let Some(limit) = self.settings.time_limit_ms {
            self.elapsed_ms() >= limit
        } else {
            false
        }
    }

    /// Finalize the solve and return the solution.
    fn finalize(self, limit: Option<SearchLimit>) -> MipSolution {
        let limit = match limit {
            None if self.stall_unresolved() => Some(SearchLimit::IterationLimit),
            limit => limit,
        };
        let has_incumbent = self.incumbent.has_solution();
        let status = match (limit, has_incumbent) {
            (None, true) => MipStatus::Optimal,
            (None, false) => MipStatus::Infeasible,
            (Some(_), true) => MipStatus::FeasibleNotProven,
            (Some(_), false) => MipStatus::NoIncumbentBudgetExhausted,
        };

        let gap = self.gap();
        let integrality_gap = match (self.lp_relaxation, self.incumbent.value()) {
            (Some(lp), Some(incumbent)) => MipSolution::compute_gap(lp, incumbent),
            _ => 0.0,
        };
        let solve_time_ms = self.elapsed_ms();

        let msg = format!(
            "B&B finished: {} | Nodes: {} explored, {} pruned, {} stalled | \
             Queue: {} pushed, {} popped | LP solves: {} | Gap: {:.2}% | Time: {}ms",
            status,
            self.nodes_explored,
            self.nodes_pruned,
            self.nodes_stalled,
            self.queue.total_added(),
            self.queue.total_popped(),
            self.backend.num_solves(),
            gap,
            solve_time_ms
        );
        if self.settings.verbose {
            log::info!("{}", msg);
        } else {
            log::debug!("{}", msg);
        }

        MipSolution {
            status,
            obj_val: self.incumbent.value(),
            x: self.incumbent.solution,
            lp_relaxation: self.lp_relaxation,
            gap,
            integrality_gap,
            nodes_explored: self.nodes_explored,
            nodes_pruned: self.nodes_pruned,
            nodes_stalled: self.nodes_stalled,
            limit,
            tree: self.tree.into_nodes(),
            solve_time_ms,
            incumbent_updates: self.incumbent.update_count,
        }
    }
}
