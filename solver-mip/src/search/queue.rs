//! Node priority queue for B&B tree exploration.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use solver_core::Sense;

/// Entry in the node queue with priority.
#[derive(Debug, Clone, Copy)]
struct QueuedNode {
    id: usize,
    lp_value: f64,
    priority: f64, // Higher = selected first
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority first, then lower id
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Best-first frontier of open nodes.
///
/// Nodes live in the search tree; the queue only holds their ids and LP
/// values.
#[derive(Debug, Clone)]
pub struct NodeQueue {
    /// Optimization direction.
    sense: Sense,

    /// Priority queue (max-heap by priority).
    heap: BinaryHeap<QueuedNode>,

    /// Count of nodes added.
    nodes_added: u64,

    /// Count of nodes popped.
    nodes_popped: u64,
}

impl NodeQueue {
    /// Create an empty queue for the given direction.
    pub fn new(sense: Sense) -> Self {
        Self {
            sense,
            heap: BinaryHeap::new(),
            nodes_added: 0,
            nodes_popped: 0,
        }
    }

    /// Add a node to the queue.
    pub fn push(&mut self, id: usize, lp_value: f64) {
        let priority = match self.sense {
            Sense::Maximize => lp_value,
            Sense::Minimize => -lp_value,
        };
        self.heap.push(QueuedNode {
            id,
            lp_value,
            priority,
        });
        self.nodes_added += 1;
    }

    /// Get the id of the next node to process.
    pub fn pop(&mut self) -> Option<usize> {
        let queued = self.heap.pop()?;
        self.nodes_popped += 1;
        Some(queued.id)
    }

    /// Best LP value among open nodes.
    pub fn best_bound(&self) -> Option<f64> {
        self.heap.peek().map(|q| q.lp_value)
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Get the number of nodes in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Get the total number of nodes added.
    pub fn total_added(&self) -> u64 {
        self.nodes_added
    }

    /// Get the total number of nodes popped.
    pub fn total_popped(&self) -> u64 {
        self.nodes_popped
    }
}
