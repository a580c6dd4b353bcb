//! Progress reporting during the search.

use serde::{Deserialize, Serialize};

/// Snapshot of the search, emitted every `progress_freq` explored nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Nodes taken from the frontier so far.
    pub nodes_explored: u64,

    /// Objective value of the incumbent, if any.
    pub best_value: Option<f64>,

    /// Share of the node budget used, in percent (capped at 100).
    pub percent: u8,
}

impl Progress {
    /// Build a snapshot for the current counters.
    pub fn new(nodes_explored: u64, max_nodes: u64, best_value: Option<f64>) -> Self {
        let percent = if max_nodes == 0 {
            100
        } else {
            (nodes_explored as f64 / max_nodes as f64 * 100.0)
                .round()
                .min(100.0) as u8
        };
        Self {
            nodes_explored,
            best_value,
            percent,
        }
    }
}

/// Receives progress snapshots from a running search.
///
/// Closures implement `ProgressObserver`, and `()` is a no-op observer.
pub trait ProgressObserver {
    /// Observe one snapshot.
    fn observe(&mut self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn observe(&mut self, progress: &Progress) {
        self(progress)
    }
}

impl ProgressObserver for () {
    fn observe(&mut self, _progress: &Progress) {}
}
