//! Background solves with progress messages.
//!
//! [`spawn`] runs one solve on a dedicated thread. The caller receives zero
//! or more [`SolverMessage::Progress`] messages followed by exactly one
//! [`SolverMessage::Finished`].

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::error::{MipError, MipResult};
use crate::model::{MipProblem, MipSolution};
use crate::progress::Progress;
use crate::settings::{BranchingRule, MipSettings};

/// A solve request as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// The integer program.
    pub problem: MipProblem,

    /// Branching rule.
    #[serde(default)]
    pub branch_strategy: BranchingRule,

    /// Node budget (settings default when absent).
    #[serde(default)]
    pub max_nodes: Option<u64>,
}

impl SolveRequest {
    /// Create a request with default strategy and budget.
    pub fn new(problem: MipProblem) -> Self {
        Self {
            problem,
            branch_strategy: BranchingRule::default(),
            max_nodes: None,
        }
    }

    /// Apply the request's strategy and budget on top of `base`.
    pub fn settings(&self, base: MipSettings) -> MipSettings {
        let settings = base.with_branching_rule(self.branch_strategy);
        match self.max_nodes {
            Some(n) => settings.with_max_nodes(n),
            None => settings,
        }
    }
}

/// Message sent from a solver thread.
#[derive(Debug, Clone)]
pub enum SolverMessage {
    /// Periodic progress snapshot.
    Progress(Progress),

    /// Final outcome; always the last message.
    Finished(MipResult<MipSolution>),
}

/// Handle to a running background solve.
pub struct SolveHandle {
    receiver: Receiver<SolverMessage>,
    thread: JoinHandle<()>,
}

impl SolveHandle {
    /// Block for the next message; None once the solver is done.
    pub fn recv(&self) -> Option<SolverMessage> {
        self.receiver.recv().ok()
    }

    /// Iterate over messages until the solver thread finishes.
    pub fn messages(&self) -> impl Iterator<Item = SolverMessage> + '_ {
        self.receiver.iter()
    }

    /// Wait for the final result, discarding progress.
    pub fn wait(self) -> MipResult<MipSolution> {
        for message in self.receiver.iter() {
            if let SolverMessage::Finished(result) = message {
                return result;
            }
        }
        match self.thread.join() {
            Ok(()) => Err(MipError::Worker(
                "solver thread exited without a result".to_string(),
            )),
            Err(_) => Err(MipError::Worker("solver thread panicked".to_string())),
        }
    }
}

/// Start solving `request` on a new thread.
///
/// `settings` supplies everything the request does not override.
pub fn spawn(request: SolveRequest, settings: MipSettings) -> MipResult<SolveHandle> {
    let settings = request.settings(settings);
    let (sender, receiver) = mpsc::channel();

    let thread = thread::Builder::new()
        .name("mip-solver".to_string())
        .spawn(move || {
            let mut forward = |progress: &Progress| {
                // The receiver may be gone; the solve still runs to completion.
                let _ = sender.send(SolverMessage::Progress(progress.clone()));
            };
            let result = crate::solve_mip_observed(&request.problem, &settings, &mut forward);
            let _ = sender.send(SolverMessage::Finished(result));
        })
        .map_err(|e| MipError::Worker(e.to_string()))?;

    log::debug!("Spawned solver thread");
    Ok(SolveHandle { receiver, thread })
}
