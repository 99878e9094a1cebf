//! Orchestration interfaces.

use std::time::Duration;

use serde::Serialize;

use disksched_core::{Algorithm, AlgorithmResult, POLICY_COUNT};

/// Trait for presenting cycle results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the six results of one cycle. `source` names the workload,
    /// usually the file it was read from.
    fn present_cycle(&self, source: &str, results: &CycleResults);

    /// Present an error tied to one input.
    fn present_error(&self, source: &str, error: &str);
}

/// The six results of one cycle, in reporting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleResults {
    /// Sequence number of the cycle, starting at 1.
    pub cycle: u64,
    /// One result per policy; `results[a.index()]` belongs to `a`.
    pub results: [AlgorithmResult; POLICY_COUNT],
    /// Wall time from broadcast to the last report.
    #[serde(skip)]
    pub duration: Duration,
}

impl CycleResults {
    /// Steps reported by `algorithm`.
    #[must_use]
    pub fn steps(&self, algorithm: Algorithm) -> u64 {
        self.results[algorithm.index()].steps
    }

    /// Results in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmResult> {
        self.results.iter()
    }
}

/// What a submitted workload led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A full cycle ran.
    Completed(CycleResults),
    /// The sentinel was submitted; every worker has stopped.
    Terminated,
}

/// Null presenter (does nothing).
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_cycle(&self, _source: &str, _results: &CycleResults) {}
    fn present_error(&self, _source: &str, _error: &str) {}
}
