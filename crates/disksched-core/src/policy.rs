//! Policy traits and the `SeekPolicy` decorator.
//!
//! `Policy` is the public trait consumed by orchestration.
//! `CorePolicy` is the internal trait implemented by each algorithm.
//! `SeekPolicy` is a decorator that adds the trivial paths (nothing pending,
//! a single target cylinder) before delegating to the algorithm.

use std::sync::Arc;

use tracing::trace;

use crate::algorithm::{Algorithm, AlgorithmResult};
use crate::workload::{Cylinder, Workload};

/// Error type for workload evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedError {
    /// The workload is missing fields or names cylinders off the disk.
    #[error("malformed workload: {0}")]
    MalformedWorkload(String),

    /// A worker cannot take part in the next cycle.
    #[error("worker unavailable: {0}")]
    WorkerUnavailable(String),

    /// A worker failed during a cycle.
    #[error("worker {algorithm} failed: {reason}")]
    WorkerFailed {
        /// Policy bound to the failing worker.
        algorithm: Algorithm,
        /// What went wrong.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The harness no longer accepts workloads.
    #[error("evaluation harness has been shut down")]
    ShutDown,
}

/// Public trait for scheduling policies, consumed by orchestration.
pub trait Policy: Send + Sync {
    /// Total head movement needed to service `workload`.
    fn total_steps(&self, workload: &Workload) -> u64;

    /// Identity of this policy.
    fn algorithm(&self) -> Algorithm;

    /// Display name of this policy.
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    /// Evaluate and tag the result with this policy's identity.
    fn evaluate(&self, workload: &Workload) -> AlgorithmResult {
        AlgorithmResult::new(self.algorithm(), self.total_steps(workload))
    }
}

/// Internal trait for algorithm implementations.
///
/// `steps` is only called with at least two distinct pending cylinders.
pub trait CorePolicy: Send + Sync {
    /// Head movement for a workload with a non-trivial pending set.
    fn steps(&self, workload: &Workload) -> u64;

    /// Identity of this algorithm.
    fn algorithm(&self) -> Algorithm;
}

/// Decorator that wraps a `CorePolicy` with the trivial paths.
pub struct SeekPolicy {
    inner: Arc<dyn CorePolicy>,
}

impl SeekPolicy {
    /// Create a new `SeekPolicy` wrapping the given algorithm.
    #[must_use]
    pub fn new(inner: Arc<dyn CorePolicy>) -> Self {
        Self { inner }
    }

    /// Cost when the pending set needs no sweep: zero requests, or every
    /// request on the same cylinder.
    fn trivial_steps(workload: &Workload) -> Option<u64> {
        match workload.span() {
            None => Some(0),
            Some((lo, hi)) if lo == hi => Some(seek(workload.head, lo)),
            Some(_) => None,
        }
    }
}

impl Policy for SeekPolicy {
    fn total_steps(&self, workload: &Workload) -> u64 {
        let steps =
            Self::trivial_steps(workload).unwrap_or_else(|| self.inner.steps(workload));
        trace!(
            policy = %self.inner.algorithm(),
            pending = workload.pending.len(),
            steps,
            "evaluated workload"
        );
        steps
    }

    fn algorithm(&self) -> Algorithm {
        self.inner.algorithm()
    }
}

/// Seek distance between two cylinders.
#[inline]
#[must_use]
pub fn seek(from: Cylinder, to: Cylinder) -> u64 {
    u64::from(from.abs_diff(to))
}
