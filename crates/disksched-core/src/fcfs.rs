//! First-come-first-served.

use crate::algorithm::Algorithm;
use crate::policy::{seek, CorePolicy};
use crate::workload::Workload;

/// Services requests strictly in queue order, ignoring direction.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fcfs;

impl Fcfs {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for Fcfs {
    fn steps(&self, workload: &Workload) -> u64 {
        workload
            .pending
            .iter()
            .fold((workload.head, 0u64), |(current, total), &next| {
                (next, total + seek(current, next))
            })
            .1
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }
}
