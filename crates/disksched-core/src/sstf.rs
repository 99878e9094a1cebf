//! Shortest-seek-time-first.

use crate::algorithm::Algorithm;
use crate::policy::{seek, CorePolicy};
use crate::workload::Workload;

/// Greedily services the closest unserviced request.
///
/// Equidistant candidates resolve to the lower cylinder, so the total never
/// depends on queue order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sstf;

impl Sstf {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for Sstf {
    fn steps(&self, workload: &Workload) -> u64 {
        let pending = &workload.pending;
        let mut serviced = vec![false; pending.len()];
        let mut current = workload.head;
        let mut total = 0u64;

        for _ in 0..pending.len() {
            let closest = pending
                .iter()
                .enumerate()
                .filter(|&(i, _)| !serviced[i])
                .min_by_key(|&(_, &c)| (seek(current, c), c));
            let Some((i, &next)) = closest else {
                break;
            };
            serviced[i] = true;
            total += seek(current, next);
            current = next;
        }

        total
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sstf
    }
}
