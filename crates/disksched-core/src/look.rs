//! LOOK and circular LOOK: elevator policies that turn at the farthest
//! request instead of the disk edge.

use crate::algorithm::Algorithm;
use crate::policy::{seek, CorePolicy};
use crate::workload::{Direction, Workload};

/// Elevator that runs to the farthest request in its direction, then reverses
/// to the farthest request on the other side.
#[derive(Debug, Default, Clone, Copy)]
pub struct Look;

impl Look {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for Look {
    fn steps(&self, workload: &Workload) -> u64 {
        let Some((lo, hi)) = workload.span() else {
            return 0;
        };
        match workload.direction() {
            Direction::Forward => seek(workload.head, hi) + seek(hi, lo),
            Direction::Backward => seek(workload.head, lo) + seek(lo, hi),
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Look
    }
}

/// Circular LOOK: after the sweep, jump to the far end of the queue and carry
/// on in the original direction up to the request nearest the starting head.
#[derive(Debug, Default, Clone, Copy)]
pub struct CircularLook;

impl CircularLook {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for CircularLook {
    fn steps(&self, workload: &Workload) -> u64 {
        let Some((lo, hi)) = workload.span() else {
            return 0;
        };
        let head = workload.head;
        match workload.direction() {
            Direction::Forward => {
                let wrapped = workload.nearest_below(head).map_or(0, |c| seek(lo, c));
                seek(head, hi) + seek(hi, lo) + wrapped
            }
            Direction::Backward => {
                let wrapped = workload.nearest_above(head).map_or(0, |c| seek(hi, c));
                seek(head, lo) + seek(lo, hi) + wrapped
            }
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::CLook
    }
}
