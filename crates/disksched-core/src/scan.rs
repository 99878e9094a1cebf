//! SCAN and circular SCAN: elevator policies that always travel to the
//! physical edge of the disk before turning or wrapping.

use crate::algorithm::Algorithm;
use crate::policy::{seek, CorePolicy};
use crate::workload::{Direction, Workload};

/// Elevator that sweeps to the disk edge, then reverses.
///
/// Moving forward, the head runs to the top edge and back down to the lowest
/// request. Moving backward, it runs to cylinder 0 and back up to the highest
/// request. The return leg is charged even when every request lies ahead of
/// the head.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scan;

impl Scan {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for Scan {
    fn steps(&self, workload: &Workload) -> u64 {
        let Some((lo, hi)) = workload.span() else {
            return 0;
        };
        let edge = workload.edge();
        match workload.direction() {
            Direction::Forward => seek(workload.head, edge) + seek(edge, lo),
            Direction::Backward => seek(workload.head, 0) + seek(0, hi),
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Scan
    }
}

/// Elevator that sweeps to the disk edge, jumps to the opposite edge, and
/// keeps going in the original direction.
///
/// With nothing left on the far side of the wrap, the trailing leg is empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct CircularScan;

impl CircularScan {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CorePolicy for CircularScan {
    fn steps(&self, workload: &Workload) -> u64 {
        let head = workload.head;
        let edge = workload.edge();
        match workload.direction() {
            Direction::Forward => {
                let wrapped = workload.nearest_below(head).map_or(0, |c| seek(0, c));
                seek(head, edge) + seek(edge, 0) + wrapped
            }
            Direction::Backward => {
                let wrapped = workload.nearest_above(head).map_or(0, |c| seek(edge, c));
                seek(head, 0) + seek(0, edge) + wrapped
            }
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::CScan
    }
}
