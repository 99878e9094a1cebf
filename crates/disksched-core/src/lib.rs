//! # disksched-core
//!
//! Workload model and the six disk-scheduling policies (FCFS, SSTF, SCAN,
//! C-SCAN, LOOK, C-LOOK), each a pure function from a workload to the total
//! head movement it incurs.

pub mod algorithm;
pub mod constants;
pub mod fcfs;
pub mod look;
pub mod policy;
pub mod registry;
pub mod scan;
pub mod sstf;
pub mod workload;

// Re-exports
pub use algorithm::{Algorithm, AlgorithmResult};
pub use constants::{exit_codes, DEFAULT_QUIT_WORD, HEADER_FIELDS, POLICY_COUNT};
pub use policy::{CorePolicy, Policy, SchedError, SeekPolicy};
pub use registry::{DefaultFactory, PolicyFactory};
pub use workload::{Cylinder, Direction, Workload};

/// Total head movement `algorithm` incurs on `workload`.
///
/// Convenience entry point for one-off evaluations; the harness binds
/// long-lived policies through [`PolicyFactory`] instead.
///
/// # Example
/// ```
/// use disksched_core::{total_steps, Algorithm, Workload};
///
/// let w = Workload::new(200, 53, 53, vec![98, 183, 37, 122, 14, 124, 65, 67]);
/// assert_eq!(total_steps(Algorithm::Fcfs, &w), 640);
/// assert_eq!(total_steps(Algorithm::Sstf, &w), 236);
/// ```
#[must_use]
pub fn total_steps(algorithm: Algorithm, workload: &Workload) -> u64 {
    DefaultFactory::create_policy(algorithm).total_steps(workload)
}

/// First-come-first-served head movement.
#[must_use]
pub fn fcfs(workload: &Workload) -> u64 {
    total_steps(Algorithm::Fcfs, workload)
}

/// Shortest-seek-time-first head movement.
#[must_use]
pub fn sstf(workload: &Workload) -> u64 {
    total_steps(Algorithm::Sstf, workload)
}

/// SCAN head movement.
#[must_use]
pub fn scan(workload: &Workload) -> u64 {
    total_steps(Algorithm::Scan, workload)
}

/// Circular SCAN head movement.
#[must_use]
pub fn c_scan(workload: &Workload) -> u64 {
    total_steps(Algorithm::CScan, workload)
}

/// LOOK head movement.
#[must_use]
pub fn look(workload: &Workload) -> u64 {
    total_steps(Algorithm::Look, workload)
}

/// Circular LOOK head movement.
#[must_use]
pub fn c_look(workload: &Workload) -> u64 {
    total_steps(Algorithm::CLook, workload)
}

/// Evaluate every policy sequentially, in reporting order.
#[must_use]
pub fn evaluate_all(workload: &Workload) -> Vec<AlgorithmResult> {
    Algorithm::ALL
        .iter()
        .map(|&a| AlgorithmResult::new(a, total_steps(a, workload)))
        .collect()
}
