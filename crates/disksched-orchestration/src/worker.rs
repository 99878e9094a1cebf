//! Persistent policy workers.
//!
//! Each worker owns one policy and loops for the lifetime of the harness:
//! wait for a broadcast, evaluate it, report back, wait again. Workers share
//! nothing with each other; everything goes through the coordinator.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, error, trace};

use disksched_core::{Algorithm, Policy, Workload, POLICY_COUNT};

/// Lifecycle of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for the next broadcast.
    Idle,
    /// Running its policy.
    Computing,
    /// Handing its result to the coordinator.
    ///
    /// Transient: a worker returns to `Idle` before its report is sent, so
    /// the coordinator never sees this state between cycles.
    Reporting,
    /// Saw the sentinel and exited. Terminal.
    Stopped,
}

/// Per-worker states, indexed by `Algorithm::index`.
pub(crate) type StateTable = Arc<Mutex<[WorkerState; POLICY_COUNT]>>;

/// One workload sent to one worker.
pub(crate) struct Broadcast {
    pub(crate) cycle: u64,
    pub(crate) workload: Arc<Workload>,
}

/// One worker's answer for one cycle.
pub(crate) struct Report {
    pub(crate) cycle: u64,
    pub(crate) algorithm: Algorithm,
    /// Steps, or the panic message if the policy panicked.
    pub(crate) outcome: Result<u64, String>,
}

/// Coordinator-side handle to a running worker.
pub(crate) struct WorkerHandle {
    pub(crate) algorithm: Algorithm,
    pub(crate) commands: Sender<Broadcast>,
    pub(crate) thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Whether the worker thread has exited.
    pub(crate) fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

/// Spawn a named worker thread bound to `policy`.
pub(crate) fn spawn_worker(
    policy: Arc<dyn Policy>,
    commands: Receiver<Broadcast>,
    reports: Sender<Report>,
    states: StateTable,
) -> io::Result<JoinHandle<()>> {
    let name = format!("disksched-worker-{}", policy.name());
    thread::Builder::new()
        .name(name)
        .spawn(move || run(policy.as_ref(), &commands, &reports, &states))
}

fn run(
    policy: &dyn Policy,
    commands: &Receiver<Broadcast>,
    reports: &Sender<Report>,
    states: &StateTable,
) {
    let algorithm = policy.algorithm();
    let set_state = |state: WorkerState| {
        states.lock()[algorithm.index()] = state;
        trace!(%algorithm, ?state, "worker state");
    };
    debug!(%algorithm, "worker started");

    loop {
        let Ok(Broadcast { cycle, workload }) = commands.recv() else {
            error!(%algorithm, "coordinator disconnected without a sentinel");
            break;
        };
        if workload.is_sentinel() {
            break;
        }

        set_state(WorkerState::Computing);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| policy.total_steps(&workload)))
            .map_err(|payload| panic_message(payload.as_ref()));
        drop(workload);

        set_state(WorkerState::Reporting);
        let report = Report {
            cycle,
            algorithm,
            outcome,
        };
        set_state(WorkerState::Idle);
        if reports.send(report).is_err() {
            error!(%algorithm, "coordinator dropped the report channel");
            break;
        }
    }

    set_state(WorkerState::Stopped);
    debug!(%algorithm, "worker stopped");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "policy panicked".to_string()
    }
}
