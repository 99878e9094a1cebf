//! The evaluation harness: six persistent workers and the coordinator that
//! drives them one cycle at a time.
//!
//! A cycle broadcasts one workload to every worker over its own command
//! channel, then collects exactly six reports from the shared report
//! channel. Reports are slotted by the policy identity they carry, never by
//! arrival order. Channels and threads are created once in
//! [`EvaluationHarness::with_policies`] and reused until shutdown.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use disksched_core::{
    Algorithm, AlgorithmResult, DefaultFactory, Policy, PolicyFactory, SchedError, Workload,
    POLICY_COUNT,
};

use crate::interfaces::{CycleOutcome, CycleResults};
use crate::worker::{spawn_worker, Broadcast, Report, StateTable, WorkerHandle, WorkerState};

/// Coordinator for the persistent policy workers.
pub struct EvaluationHarness {
    /// Indexed by `Algorithm::index`.
    workers: Vec<WorkerHandle>,
    reports: Receiver<Report>,
    states: StateTable,
    cycle: u64,
    cycles_completed: u64,
    running: bool,
}

impl EvaluationHarness {
    /// Start a harness with the six built-in policies.
    pub fn start() -> Result<Self, SchedError> {
        Self::with_factory(&DefaultFactory::new())
    }

    /// Start a harness with every policy `factory` resolves.
    pub fn with_factory(factory: &dyn PolicyFactory) -> Result<Self, SchedError> {
        Self::with_policies(factory.all())
    }

    /// Start a harness with exactly one policy per algorithm.
    ///
    /// # Errors
    /// `Config` if an algorithm is missing or bound twice, `WorkerUnavailable`
    /// if a worker thread cannot be spawned.
    pub fn with_policies(policies: Vec<Arc<dyn Policy>>) -> Result<Self, SchedError> {
        let mut slots: [Option<Arc<dyn Policy>>; POLICY_COUNT] = std::array::from_fn(|_| None);
        for policy in policies {
            let algorithm = policy.algorithm();
            let slot = &mut slots[algorithm.index()];
            if slot.is_some() {
                return Err(SchedError::Config(format!(
                    "policy {algorithm} is bound more than once"
                )));
            }
            *slot = Some(policy);
        }
        let policies: Vec<Arc<dyn Policy>> = Algorithm::ALL
            .into_iter()
            .zip(slots)
            .map(|(algorithm, slot)| {
                slot.ok_or_else(|| SchedError::Config(format!("no policy bound to {algorithm}")))
            })
            .collect::<Result<_, _>>()?;

        let (report_tx, report_rx) = bounded(POLICY_COUNT);
        let mut harness = Self {
            workers: Vec::with_capacity(POLICY_COUNT),
            reports: report_rx,
            states: Arc::new(Mutex::new([WorkerState::Idle; POLICY_COUNT])),
            cycle: 0,
            cycles_completed: 0,
            running: true,
        };

        for policy in policies {
            let algorithm = policy.algorithm();
            let (cmd_tx, cmd_rx) = bounded(1);
            match spawn_worker(policy, cmd_rx, report_tx.clone(), Arc::clone(&harness.states)) {
                Ok(thread) => harness.workers.push(WorkerHandle {
                    algorithm,
                    commands: cmd_tx,
                    thread: Some(thread),
                }),
                Err(e) => {
                    if let Err(stop) = harness.shutdown() {
                        warn!(error = %stop, "partial harness did not stop cleanly");
                    }
                    return Err(SchedError::WorkerUnavailable(format!(
                        "cannot spawn {algorithm} worker: {e}"
                    )));
                }
            }
        }

        info!(workers = POLICY_COUNT, "evaluation harness started");
        Ok(harness)
    }

    /// Run one cycle.
    ///
    /// The sentinel shuts the harness down and yields
    /// [`CycleOutcome::Terminated`]. Any other workload is validated and, if
    /// valid, evaluated by all six workers.
    ///
    /// # Errors
    /// - `ShutDown` once the harness has stopped.
    /// - `MalformedWorkload` if validation fails; no worker is involved and
    ///   the harness stays usable.
    /// - `WorkerFailed` if a policy failed; every other report is still
    ///   drained, so the harness stays usable.
    /// - `WorkerUnavailable` if a worker is gone or stuck; the harness stops.
    pub fn submit(&mut self, workload: &Workload) -> Result<CycleOutcome, SchedError> {
        if !self.running {
            return Err(SchedError::ShutDown);
        }
        if workload.is_sentinel() {
            self.shutdown()?;
            return Ok(CycleOutcome::Terminated);
        }
        workload.validate()?;
        self.ensure_idle()?;

        self.cycle += 1;
        let cycle = self.cycle;
        let shared = Arc::new(workload.clone());
        let start = Instant::now();
        debug!(cycle, pending = workload.pending.len(), "broadcasting workload");

        let refused = self.workers.iter().position(|worker| {
            worker
                .commands
                .send(Broadcast {
                    cycle,
                    workload: Arc::clone(&shared),
                })
                .is_err()
        });
        if let Some(index) = refused {
            let algorithm = self.workers[index].algorithm;
            self.drain(index);
            self.abort();
            return Err(SchedError::WorkerUnavailable(format!(
                "{algorithm} worker stopped accepting workloads"
            )));
        }

        let results = self.collect(cycle)?;
        self.cycles_completed += 1;
        let duration = start.elapsed();
        debug!(cycle, ?duration, "cycle complete");
        Ok(CycleOutcome::Completed(CycleResults {
            cycle,
            results,
            duration,
        }))
    }

    /// Stop every worker and wait for it to exit.
    ///
    /// Idempotent: the sentinel reaches each worker exactly once, and later
    /// calls return `Ok(())` without doing anything.
    pub fn shutdown(&mut self) -> Result<(), SchedError> {
        if !self.running {
            return Ok(());
        }
        self.running = false;

        let sentinel = Arc::new(Workload::sentinel());
        for worker in &self.workers {
            let broadcast = Broadcast {
                cycle: self.cycle,
                workload: Arc::clone(&sentinel),
            };
            if worker.commands.send(broadcast).is_err() {
                warn!(algorithm = %worker.algorithm, "worker already gone at shutdown");
            }
        }

        let mut failed = None;
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    error!(algorithm = %worker.algorithm, "worker thread panicked");
                    failed.get_or_insert(worker.algorithm);
                }
            }
        }

        info!(cycles = self.cycles_completed, "evaluation harness shut down");
        match failed {
            Some(algorithm) => Err(SchedError::WorkerFailed {
                algorithm,
                reason: "worker thread panicked".to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Current state of every worker, in reporting order.
    #[must_use]
    pub fn worker_states(&self) -> [(Algorithm, WorkerState); POLICY_COUNT] {
        let states = *self.states.lock();
        Algorithm::ALL.map(|a| (a, states[a.index()]))
    }

    /// Number of cycles that produced a full result set.
    #[must_use]
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Whether the harness still accepts workloads.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Every worker must be idle and alive before a broadcast.
    fn ensure_idle(&mut self) -> Result<(), SchedError> {
        let states = *self.states.lock();
        let unavailable = self.workers.iter().find_map(|worker| {
            let state = states[worker.algorithm.index()];
            if worker.is_finished() {
                Some((worker.algorithm, WorkerState::Stopped))
            } else if state != WorkerState::Idle {
                Some((worker.algorithm, state))
            } else {
                None
            }
        });
        match unavailable {
            Some((algorithm, state)) => {
                self.abort();
                Err(SchedError::WorkerUnavailable(format!(
                    "{algorithm} worker is {state:?}, expected Idle"
                )))
            }
            None => Ok(()),
        }
    }

    /// Receive exactly one report per worker and slot each by identity.
    fn collect(&mut self, cycle: u64) -> Result<[AlgorithmResult; POLICY_COUNT], SchedError> {
        let mut results = Algorithm::ALL.map(|a| AlgorithmResult::new(a, 0));
        let mut seen = [false; POLICY_COUNT];
        let mut failure = None;

        for _ in 0..POLICY_COUNT {
            let Ok(report) = self.reports.recv() else {
                self.abort();
                return Err(SchedError::WorkerUnavailable(
                    "report channel closed mid-cycle".to_string(),
                ));
            };
            let Report {
                cycle: reported,
                algorithm,
                outcome,
            } = report;
            let slot = algorithm.index();

            let problem = if reported != cycle {
                Some(format!("reported for cycle {reported} during cycle {cycle}"))
            } else if seen[slot] {
                Some("reported twice in one cycle".to_string())
            } else {
                seen[slot] = true;
                match outcome {
                    Ok(steps) => {
                        results[slot].steps = steps;
                        None
                    }
                    Err(reason) => Some(reason),
                }
            };
            if let Some(reason) = problem {
                warn!(cycle, %algorithm, %reason, "worker failed");
                failure.get_or_insert(SchedError::WorkerFailed { algorithm, reason });
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }

    /// Discard the reports of the first `sent` workers of an aborted cycle.
    fn drain(&self, sent: usize) {
        for _ in 0..sent {
            if self.reports.recv().is_err() {
                break;
            }
        }
    }

    /// Stop without the sentinel. Senders are dropped so live workers exit
    /// on their own; only threads that have already exited are joined.
    fn abort(&mut self) {
        self.running = false;
        for WorkerHandle {
            algorithm,
            commands,
            thread,
        } in self.workers.drain(..)
        {
            drop(commands);
            match thread {
                Some(thread) if thread.is_finished() => {
                    if thread.join().is_err() {
                        error!(%algorithm, "worker thread panicked");
                    }
                }
                Some(_) => debug!(%algorithm, "detaching worker"),
                None => {}
            }
        }
        error!(cycles = self.cycles_completed, "evaluation harness aborted");
    }
}

impl Drop for EvaluationHarness {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!(error = %e, "evaluation harness did not stop cleanly");
        }
    }
}
