//! Session driving and result analysis.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use disksched_core::{Algorithm, AlgorithmResult, SchedError, Workload};

use crate::harness::EvaluationHarness;
use crate::interfaces::{CycleOutcome, CycleResults, ResultPresenter};

/// One item of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// A parsed workload, labelled with where it came from.
    Workload {
        /// Usually the file name.
        label: String,
        /// The workload to evaluate.
        workload: Workload,
    },
    /// An input that could not be read or parsed.
    Rejected {
        /// Usually the file name.
        label: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The user asked to stop.
    Quit,
}

/// What a session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Cycles that produced results.
    pub cycles: u64,
    /// Inputs that were reported as errors and skipped.
    pub rejected: u64,
    /// Whether a sentinel workload ended the session.
    pub terminated_by_sentinel: bool,
}

/// Feed `inputs` through `harness` until they run out, `Quit` arrives, or a
/// sentinel workload terminates the harness.
///
/// Unreadable and malformed inputs are reported to `presenter` and skipped.
/// Worker failures end the session with an error. The harness is shut down
/// on every path.
pub fn run_session<I>(
    harness: &mut EvaluationHarness,
    inputs: I,
    presenter: &dyn ResultPresenter,
) -> Result<SessionSummary, SchedError>
where
    I: IntoIterator<Item = SessionInput>,
{
    let mut summary = SessionSummary::default();

    for input in inputs {
        match input {
            SessionInput::Workload { label, workload } => match harness.submit(&workload) {
                Ok(CycleOutcome::Completed(results)) => {
                    debug!(source = %label, cycle = results.cycle, "presenting cycle");
                    presenter.present_cycle(&label, &results);
                    summary.cycles += 1;
                }
                Ok(CycleOutcome::Terminated) => {
                    info!(source = %label, "sentinel workload received");
                    summary.terminated_by_sentinel = true;
                    break;
                }
                Err(e @ SchedError::MalformedWorkload(_)) => {
                    warn!(source = %label, error = %e, "skipping workload");
                    presenter.present_error(&label, &e.to_string());
                    summary.rejected += 1;
                }
                Err(e) => {
                    error!(source = %label, error = %e, "session aborted");
                    presenter.present_error(&label, &e.to_string());
                    if let Err(stop) = harness.shutdown() {
                        error!(error = %stop, "harness did not stop cleanly");
                    }
                    return Err(e);
                }
            },
            SessionInput::Rejected { label, reason } => {
                warn!(source = %label, %reason, "skipping input");
                presenter.present_error(&label, &reason);
                summary.rejected += 1;
            }
            SessionInput::Quit => {
                info!("quit requested");
                break;
            }
        }
    }

    harness.shutdown()?;
    info!(cycles = summary.cycles, rejected = summary.rejected, "session finished");
    Ok(summary)
}

/// Ranking of one cycle's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleAnalysis {
    /// Results ascending by steps; ties keep reporting order.
    pub ranking: Vec<AlgorithmResult>,
    /// Every policy sharing the lowest cost.
    pub best: Vec<Algorithm>,
    /// Difference between the most and least expensive policy.
    pub spread: u64,
}

/// Rank a cycle's results by cost.
#[must_use]
pub fn analyze_cycle(results: &CycleResults) -> CycleAnalysis {
    let mut ranking: Vec<AlgorithmResult> = results.iter().copied().collect();
    ranking.sort_by_key(|r| r.steps);

    let min = ranking.first().map_or(0, |r| r.steps);
    let max = ranking.last().map_or(0, |r| r.steps);
    let best = ranking
        .iter()
        .take_while(|r| r.steps == min)
        .map(|r| r.algorithm)
        .collect();

    CycleAnalysis {
        ranking,
        best,
        spread: max - min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use parking_lot::Mutex;

    /// Records everything it is shown.
    #[derive(Default)]
    struct Recorder {
        cycles: Mutex<Vec<(String, u64)>>,
        errors: Mutex<Vec<(String, String)>>,
    }

    impl ResultPresenter for Recorder {
        fn present_cycle(&self, source: &str, results: &CycleResults) {
            self.cycles
                .lock()
                .push((source.to_string(), results.steps(Algorithm::Fcfs)));
        }

        fn present_error(&self, source: &str, error: &str) {
            self.errors.lock().push((source.to_string(), error.to_string()));
        }
    }

    fn input(label: &str, text: &str) -> SessionInput {
        SessionInput::Workload {
            label: label.to_string(),
            workload: text.parse().unwrap(),
        }
    }

    #[test]
    fn session_presents_each_cycle() {
        let mut harness = EvaluationHarness::start().unwrap();
        let recorder = Recorder::default();
        let inputs = vec![
            input("a.txt", "200 53 53 98 183 37 122 14 124 65 67"),
            input("b.txt", "200 50 50 42"),
        ];
        let summary = run_session(&mut harness, inputs, &recorder).unwrap();

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.rejected, 0);
        assert!(!summary.terminated_by_sentinel);
        assert_eq!(
            *recorder.cycles.lock(),
            [("a.txt".to_string(), 640), ("b.txt".to_string(), 8)]
        );
        assert!(!harness.is_running());
    }

    #[test]
    fn session_skips_bad_inputs() {
        let mut harness = EvaluationHarness::start().unwrap();
        let recorder = Recorder::default();
        let inputs = vec![
            SessionInput::Rejected {
                label: "missing.txt".to_string(),
                reason: "file not found".to_string(),
            },
            input("off-disk.txt", "100 10 10 150"),
            input("good.txt", "200 50 50 42"),
        ];
        let summary = run_session(&mut harness, inputs, &recorder).unwrap();

        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.rejected, 2);
        let errors = recorder.errors.lock();
        assert_eq!(errors[0].0, "missing.txt");
        assert_eq!(errors[1].0, "off-disk.txt");
        assert!(errors[1].1.starts_with("malformed workload"));
    }

    #[test]
    fn sentinel_ends_session() {
        let mut harness = EvaluationHarness::start().unwrap();
        let recorder = Recorder::default();
        let inputs = vec![
            input("a.txt", "200 50 50 42"),
            input("stop.txt", "0 0 0"),
            input("never.txt", "200 50 50 42"),
        ];
        let summary = run_session(&mut harness, inputs, &recorder).unwrap();

        assert_eq!(summary.cycles, 1);
        assert!(summary.terminated_by_sentinel);
        assert_eq!(recorder.cycles.lock().len(), 1);
    }

    #[test]
    fn quit_ends_session() {
        let mut harness = EvaluationHarness::start().unwrap();
        let inputs = vec![SessionInput::Quit, input("never.txt", "200 50 50 42")];
        let summary = run_session(&mut harness, inputs, &crate::NullPresenter).unwrap();
        assert_eq!(summary, SessionSummary::default());
        assert!(!harness.is_running());
    }

    #[test]
    fn stopped_harness_aborts_session() {
        let mut harness = EvaluationHarness::start().unwrap();
        harness.shutdown().unwrap();
        let recorder = Recorder::default();
        let result = run_session(&mut harness, vec![input("a.txt", "200 50 50 42")], &recorder);
        assert_eq!(result, Err(SchedError::ShutDown));
        assert_eq!(recorder.errors.lock().len(), 1);
    }

    fn results(steps: [u64; 6]) -> CycleResults {
        CycleResults {
            cycle: 1,
            results: Algorithm::ALL.map(|a| AlgorithmResult::new(a, steps[a.index()])),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn analyze_textbook_cycle() {
        let analysis = analyze_cycle(&results([640, 236, 236, 386, 208, 326]));
        assert_eq!(analysis.best, [Algorithm::Look]);
        assert_eq!(analysis.spread, 640 - 208);
        let order: Vec<_> = analysis.ranking.iter().map(|r| r.algorithm).collect();
        assert_eq!(
            order,
            [
                Algorithm::Look,
                Algorithm::Sstf,
                Algorithm::Scan,
                Algorithm::CLook,
                Algorithm::CScan,
                Algorithm::Fcfs,
            ]
        );
    }

    #[test]
    fn analyze_ties_keep_reporting_order() {
        let analysis = analyze_cycle(&results([8; 6]));
        assert_eq!(analysis.best, Algorithm::ALL);
        assert_eq!(analysis.spread, 0);
    }
}
