//! # disksched-orchestration
//!
//! Persistent per-policy workers, cycle coordination, and result analysis.

pub mod harness;
pub mod interfaces;
pub mod orchestrator;
mod worker;

pub use harness::EvaluationHarness;
pub use interfaces::{CycleOutcome, CycleResults, NullPresenter, ResultPresenter};
pub use orchestrator::{analyze_cycle, run_session, CycleAnalysis, SessionInput, SessionSummary};
pub use worker::WorkerState;
