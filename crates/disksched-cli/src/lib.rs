//! # disksched-cli
//!
//! Workload input, result presentation, and shell completion.

pub mod completion;
pub mod input;
pub mod output;
pub mod presenter;
pub mod ui;

pub use input::{read_workload_file, session_inputs, FilenameSource, InputError};
pub use presenter::{CLIResultPresenter, JsonPresenter, RecordingPresenter};
