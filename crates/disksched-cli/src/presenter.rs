//! CLI result presenters.

use std::path::PathBuf;

use tracing::warn;

use disksched_orchestration::{CycleResults, ResultPresenter};

use crate::output::{append_line, format_cycle, format_duration, CycleRecord, SEPARATOR_WIDTH};
use crate::ui;

/// Text presenter.
///
/// Quiet mode prints the classic `For file (...)` block and nothing else.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_cycle(&self, source: &str, results: &CycleResults) {
        print!("{}", format_cycle(source, results, !self.quiet));
        if self.quiet {
            return;
        }
        if self.verbose {
            println!(
                "Cycle {} evaluated in {}",
                results.cycle,
                format_duration(results.duration)
            );
        }
        println!("{:-<SEPARATOR_WIDTH$}", "");
    }

    fn present_error(&self, source: &str, error: &str) {
        ui::print_error(&format!("{source}: {error}"));
    }
}

/// Presenter printing one JSON object per cycle on stdout.
pub struct JsonPresenter;

impl ResultPresenter for JsonPresenter {
    fn present_cycle(&self, source: &str, results: &CycleResults) {
        match CycleRecord::new(source, results).to_json_line() {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "cannot serialize cycle"),
        }
    }

    fn present_error(&self, source: &str, error: &str) {
        ui::print_error(&format!("{source}: {error}"));
    }
}

/// Forwards to another presenter and appends every cycle as a JSON line to
/// a file.
pub struct RecordingPresenter {
    inner: Box<dyn ResultPresenter>,
    path: PathBuf,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new(inner: Box<dyn ResultPresenter>, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }
}

impl ResultPresenter for RecordingPresenter {
    fn present_cycle(&self, source: &str, results: &CycleResults) {
        self.inner.present_cycle(source, results);
        let recorded = CycleRecord::new(source, results)
            .to_json_line()
            .map_err(std::io::Error::from)
            .and_then(|line| append_line(&self.path, &line));
        if let Err(e) = recorded {
            warn!(path = %self.path.display(), error = %e, "cannot record cycle");
        }
    }

    fn present_error(&self, source: &str, error: &str) {
        self.inner.present_error(source, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use disksched_core::{Algorithm, AlgorithmResult};
    use disksched_orchestration::NullPresenter;

    fn sample(cycle: u64) -> CycleResults {
        CycleResults {
            cycle,
            results: Algorithm::ALL.map(|a| AlgorithmResult::new(a, 8)),
            duration: Duration::from_millis(2),
        }
    }

    #[test]
    fn presenter_modes() {
        let presenter = CLIResultPresenter::new(true, false);
        assert!(presenter.verbose);
        assert!(!presenter.quiet);
    }

    #[test]
    fn cli_presenter_does_not_panic() {
        for (verbose, quiet) in [(false, false), (true, false), (false, true)] {
            let presenter = CLIResultPresenter::new(verbose, quiet);
            presenter.present_cycle("a.txt", &sample(1));
            presenter.present_error("a.txt", "file not found");
        }
    }

    #[test]
    fn json_presenter_does_not_panic() {
        JsonPresenter.present_cycle("a.txt", &sample(1));
        JsonPresenter.present_error("a.txt", "file not found");
    }

    #[test]
    fn recording_presenter_appends_each_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycles.jsonl");
        let presenter = RecordingPresenter::new(Box::new(NullPresenter), &path);
        presenter.present_cycle("a.txt", &sample(1));
        presenter.present_error("b.txt", "ignored");
        presenter.present_cycle("c.txt", &sample(2));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["source"], "a.txt");
        assert_eq!(lines[1]["cycle"], 2);
        assert_eq!(lines[1]["best"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn recording_presenter_survives_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = RecordingPresenter::new(Box::new(NullPresenter), dir.path());
        presenter.present_cycle("a.txt", &sample(1));
    }
}
