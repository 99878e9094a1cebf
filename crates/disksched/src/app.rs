//! Application entry point and dispatch.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing::info;

use disksched_cli::input::{session_inputs, FilenameSource};
use disksched_cli::presenter::{CLIResultPresenter, JsonPresenter, RecordingPresenter};
use disksched_cli::ui;
use disksched_orchestration::{run_session, EvaluationHarness, ResultPresenter, SessionSummary};

use crate::config::{AppConfig, OutputFormat};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<SessionSummary> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        disksched_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(SessionSummary::default());
    }

    config.validate()?;
    let presenter = build_presenter(config);
    let mut harness = EvaluationHarness::start().context("cannot start evaluation harness")?;

    let summary = if config.interactive() {
        run_interactive(config, &mut harness, presenter.as_ref())?
    } else {
        let names = config.files.iter().cloned().map(Ok);
        run_session(
            &mut harness,
            session_inputs(names, &config.quit_word),
            presenter.as_ref(),
        )?
    };

    info!(
        cycles = summary.cycles,
        rejected = summary.rejected,
        sentinel = summary.terminated_by_sentinel,
        "done"
    );
    Ok(summary)
}

fn build_presenter(config: &AppConfig) -> Box<dyn ResultPresenter> {
    let presenter: Box<dyn ResultPresenter> = match config.format {
        OutputFormat::Text => Box::new(CLIResultPresenter::new(config.verbose, config.quiet)),
        OutputFormat::Json => Box::new(JsonPresenter),
    };
    match &config.output {
        Some(path) => Box::new(RecordingPresenter::new(presenter, path)),
        None => presenter,
    }
}

/// Read filenames from stdin. When a person is typing them, the banner and
/// prompt come back before every read.
fn run_interactive(
    config: &AppConfig,
    harness: &mut EvaluationHarness,
    presenter: &dyn ResultPresenter,
) -> Result<SessionSummary> {
    let stdin = io::stdin();
    let attended =
        stdin.is_terminal() && config.format == OutputFormat::Text && !config.quiet;
    let mut source = FilenameSource::new(stdin.lock());
    if attended {
        source = source.with_prompt(ui::banner_prompt(&config.quit_word));
    }
    Ok(run_session(
        harness,
        session_inputs(source, &config.quit_word),
        presenter,
    )?)
}
