//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use disksched_core::{SchedError, DEFAULT_QUIT_WORD};

/// How cycle results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `For file (...)` blocks.
    Text,
    /// One JSON object per cycle.
    Json,
}

/// disksched: compare FCFS, SSTF, SCAN, C-SCAN, LOOK and C-LOOK on disk
/// request workloads.
///
/// Each workload file holds whitespace-separated integers:
/// `capacity head previous pending...`.
#[derive(Parser, Debug)]
#[command(name = "disksched", version, about)]
pub struct AppConfig {
    /// Workload files, evaluated in order. Without any, filenames are read
    /// from stdin until the quit word or end of input.
    pub files: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Verbose output (per-cycle timing).
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode (only the result blocks).
    #[arg(short, long)]
    pub quiet: bool,

    /// Append every cycle as a JSON line to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filename that ends the session.
    #[arg(long, default_value = DEFAULT_QUIT_WORD, env = "DISKSCHED_QUIT_WORD")]
    pub quit_word: String,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Reject settings clap cannot check on its own.
    pub fn validate(&self) -> Result<(), SchedError> {
        let word = self.quit_word.as_str();
        if word.is_empty() || word.chars().any(char::is_whitespace) {
            return Err(SchedError::Config(format!(
                "quit word must be a single non-empty token, got {word:?}"
            )));
        }
        Ok(())
    }

    /// Whether filenames come from stdin.
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("disksched").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert!(config.interactive());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.quiet && !config.verbose);
        assert!(config.output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn files_and_flags() {
        let config = parse(&["a.txt", "b.txt", "--format", "json", "-q", "-o", "out.jsonl"]);
        assert_eq!(config.files, ["a.txt", "b.txt"]);
        assert!(!config.interactive());
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.quiet);
        assert_eq!(config.output, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn custom_quit_word() {
        let config = parse(&["--quit-word", "EXIT"]);
        assert_eq!(config.quit_word, "EXIT");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let args = ["disksched", "-q", "-v"];
        assert!(AppConfig::try_parse_from(args).is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        let args = ["disksched", "--format", "xml"];
        assert!(AppConfig::try_parse_from(args).is_err());
    }

    #[test]
    fn blank_quit_word_rejected() {
        let config = parse(&["--quit-word", "two words"]);
        assert!(matches!(config.validate(), Err(SchedError::Config(_))));
    }

    #[test]
    fn command_is_well_formed() {
        <AppConfig as clap::CommandFactory>::command().debug_assert();
    }
}
