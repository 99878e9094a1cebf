//! CLI output formatting.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use disksched_core::{Algorithm, AlgorithmResult};
use disksched_orchestration::{analyze_cycle, CycleResults};

/// Width of the separator printed between cycles.
pub const SEPARATOR_WIDTH: usize = 31;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Render one cycle as text.
///
/// The plain form is `For file (<label>):` followed by one `NAME: steps`
/// line per policy. With `annotate`, step counts get thousand separators and
/// the cheapest policies are marked.
#[must_use]
pub fn format_cycle(label: &str, results: &CycleResults, annotate: bool) -> String {
    let best = if annotate {
        analyze_cycle(results).best
    } else {
        Vec::new()
    };

    let mut out = format!("For file ({label}):\n");
    for result in results.iter() {
        if annotate {
            let marker = if best.contains(&result.algorithm) {
                "  <- best"
            } else {
                ""
            };
            out.push_str(&format!(
                "{}: {}{marker}\n",
                result.algorithm,
                format_number(result.steps)
            ));
        } else {
            out.push_str(&format!("{}: {}\n", result.algorithm, result.steps));
        }
    }
    out
}

/// One cycle as a JSON record.
#[derive(Debug, Serialize)]
pub struct CycleRecord<'a> {
    pub source: &'a str,
    pub cycle: u64,
    pub results: &'a [AlgorithmResult],
    pub best: Vec<Algorithm>,
}

impl<'a> CycleRecord<'a> {
    #[must_use]
    pub fn new(source: &'a str, results: &'a CycleResults) -> Self {
        Self {
            source,
            cycle: results.cycle,
            results: &results.results,
            best: analyze_cycle(results).best,
        }
    }

    /// Serialize as a single line of JSON.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Append one line to `path`, creating the file if needed.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or written.
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
