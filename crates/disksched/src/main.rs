//! disksched: compare six disk-scheduling policies on workload files.

use disksched_cli::ui;
use disksched_lib::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = config::AppConfig::parse();
    let code = match app::run(&config) {
        Ok(summary) => errors::session_exit_code(&summary),
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            errors::exit_code(&e)
        }
    };
    std::process::exit(code);
}
