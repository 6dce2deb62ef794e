//! testreport - generates a plain-text summary from an archived test run.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(&cli);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match commands::report::execute(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr and carry the warnings for skipped entries and
/// unexpected statuses. `RUST_LOG` overrides the level picked from flags.
fn init_tracing(cli: &cli::Cli) {
    let default_level = if cli.quiet || cli.json {
        "off"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .init();
}
