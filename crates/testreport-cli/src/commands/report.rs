//! Report command implementation.

use crate::cli::Cli;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use testreport_core::NoopProgress;
use testreport_core::generate_report_with_progress;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = cli.generator_config();

    // Spinner only when a human is watching stderr
    let report = if !cli.quiet && !cli.json && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_archive_context(
            generate_report_with_progress(&cli.archive, &config, &mut progress),
            &cli.archive,
        )?
    } else {
        let mut noop = NoopProgress;
        add_archive_context(
            generate_report_with_progress(&cli.archive, &config, &mut noop),
            &cli.archive,
        )?
    };

    formatter.format_report_result(&report)?;

    Ok(())
}
