//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use testreport_core::ExtractionReport;
use testreport_core::GeneratedReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_extraction_stats(&self, report: &ExtractionReport) {
        let _ = self.err_term.write_line("Extraction:");
        let _ = self
            .err_term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .err_term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self
            .err_term
            .write_line(&format!("  Links: {}", report.links_created));
        let _ = self
            .err_term
            .write_line(&format!("  Entries skipped: {}", report.entries_skipped));
        let _ = self.err_term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self
            .err_term
            .write_line(&format!("  Duration: {:?}", report.duration));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report_result(&self, report: &GeneratedReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            self.write_extraction_stats(&report.extraction);
            let _ = self.err_term.write_line(&format!(
                "  Results document: {}",
                report.record_path.display()
            ));
        }

        self.term
            .write_line("The test report is generated to the path below:")?;
        let path = format!(" '{}'", report.report_path.display());
        if self.use_colors {
            self.term.write_line(&style(path).cyan().to_string())?;
        } else {
            self.term.write_line(&path)?;
        }
        self.term.write_str(&report.text)?;

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

}
