//! CLI console utilities

use console::style;
use finsent_core::FileOutcome;

/// Formatted terminal output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), style(message).green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), style(message).red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", style(title).bold().underlined());
        println!("{}", style("=".repeat(title.len())).dim());
    }

    /// One line per processed file
    pub fn print_outcome(&self, outcome: &FileOutcome) {
        let name = outcome
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "  {} {} rows  {} {} {} {}",
            style(name).bold(),
            outcome.rows,
            style(format!("+{}", outcome.tally.positive)).green(),
            style(format!("={}", outcome.tally.neutral)).dim(),
            style(format!("-{}", outcome.tally.negative)).red(),
            style(format!("?{}", outcome.tally.unparsed)).yellow(),
        );
        if self.verbose {
            println!("    {} {}", style("output").dim(), outcome.output.display());
            println!("    {} {}", style("audit ").dim(), outcome.audit_log.display());
            println!(
                "    {} {}",
                style("waits ").dim(),
                outcome.session.quota.total_waits()
            );
        }
    }
}
