//! Console output for journey results

use console::{style, Style, Term};
use quoteflow::{RunReport, StepRecord};
use std::time::Duration;

/// Terminal reporter for steps and run summaries
#[derive(Debug)]
pub struct ConsoleReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ConsoleReporter {
    /// Create a new reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Failures survive quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print one journey step
    pub fn step(&self, record: &StepRecord) {
        if self.quiet && record.status.is_passed() {
            return;
        }
        let line = step_line(record);
        if record.status.is_passed() {
            let _ = self.term.write_line(&format!("  {line}"));
        } else if self.use_color {
            let _ = self.term.write_line(&format!("  {}", style(line).red()));
        } else {
            let _ = self.term.write_line(&format!("  {line}  <- FAILED"));
        }
    }

    /// Print the outcome of a run
    pub fn summary(&self, report: &RunReport) {
        if self.quiet && report.is_passed() {
            return;
        }

        let _ = self.term.write_line("");
        let state = report
            .final_state
            .map_or_else(|| "not started".to_string(), |s| s.to_string());
        let secs = Duration::from_millis(report.duration_ms).as_secs_f64();
        let steps = report.steps.len();
        let passed = report.passed_count();

        if self.use_color {
            let status = if report.is_passed() {
                Style::new().green().bold().apply_to("PASSED")
            } else {
                Style::new().red().bold().apply_to("FAILED")
            };
            let _ = self.term.write_line(&format!(
                "{status} {} in {secs:.2}s ({passed}/{steps} steps, ended in {})",
                style(&report.story).bold(),
                style(state).cyan(),
            ));
        } else {
            let status = if report.is_passed() { "PASSED" } else { "FAILED" };
            let _ = self.term.write_line(&format!(
                "{status} {} in {secs:.2}s ({passed}/{steps} steps, ended in {state})",
                report.story
            ));
        }

        if let Some(error) = &report.error {
            self.failure(error);
        }
    }
}

/// Fixed-width rendering of a step: state, kind, label and value
#[must_use]
pub fn step_line(record: &StepRecord) -> String {
    let mut line = format!(
        "{:<20} {:<8} {}",
        record.state.as_str(),
        record.kind.as_str(),
        record.label
    );
    if let Some(value) = &record.value {
        line.push_str(" = ");
        line.push_str(value);
    }
    line
}
