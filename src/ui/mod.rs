//! Terminal output.
//!
//! A thin layer over `console` and `indicatif`: styled status lines, a
//! per-step spinner, and the final run summary. Respects `NO_COLOR` via
//! console's own detection.

pub mod spinner;

pub use spinner::ProgressSpinner;

use console::style;

use crate::pipeline::report::{RunOutcome, RunReport, StepOutcome};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including diagnostics for every step.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (final status only).
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-step progress.
    pub fn shows_steps(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows step diagnostics inline.
    pub fn shows_diagnostics(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Output writer that respects output mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
    preview: bool,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            preview: false,
        }
    }

    /// Render install outcomes as previews ("would install") for dry runs.
    pub fn preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Show a header/banner.
    pub fn header(&self, title: &str) {
        if self.mode.shows_steps() {
            println!("{}", style(title).bold());
        }
    }

    /// Display a plain message.
    pub fn message(&self, msg: &str) {
        if self.mode.shows_steps() {
            println!("{}", msg);
        }
    }

    /// Display a success message.
    pub fn success(&self, msg: &str) {
        println!("{} {}", style("✓").green(), msg);
    }

    /// Display a warning message.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_steps() {
            println!("{} {}", style("!").yellow(), msg);
        }
    }

    /// Display an error message.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("✗").red(), msg);
    }

    /// Render one finished step.
    pub fn step_line(&self, tool: &str, outcome: StepOutcome, diagnostic: Option<&str>) {
        if !self.mode.shows_steps() {
            return;
        }

        println!("{}", self.format_step(tool, outcome));

        let show = outcome == StepOutcome::Failed || self.mode.shows_diagnostics();
        if show {
            if let Some(diag) = diagnostic {
                for diag_line in diag.lines() {
                    println!("    {}", style(diag_line).dim());
                }
            }
        }
    }

    fn format_step(&self, tool: &str, outcome: StepOutcome) -> String {
        match outcome {
            StepOutcome::AlreadyPresent => {
                format!("{} {} (already present)", style("⊘").dim(), tool)
            }
            // Dry runs never installed anything, and must not claim to
            StepOutcome::Installed if self.preview => {
                format!("{} {} would install", style("»").cyan(), tool)
            }
            StepOutcome::Installed => format!("{} {} installed", style("✓").green(), tool),
            StepOutcome::Failed => format!("{} {} failed", style("✗").red(), tool),
            StepOutcome::Unsupported => {
                format!("{} {} (unsupported on this platform)", style("−").dim(), tool)
            }
        }
    }

    /// Render the final summary for a run report.
    pub fn render_summary(&self, report: &RunReport) {
        let installed = count(report, StepOutcome::Installed);
        let present = count(report, StepOutcome::AlreadyPresent);
        let failed = count(report, StepOutcome::Failed);
        let unsupported = count(report, StepOutcome::Unsupported);

        self.message("");
        match report.outcome {
            RunOutcome::Success if self.preview => self.success(&format!(
                "Dry run complete: {} would be installed, {} already present, {} unsupported",
                installed, present, unsupported
            )),
            RunOutcome::Success => self.success(&format!(
                "Provisioning complete: {} installed, {} already present, {} unsupported",
                installed, present, unsupported
            )),
            RunOutcome::Partial => {
                self.success(&format!(
                    "Provisioning finished with {} failed step(s): {} installed, {} already present",
                    failed, installed, present
                ));
                for step in report.steps.iter().filter(|s| s.outcome == StepOutcome::Failed) {
                    self.warning(&format!(
                        "{}: {}",
                        step.tool,
                        step.diagnostic.as_deref().unwrap_or("failed")
                    ));
                }
            }
            RunOutcome::Fatal => {
                self.error(&format!(
                    "Provisioning aborted: {}",
                    report.fatal_reason.as_deref().unwrap_or("fatal error")
                ));
            }
        }
    }
}

fn count(report: &RunReport, outcome: StepOutcome) -> usize {
    report.steps.iter().filter(|s| s.outcome == outcome).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::report::StepResult;
    use crate::platform::Platform;

    #[test]
    fn output_mode_default_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn quiet_mode_hides_steps() {
        assert!(!OutputMode::Quiet.shows_steps());
        assert!(OutputMode::Normal.shows_steps());
    }

    #[test]
    fn only_verbose_shows_diagnostics() {
        assert!(OutputMode::Verbose.shows_diagnostics());
        assert!(!OutputMode::Normal.shows_diagnostics());
    }

    #[test]
    fn preview_renders_would_install() {
        let preview = Output::new(OutputMode::Normal).preview(true);
        let line = preview.format_step("git", StepOutcome::Installed);
        assert!(line.contains("would install"));
        assert!(!line.contains(" installed"));

        let normal = Output::new(OutputMode::Normal);
        assert!(normal
            .format_step("git", StepOutcome::Installed)
            .contains("installed"));
    }

    #[test]
    fn preview_leaves_other_outcomes_alone() {
        let preview = Output::new(OutputMode::Normal).preview(true);
        assert!(preview
            .format_step("curl", StepOutcome::AlreadyPresent)
            .contains("already present"));
        assert!(preview
            .format_step("git", StepOutcome::Failed)
            .contains("failed"));
    }

    #[test]
    fn render_summary_does_not_panic() {
        let output = Output::new(OutputMode::Quiet);
        let mut report = RunReport::new(Platform::MacOs);
        report.push(StepResult::installed("git"));
        report.push(StepResult::failed("gcc", "boom".into()));
        report.finalize();
        output.render_summary(&report);
    }
}
