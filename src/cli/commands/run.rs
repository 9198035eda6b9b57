//! The `run` command: one end-to-end provisioning run.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::pipeline::report::StepResult;
use crate::pipeline::{ProvisioningPipeline, RunObserver};
use crate::platform::Platform;
use crate::registry::ToolRegistry;
use crate::shell::{is_ci, is_elevated, SystemExecutor};
use crate::ui::{Output, ProgressSpinner};

/// Renders per-step progress with a spinner.
struct ConsoleObserver {
    output: Output,
    spinner: Option<ProgressSpinner>,
    interactive: bool,
}

impl ConsoleObserver {
    fn new(output: Output) -> Self {
        Self {
            output,
            spinner: None,
            interactive: !is_ci() && console::Term::stdout().is_term(),
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn step_started(&mut self, tool: &str) {
        let spinner = if self.interactive && self.output.mode().shows_steps() {
            ProgressSpinner::new(&format!("provisioning {}...", tool))
        } else {
            ProgressSpinner::hidden()
        };
        self.spinner = Some(spinner);
    }

    fn step_finished(&mut self, result: &StepResult) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_clear();
        }
        self.output
            .step_line(&result.tool, result.outcome, result.diagnostic.as_deref());
    }
}

pub fn execute(args: &RunArgs, output: &Output) -> Result<i32> {
    let platform = Platform::detect();
    let output = output.preview(args.dry_run);

    output.header("rigup");
    output.message(&format!("Detected platform: {}", platform));
    if args.dry_run {
        output.message("Running in dry-run mode; no commands will be executed");
    }
    if matches!(platform, Platform::Linux(_)) && !is_elevated() && !args.dry_run {
        output.warning("not running as root; system package installs will go through sudo");
    }
    output.message("");

    let registry = ToolRegistry::new();
    let executor = SystemExecutor;
    let pipeline =
        ProvisioningPipeline::new(&registry, &executor, platform).dry_run(args.dry_run);

    let mut observer = ConsoleObserver::new(output);
    let report = pipeline.run_with(&mut observer);

    output.render_summary(&report);
    Ok(report.exit_code())
}
