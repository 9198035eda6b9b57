//! Provisioning run orchestration.
//!
//! The pipeline detects nothing and installs nothing itself: it is handed a
//! platform, a registry, and a command executor, and walks the fixed stage
//! order (package manager bootstrap → curl → wget → miniconda → editor →
//! git → gcc → environment provisioning), skipping satisfied steps and
//! short-circuiting dependents of failed prerequisites. Later stages assume
//! earlier ones succeeded, which is why the order is fixed.

pub mod report;

use std::collections::HashSet;

use tracing::{info, warn};

use crate::detection::PresenceChecker;
use crate::environment::{CondaEnvSpec, EnvironmentProvisioner};
use crate::error::RigupError;
use crate::platform::Platform;
use crate::registry::{Resolution, ToolRegistry, ToolSpec, MINICONDA, PACKAGE_MANAGER};
use crate::runner::StepRunner;
use crate::shell::CommandExecutor;
use report::{RunReport, StepOutcome, StepResult};

/// Steps whose failure makes the whole run fatal: everything downstream
/// depends on the package manager, and environment provisioning depends on
/// conda.
const PREREQUISITE_STEPS: [&str; 2] = [PACKAGE_MANAGER, MINICONDA];

/// Receives step lifecycle events during a run.
///
/// Lets the CLI render spinners and per-step lines while keeping the
/// pipeline free of terminal concerns.
pub trait RunObserver {
    fn step_started(&mut self, tool: &str);
    fn step_finished(&mut self, result: &StepResult);
}

/// Observer that ignores every event.
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn step_started(&mut self, _tool: &str) {}
    fn step_finished(&mut self, _result: &StepResult) {}
}

/// Orchestrates one end-to-end provisioning run.
pub struct ProvisioningPipeline<'a> {
    registry: &'a ToolRegistry,
    executor: &'a dyn CommandExecutor,
    platform: Platform,
    env_spec: CondaEnvSpec,
    dry_run: bool,
}

impl<'a> ProvisioningPipeline<'a> {
    pub fn new(
        registry: &'a ToolRegistry,
        executor: &'a dyn CommandExecutor,
        platform: Platform,
    ) -> Self {
        Self {
            registry,
            executor,
            platform,
            env_spec: CondaEnvSpec::default(),
            dry_run: false,
        }
    }

    /// Preview the run without mutating the host.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Override the environment specification (tests).
    pub fn with_env_spec(mut self, spec: CondaEnvSpec) -> Self {
        self.env_spec = spec;
        self
    }

    /// Execute the full run and return the finalized report.
    pub fn run(&self) -> RunReport {
        self.run_with(&mut NullObserver)
    }

    /// Execute the full run, reporting step events to the observer.
    pub fn run_with(&self, observer: &mut dyn RunObserver) -> RunReport {
        if !self.platform.is_supported() {
            warn!("unsupported platform '{}', aborting", self.platform);
            let err = RigupError::UnsupportedPlatform {
                detail: self.platform.to_string(),
            };
            return RunReport::fatal(self.platform, format!("{}; no steps were executed", err));
        }

        info!("provisioning on {}", self.platform);
        let mut report = RunReport::new(self.platform);
        let checker = PresenceChecker::new(self.executor);
        let runner =
            StepRunner::new(self.executor, self.registry, self.platform).dry_run(self.dry_run);
        let mut failed_steps: HashSet<&str> = HashSet::new();

        for spec in self.registry.tools() {
            observer.step_started(spec.name);
            let result = self.run_tool_step(spec, &checker, &runner, &failed_steps);

            if result.outcome == StepOutcome::Failed {
                failed_steps.insert(spec.name);
                if PREREQUISITE_STEPS.contains(&spec.name) {
                    report.mark_fatal(format!("prerequisite step '{}' failed", spec.name));
                }
            }

            info!("{}", result.summary_line());
            observer.step_finished(&result);
            report.push(result);
        }

        // Environment provisioning runs last and requires conda
        let env_step = self.env_spec.step_name();
        observer.step_started(&env_step);
        let result = self.run_environment_step(&checker, &failed_steps, &mut report);
        info!("{}", result.summary_line());
        observer.step_finished(&result);
        report.push(result);

        report.finalize();
        report
    }

    fn run_tool_step(
        &self,
        spec: &ToolSpec,
        checker: &PresenceChecker<'_>,
        runner: &StepRunner<'_>,
        failed_steps: &HashSet<&str>,
    ) -> StepResult {
        // Idempotency gate first: a present tool is never reinstalled
        if checker.is_present(spec.probe_executable(self.platform)) {
            return StepResult::already_present(spec.name);
        }

        match spec.resolve(self.platform) {
            Resolution::Unsupported => StepResult::unsupported(spec.name),
            Resolution::Action(action) => {
                // A failed prerequisite step poisons its dependents without
                // attempting them, to avoid cascades of secondary errors
                if let Some(dep) = action
                    .requires
                    .iter()
                    .find(|req| failed_steps.contains(**req))
                {
                    let err = RigupError::MissingPrerequisite {
                        step: spec.name.to_string(),
                        dependency: (*dep).to_string(),
                    };
                    return StepResult::failed(
                        spec.name,
                        format!("{} (step failed earlier)", err),
                    );
                }
                runner.run(spec, &action)
            }
        }
    }

    fn run_environment_step(
        &self,
        checker: &PresenceChecker<'_>,
        failed_steps: &HashSet<&str>,
        report: &mut RunReport,
    ) -> StepResult {
        let step = self.env_spec.step_name();
        let provisioner = EnvironmentProvisioner::new(self.executor).dry_run(self.dry_run);

        if self.dry_run {
            return provisioner.provision(&self.env_spec);
        }

        if failed_steps.contains(MINICONDA) {
            report.mark_fatal("conda is unavailable; environment cannot be provisioned".into());
            let err = RigupError::MissingPrerequisite {
                step: step.clone(),
                dependency: MINICONDA.to_string(),
            };
            return StepResult::failed(&step, format!("{} (step failed earlier)", err));
        }

        if !checker.is_present("conda") {
            report.mark_fatal("conda is unavailable; environment cannot be provisioned".into());
            let err = RigupError::MissingPrerequisite {
                step: step.clone(),
                dependency: "conda".to_string(),
            };
            return StepResult::failed(&step, format!("{} ('conda' is not runnable)", err));
        }

        provisioner.provision(&self.env_spec)
    }
}
