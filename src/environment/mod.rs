//! Conda environment provisioning.
//!
//! The final pipeline stage: (re)create a named conda environment pinned to
//! a Python version and install a fixed package list into it. The
//! environment is always destroyed then recreated rather than upgraded in
//! place, so repeated runs converge on the same state instead of
//! accumulating drift.

use tracing::{debug, info};

use crate::detection::PresenceChecker;
use crate::error::RigupError;
use crate::pipeline::report::StepResult;
use crate::shell::CommandExecutor;

/// Specification of the provisioned environment.
#[derive(Debug, Clone)]
pub struct CondaEnvSpec {
    /// Environment name.
    pub name: String,

    /// Python version the environment is pinned to.
    pub python_version: String,

    /// Packages installed as one batch, verified by name after install.
    pub packages: Vec<String>,
}

impl Default for CondaEnvSpec {
    fn default() -> Self {
        Self {
            name: "J".to_string(),
            python_version: "3.9".to_string(),
            packages: [
                "numpy",
                "pandas",
                "matplotlib",
                "seaborn",
                "gradio",
                "notebook",
                "pip",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl CondaEnvSpec {
    /// Step label used in the run report.
    pub fn step_name(&self) -> String {
        format!("env:{}", self.name)
    }
}

/// Creates the named environment through the conda CLI.
pub struct EnvironmentProvisioner<'a> {
    executor: &'a dyn CommandExecutor,
    dry_run: bool,
}

impl<'a> EnvironmentProvisioner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self {
            executor,
            dry_run: false,
        }
    }

    /// Preview without touching conda.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Provision the environment: probe conda, destroy an existing
    /// environment of the same name, create fresh, batch-install packages,
    /// then verify every package name appears in the environment listing.
    pub fn provision(&self, spec: &CondaEnvSpec) -> StepResult {
        let step = spec.step_name();

        if self.dry_run {
            return StepResult::installed_with(
                &step,
                format!(
                    "dry-run, would recreate environment '{}' (python={}) with: {}",
                    spec.name,
                    spec.python_version,
                    spec.packages.join(", ")
                ),
            );
        }

        let checker = PresenceChecker::new(self.executor);
        if !checker.is_present("conda") {
            let err = RigupError::MissingPrerequisite {
                step: step.clone(),
                dependency: "conda".to_string(),
            };
            return StepResult::failed(&step, format!("{} ('conda' is not runnable)", err));
        }

        // Destroy-if-exists, then create
        let listing = match self.executor.run("conda env list") {
            Ok(result) if result.success => result.stdout,
            Ok(result) => {
                return StepResult::failed(
                    &step,
                    format!("'conda env list' failed (exit {:?})", result.exit_code),
                );
            }
            Err(err) => return StepResult::failed(&step, err.to_string()),
        };

        if env_exists(&listing, &spec.name) {
            info!("environment '{}' exists, removing for recreation", spec.name);
            if let Some(failure) =
                self.run_step(&step, &format!("conda env remove -n {} -y", spec.name))
            {
                return failure;
            }
        }

        if let Some(failure) = self.run_step(
            &step,
            &format!(
                "conda create -n {} python={} -y",
                spec.name, spec.python_version
            ),
        ) {
            return failure;
        }

        if let Some(failure) = self.run_step(
            &step,
            &format!(
                "conda run -n {} pip install {}",
                spec.name,
                spec.packages.join(" ")
            ),
        ) {
            return failure;
        }

        // Verify by re-querying the installed package list
        match self.executor.run(&format!("conda list -n {}", spec.name)) {
            Ok(result) if result.success => {
                let missing = missing_packages(&result.stdout, &spec.packages);
                if missing.is_empty() {
                    StepResult::installed(&step)
                } else {
                    let err = RigupError::VerificationFailed {
                        tool: step.clone(),
                        message: format!(
                            "packages missing after install: {}",
                            missing.join(", ")
                        ),
                    };
                    StepResult::failed(&step, err.to_string())
                }
            }
            Ok(result) => StepResult::failed(
                &step,
                format!("'conda list' failed (exit {:?})", result.exit_code),
            ),
            Err(err) => StepResult::failed(&step, err.to_string()),
        }
    }

    fn run_step(&self, step: &str, command: &str) -> Option<StepResult> {
        debug!(%command, "running environment command");
        match self.executor.run(command) {
            Ok(result) if result.success => None,
            Ok(result) => Some(StepResult::failed(
                step,
                format!(
                    "command failed (exit {:?}): {}\n{}",
                    result.exit_code,
                    command,
                    result.tail(10)
                ),
            )),
            Err(err) => Some(StepResult::failed(
                step,
                format!("could not invoke '{}': {}", command, err),
            )),
        }
    }
}

/// Whether `conda env list` output names this environment.
pub fn env_exists(listing: &str, name: &str) -> bool {
    listing
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .any(|first| first == name)
}

/// Required packages absent from `conda list` output, by name.
pub fn missing_packages(listing: &str, required: &[String]) -> Vec<String> {
    let installed: std::collections::HashSet<&str> = listing
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    required
        .iter()
        .filter(|pkg| !installed.contains(pkg.as_str()))
        .cloned()
        .collect()
}
