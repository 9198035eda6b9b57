//! Single-step execution.
//!
//! [`StepRunner`] is the only component besides the environment provisioner
//! that mutates host state. It enforces the prerequisite gate, executes the
//! action's command sequence in order, and verifies the tool is runnable
//! afterwards. No retries: a failed step is recorded and the human re-runs
//! the pipeline after resolving the cause (presence checks make re-runs
//! cheap).

use tracing::{debug, warn};

use crate::detection::PresenceChecker;
use crate::error::RigupError;
use crate::pipeline::report::StepResult;
use crate::platform::Platform;
use crate::registry::{InstallAction, ToolRegistry, ToolSpec};
use crate::shell::{prepend_path, CommandExecutor};

/// Trailing output lines kept in failure diagnostics.
const DIAGNOSTIC_TAIL_LINES: usize = 10;

/// Executes one install action and reports the outcome.
pub struct StepRunner<'a> {
    executor: &'a dyn CommandExecutor,
    registry: &'a ToolRegistry,
    platform: Platform,
    dry_run: bool,
}

impl<'a> StepRunner<'a> {
    pub fn new(
        executor: &'a dyn CommandExecutor,
        registry: &'a ToolRegistry,
        platform: Platform,
    ) -> Self {
        Self {
            executor,
            registry,
            platform,
            dry_run: false,
        }
    }

    /// Preview commands without executing anything.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Run the install action for a tool.
    ///
    /// Returns `failed` without attempting any command when a prerequisite
    /// executable is missing; partial installs are never attempted.
    pub fn run(&self, spec: &ToolSpec, action: &InstallAction) -> StepResult {
        let checker = PresenceChecker::new(self.executor);

        // Dry-run previews before the prerequisite probe: on a fresh host
        // the prerequisites would be installed by earlier steps of the same
        // run, so probing them now would report spurious failures.
        if self.dry_run {
            return StepResult::installed_with(
                spec.name,
                format!("dry-run, would run: {}", action.commands.join(" && ")),
            );
        }

        for required in &action.requires {
            let Some(req_spec) = self.registry.get(required) else {
                // Registry invariant: requires entries name registry tools
                warn!("unknown prerequisite '{}' for '{}'", required, spec.name);
                continue;
            };
            let exe = req_spec.probe_executable(self.platform);
            if !checker.is_present(exe) {
                debug!("prerequisite '{}' missing for '{}'", required, spec.name);
                let err = RigupError::MissingPrerequisite {
                    step: spec.name.to_string(),
                    dependency: (*required).to_string(),
                };
                return StepResult::failed(
                    spec.name,
                    format!("{} ('{}' is not runnable)", err, exe),
                );
            }
        }

        for command in &action.commands {
            debug!(tool = spec.name, %command, "running install command");
            match self.executor.run(command) {
                Ok(result) if result.success => {}
                Ok(result) => {
                    return StepResult::failed(
                        spec.name,
                        format!(
                            "command failed (exit {:?}): {}\n{}",
                            result.exit_code,
                            command,
                            result.tail(DIAGNOSTIC_TAIL_LINES)
                        ),
                    );
                }
                Err(err) => {
                    return StepResult::failed(
                        spec.name,
                        format!("could not invoke '{}': {}", command, err),
                    );
                }
            }
        }

        for dir in &action.path_additions {
            if prepend_path(dir) {
                debug!("prepended '{}' to PATH", dir);
            }
        }

        // Post-install verification: the probe must pass now
        let exe = spec.probe_executable(self.platform);
        if checker.is_present(exe) {
            StepResult::installed(spec.name)
        } else {
            let err = RigupError::VerificationFailed {
                tool: spec.name.to_string(),
                message: format!("'{}' is still not runnable after install", exe),
            };
            StepResult::failed(spec.name, err.to_string())
        }
    }
}
