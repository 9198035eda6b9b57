//! Per-step results and the final run report.

use serde::Serialize;

use crate::platform::Platform;

/// Outcome of a single provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Presence probe passed; nothing to do.
    AlreadyPresent,

    /// Install action ran and the tool verified present afterwards.
    Installed,

    /// Prerequisite missing, installer exited abnormally, or post-install
    /// verification found the tool still absent.
    Failed,

    /// The registry has no install action for this tool on this platform.
    Unsupported,
}

impl StepOutcome {
    /// Get a display character for this outcome.
    pub fn display_char(&self) -> char {
        match self {
            StepOutcome::AlreadyPresent => '⊘',
            StepOutcome::Installed => '✓',
            StepOutcome::Failed => '✗',
            StepOutcome::Unsupported => '−',
        }
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepOutcome::AlreadyPresent => "already present",
            StepOutcome::Installed => "installed",
            StepOutcome::Failed => "failed",
            StepOutcome::Unsupported => "unsupported",
        };
        write!(f, "{}", s)
    }
}

/// Result of one provisioning step. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Tool name from the registry (or the environment name for the final
    /// provisioning stage).
    pub tool: String,

    /// Step outcome.
    pub outcome: StepOutcome,

    /// Human-readable detail, present for failures and dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl StepResult {
    /// Presence probe passed; the step was skipped.
    pub fn already_present(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            outcome: StepOutcome::AlreadyPresent,
            diagnostic: None,
        }
    }

    /// Install action succeeded and verified.
    pub fn installed(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            outcome: StepOutcome::Installed,
            diagnostic: None,
        }
    }

    /// Install action succeeded, with extra detail (dry-run preview).
    pub fn installed_with(tool: &str, diagnostic: String) -> Self {
        Self {
            tool: tool.to_string(),
            outcome: StepOutcome::Installed,
            diagnostic: Some(diagnostic),
        }
    }

    /// The step failed; the diagnostic says why.
    pub fn failed(tool: &str, diagnostic: String) -> Self {
        Self {
            tool: tool.to_string(),
            outcome: StepOutcome::Failed,
            diagnostic: Some(diagnostic),
        }
    }

    /// No install action exists for this tool on this platform.
    pub fn unsupported(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            outcome: StepOutcome::Unsupported,
            diagnostic: None,
        }
    }

    /// One-line summary for the chronological log.
    pub fn summary_line(&self) -> String {
        match &self.diagnostic {
            Some(diag) => format!("{} {} ({}) - {}", self.outcome.display_char(), self.tool, self.outcome, diag),
            None => format!("{} {} ({})", self.outcome.display_char(), self.tool, self.outcome),
        }
    }
}

/// Overall outcome of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every step already present, installed, or unsupported.
    Success,

    /// Some optional step failed; provisioning otherwise completed.
    Partial,

    /// Unknown platform or a prerequisite step failed.
    Fatal,
}

/// Chronological record of one provisioning run.
///
/// Owned exclusively by the pipeline: created at run start, appended to
/// during execution, finalized once at the end.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Detected platform.
    pub platform: Platform,

    /// Per-step results in execution order.
    pub steps: Vec<StepResult>,

    /// Overall outcome; `Fatal` is the only non-zero exit.
    pub outcome: RunOutcome,

    /// Why the run was fatal, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal_reason: Option<String>,
}

impl RunReport {
    /// Create an empty report for a run that is about to start.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            steps: Vec::new(),
            outcome: RunOutcome::Success,
            fatal_reason: None,
        }
    }

    /// Create a fatal report for a run that never got to execute steps.
    pub fn fatal(platform: Platform, reason: String) -> Self {
        Self {
            platform,
            steps: Vec::new(),
            outcome: RunOutcome::Fatal,
            fatal_reason: Some(reason),
        }
    }

    /// Record a step result.
    pub fn push(&mut self, result: StepResult) {
        self.steps.push(result);
    }

    /// Mark the run fatal (prerequisite failure). First reason wins.
    pub fn mark_fatal(&mut self, reason: String) {
        if self.fatal_reason.is_none() {
            self.fatal_reason = Some(reason);
        }
    }

    /// Compute the overall outcome from the recorded steps.
    pub fn finalize(&mut self) {
        self.outcome = if self.fatal_reason.is_some() {
            RunOutcome::Fatal
        } else if self
            .steps
            .iter()
            .any(|s| s.outcome == StepOutcome::Failed)
        {
            RunOutcome::Partial
        } else {
            RunOutcome::Success
        };
    }

    /// Process exit code for this report.
    ///
    /// Partial success still exits 0; only fatal conditions are non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            RunOutcome::Success | RunOutcome::Partial => 0,
            RunOutcome::Fatal => 1,
        }
    }

    /// Look up a step result by tool name.
    pub fn step(&self, tool: &str) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.tool == tool)
    }
}
