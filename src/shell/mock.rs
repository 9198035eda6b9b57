//! Scripted command executor for tests.
//!
//! Lets pipeline logic be exercised without mutating a real system. Probes
//! (`<exe> --version`) answer from a scripted set of present executables;
//! other commands succeed unless a failure pattern matches, and may mark
//! executables present as a side effect (simulating a successful install).

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use super::{CommandExecutor, CommandResult};
use crate::error::Result;

#[derive(Default)]
struct ScriptState {
    present: HashSet<String>,
    log: Vec<String>,
}

/// A [`CommandExecutor`] that replays scripted answers.
#[derive(Default)]
pub struct ScriptedExecutor {
    state: Mutex<ScriptState>,
    fail_patterns: Vec<String>,
    effects: Vec<(String, String)>,
    outputs: Vec<(String, String)>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark executables as already present (their probes succeed).
    pub fn with_present(self, executables: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for exe in executables {
                state.present.insert((*exe).to_string());
            }
        }
        self
    }

    /// Any command containing `pattern` fails with exit code 1.
    pub fn with_failure(mut self, pattern: &str) -> Self {
        self.fail_patterns.push(pattern.to_string());
        self
    }

    /// A successful command containing `pattern` makes `executable` present,
    /// simulating what the real installer would do.
    pub fn with_effect(mut self, pattern: &str, executable: &str) -> Self {
        self.effects
            .push((pattern.to_string(), executable.to_string()));
        self
    }

    /// A successful command containing `pattern` produces `stdout`.
    pub fn with_output(mut self, pattern: &str, stdout: &str) -> Self {
        self.outputs
            .push((pattern.to_string(), stdout.to_string()));
        self
    }

    /// Every command line this executor has been asked to run, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    /// Whether any executed command contained the pattern.
    pub fn ran(&self, pattern: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .log
            .iter()
            .any(|c| c.contains(pattern))
    }
}

fn success(stdout: String) -> CommandResult {
    CommandResult {
        exit_code: Some(0),
        stdout,
        stderr: String::new(),
        duration: Duration::ZERO,
        success: true,
    }
}

fn failure(stderr: &str) -> CommandResult {
    CommandResult {
        exit_code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
        duration: Duration::ZERO,
        success: false,
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run(&self, command: &str) -> Result<CommandResult> {
        let mut state = self.state.lock().unwrap();
        state.log.push(command.to_string());

        // Presence probes answer from the scripted set
        if let Some(exe) = command.strip_suffix(" --version") {
            return Ok(if state.present.contains(exe) {
                success(format!("{} version 1.0.0", exe))
            } else {
                failure(&format!("{}: command not found", exe))
            });
        }

        if self
            .fail_patterns
            .iter()
            .any(|p| command.contains(p.as_str()))
        {
            return Ok(failure("scripted failure"));
        }

        for (pattern, exe) in &self.effects {
            if command.contains(pattern.as_str()) {
                state.present.insert(exe.clone());
            }
        }

        let stdout = self
            .outputs
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        Ok(success(stdout))
    }
}
