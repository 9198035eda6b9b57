//! Tool presence detection.
//!
//! The idempotency gate: a tool counts as present when invoking its
//! canonical executable succeeds. Only the spawn/exit signal is consulted —
//! version strings are never compared, so partially configured or outdated
//! installs still count as present and are skipped on re-runs.

use crate::shell::CommandExecutor;

/// Probes whether tools are already usable on the current system.
///
/// No side effects; every probe goes through the injected executor so
/// tests can script the answers.
pub struct PresenceChecker<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> PresenceChecker<'a> {
    /// Create a checker over a command executor.
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Whether the executable exists and is runnable.
    pub fn is_present(&self, executable: &str) -> bool {
        self.executor
            .run(&probe_command(executable))
            .map(|r| r.success)
            .unwrap_or(false)
    }

    /// Version string for display purposes (`status` output).
    ///
    /// Plays no part in presence decisions.
    pub fn probe_version(&self, executable: &str) -> Option<String> {
        let result = self.executor.run(&probe_command(executable)).ok()?;
        if result.success {
            extract_version(&result.stdout)
        } else {
            None
        }
    }
}

/// The command line used to probe an executable.
pub fn probe_command(executable: &str) -> String {
    format!("{} --version", executable)
}

/// Extract a version number from command output.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SystemExecutor;

    #[test]
    fn probe_command_appends_version_flag() {
        assert_eq!(probe_command("git"), "git --version");
    }

    #[test]
    fn missing_executable_is_not_present() {
        let executor = SystemExecutor;
        let checker = PresenceChecker::new(&executor);
        assert!(!checker.is_present("this-command-does-not-exist-12345"));
    }

    #[test]
    #[cfg(unix)]
    fn coreutils_are_present() {
        let executor = SystemExecutor;
        let checker = PresenceChecker::new(&executor);
        assert!(checker.is_present("env"));
    }

    #[test]
    fn extract_version_semver() {
        let output = "git version 2.39.2";
        assert_eq!(extract_version(output), Some("2.39.2".to_string()));
    }

    #[test]
    fn extract_version_with_v_prefix() {
        assert_eq!(extract_version("v18.17"), Some("18.17".to_string()));
    }

    #[test]
    fn extract_version_no_match() {
        assert!(extract_version("no digits here").is_none());
    }

    #[test]
    fn probe_version_missing_tool_is_none() {
        let executor = SystemExecutor;
        let checker = PresenceChecker::new(&executor);
        assert!(checker
            .probe_version("this-command-does-not-exist-12345")
            .is_none());
    }
}
