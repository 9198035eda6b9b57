//! Low-level command invocation through the platform shell.

use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Result, RigupError};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Trailing output lines, for diagnostics on failure.
    ///
    /// Installer output can run to thousands of lines; the failure cause is
    /// almost always at the end.
    pub fn tail(&self, lines: usize) -> String {
        let source = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        let all: Vec<&str> = source.lines().collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,
}

/// Execute a command line through the platform shell, capturing output.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let shell = shell_executable();
    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().map_err(|_| RigupError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

fn shell_executable() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Flag to pass a command line to the shell.
///
/// Uses `-lc` (login, non-interactive) on Unix so PATH changes from earlier
/// install steps and the user's profile are visible to later commands,
/// without `-i` trying to set up job control when there is no TTY.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-lc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &CommandOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 1", &CommandOptions::default()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions::default();
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let cmd = if cfg!(target_os = "windows") {
            "echo %MY_VAR%"
        } else {
            "echo $MY_VAR"
        };

        let result = execute(cmd, &options).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let cmd = if cfg!(target_os = "windows") { "cd" } else { "pwd" };
        let result = execute(cmd, &options).unwrap();
        assert!(result.success);
    }

    #[test]
    fn tail_prefers_stderr() {
        let result = CommandResult {
            exit_code: Some(1),
            stdout: "a\nb\nc\n".to_string(),
            stderr: "E: Unable to locate package foo\n".to_string(),
            duration: Duration::ZERO,
            success: false,
        };
        assert!(result.tail(5).contains("Unable to locate package"));
    }

    #[test]
    fn tail_limits_lines() {
        let result = CommandResult {
            exit_code: Some(1),
            stdout: (0..50).map(|i| format!("line{}\n", i)).collect(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: false,
        };
        let tail = result.tail(3);
        assert_eq!(tail.lines().count(), 3);
        assert!(tail.contains("line49"));
    }

    #[test]
    fn command_result_tracks_duration() {
        let result = execute("echo fast", &CommandOptions::default()).unwrap();
        assert!(result.duration.as_millis() < 5000);
    }
}
