//! Shell command execution.
//!
//! All host mutation in rigup flows through [`CommandExecutor`]; every other
//! component is a pure function over explicit inputs. Tests inject a
//! scripted executor instead of touching the real system.

pub mod command;
pub mod mock;
pub mod refresh;

pub use command::{execute, CommandOptions, CommandResult};
pub use refresh::{home_dir, prepend_path};

use crate::error::Result;

/// Boundary for invoking external commands.
///
/// The production implementation shells out; tests substitute canned
/// results so pipeline logic can be exercised without installing anything.
pub trait CommandExecutor {
    /// Run a command line through the platform shell and capture its result.
    fn run(&self, command: &str) -> Result<CommandResult>;
}

/// Executor that runs commands on the real system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&self, command: &str) -> Result<CommandResult> {
        execute(command, &CommandOptions::default())
    }
}

/// Check if running in a CI environment.
///
/// Used to suppress spinners and force plain output. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// System package installs on Linux need elevation (the registry commands
/// carry `sudo` themselves); this is only used to warn up front.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}
