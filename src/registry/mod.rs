//! Tool registry and install-action resolution.
//!
//! All platform variance lives in the declarative table in [`builtin`];
//! pipeline control flow stays platform-agnostic. Adding a platform means
//! adding match arms to the table, not new control flow. The table is built
//! once and never mutated at runtime.

pub mod builtin;

use crate::error::{Result, RigupError};
use crate::platform::Platform;

/// Fixed tool names, in dependency order.
pub const PACKAGE_MANAGER: &str = "package-manager";
pub const CURL: &str = "curl";
pub const WGET: &str = "wget";
pub const MINICONDA: &str = "miniconda";
pub const VSCODE: &str = "vscode";
pub const GIT: &str = "git";
pub const GCC: &str = "gcc";

/// An ordered sequence of external commands that installs one tool.
#[derive(Debug, Clone)]
pub struct InstallAction {
    /// Command lines, executed in order; the first failure aborts the step.
    pub commands: Vec<String>,

    /// Registry tools whose executables must be present before this action
    /// may run. A missing entry short-circuits the step to `failed`.
    pub requires: Vec<&'static str>,

    /// Directories to prepend to the process PATH after success, so later
    /// steps can see freshly installed binaries.
    pub path_additions: Vec<&'static str>,
}

impl InstallAction {
    fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            requires: Vec::new(),
            path_additions: Vec::new(),
        }
    }

    fn requires(mut self, tools: &[&'static str]) -> Self {
        self.requires = tools.to_vec();
        self
    }

    fn extends_path(mut self, dirs: &[&'static str]) -> Self {
        self.path_additions = dirs.to_vec();
        self
    }
}

/// Outcome of resolving a tool against a platform.
///
/// Every tool resolves to *something* on every platform; `Unsupported` is an
/// explicit table entry, never a silent fall-through.
#[derive(Debug, Clone)]
pub enum Resolution {
    Action(InstallAction),
    Unsupported,
}

/// A provisionable tool: presence probe plus per-platform install actions.
pub struct ToolSpec {
    /// Registry name (e.g. "git", "miniconda").
    pub name: &'static str,

    /// Executable probed for the presence check, per platform.
    probe: fn(Platform) -> &'static str,

    /// Install action per platform. Exhaustive over `Platform` by
    /// construction (a `match` in the table).
    action: fn(Platform) -> Resolution,
}

impl ToolSpec {
    /// The executable whose runnability decides presence on this platform.
    pub fn probe_executable(&self, platform: Platform) -> &'static str {
        (self.probe)(platform)
    }

    /// Resolve the install action for this platform.
    pub fn resolve(&self, platform: Platform) -> Resolution {
        (self.action)(platform)
    }
}

/// Registry of all provisionable tools, in fixed dependency order.
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    /// Create the registry with the built-in tool table.
    pub fn new() -> Self {
        Self {
            tools: builtin::tools(),
        }
    }

    /// All tools in execution order. Later tools may depend on earlier ones
    /// (environment provisioning assumes miniconda, most tools assume the
    /// platform package manager).
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Resolve a named tool against a platform.
    pub fn resolve(&self, name: &str, platform: Platform) -> Result<Resolution> {
        let spec = self.get(name).ok_or_else(|| RigupError::UnknownTool {
            name: name.to_string(),
        })?;
        Ok(spec.resolve(platform))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
