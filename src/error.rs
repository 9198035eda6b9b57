//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RigupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RigupError::Other`) for unexpected errors
//! - Step-level failures are recovered at the step boundary and recorded as
//!   `StepResult`s; only pipeline-fatal conditions surface as errors

use thiserror::Error;

/// Core error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// The host platform could not be identified; nothing can be provisioned.
    #[error("Unsupported platform: {detail}")]
    UnsupportedPlatform { detail: String },

    /// A tool is not in the registry.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// A step requires another tool/manager that is not present.
    #[error("Step '{step}' is missing dependency '{dependency}'")]
    MissingPrerequisite { step: String, dependency: String },

    /// An external installer command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A tool is still absent after its install action succeeded.
    #[error("Verification failed for '{tool}': {message}")]
    VerificationFailed { tool: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;
