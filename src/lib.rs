//! rigup - Cross-platform developer workstation provisioning.
//!
//! rigup replaces per-platform setup scripts with a declarative tool
//! registry and a fixed provisioning pipeline: detect the platform, skip
//! tools that are already present, install the rest through the platform's
//! package manager, and finish by recreating a pinned conda environment.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Tool presence probing (the idempotency gate)
//! - [`environment`] - Conda environment provisioning
//! - [`error`] - Error types and result aliases
//! - [`pipeline`] - Run orchestration, step results, and the run report
//! - [`platform`] - OS and Linux distribution detection
//! - [`registry`] - Declarative tool table and install-action resolution
//! - [`runner`] - Single-step execution with prerequisite gating
//! - [`shell`] - Shell command execution boundary
//! - [`ui`] - Terminal output and spinners
//!
//! # Example
//!
//! ```
//! use rigup::pipeline::ProvisioningPipeline;
//! use rigup::platform::{LinuxDistro, Platform};
//! use rigup::registry::ToolRegistry;
//! use rigup::shell::mock::ScriptedExecutor;
//!
//! // Exercise the pipeline against a scripted system instead of this host
//! let registry = ToolRegistry::new();
//! let executor = ScriptedExecutor::new();
//! let pipeline = ProvisioningPipeline::new(&registry, &executor, Platform::Unknown);
//! let report = pipeline.run();
//! assert!(report.steps.is_empty());
//! ```

pub mod cli;
pub mod detection;
pub mod environment;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod registry;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, RigupError};
