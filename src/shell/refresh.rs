//! Process PATH refresh after installs.
//!
//! Freshly installed tools (miniconda in particular) land in directories
//! that were not on `PATH` when rigup started. Later steps run as child
//! processes and inherit this process's environment, so extending our own
//! `PATH` is enough for them to find the new binaries. The user's shell
//! profile is deliberately left alone.

use std::path::{Path, PathBuf};

/// Home directory of the current user.
pub fn home_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE").map(PathBuf::from).ok()
    } else {
        std::env::var("HOME").map(PathBuf::from).ok()
    }
}

/// Prepend a directory to this process's `PATH` if not already present.
///
/// A leading `~/` is expanded against the home directory. Returns whether
/// the variable was changed.
pub fn prepend_path(dir: &str) -> bool {
    let expanded = expand_home(dir);
    if !expanded.is_dir() {
        return false;
    }

    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut parts: Vec<PathBuf> = std::env::split_paths(&current).collect();
    if parts.iter().any(|p| p == &expanded) {
        return false;
    }

    parts.insert(0, expanded);
    if let Ok(joined) = std::env::join_paths(parts) {
        std::env::set_var("PATH", joined);
        true
    } else {
        false
    }
}

fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    Path::new(dir).to_path_buf()
}
