//! Host platform detection.
//!
//! Resolves the operating system family at compile time and, on Linux, the
//! distribution family at runtime. The distribution is read from the `ID=`
//! field of `/etc/os-release` (primary signal), falling back to the output
//! of `lsb_release -is` lowercased. Both parsers are pure functions over
//! string input so they can be tested without a real system.

use std::path::Path;
use std::process::Command;

use serde::Serialize;

/// Normalized platform identifier, detected once at pipeline start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux(LinuxDistro),
    MacOs,
    Windows,
    Unknown,
}

/// Linux distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinuxDistro {
    Ubuntu,
    Debian,
    Centos,
    Rhel,
    Fedora,
    Arch,
    Unknown,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux(distro) => write!(f, "linux/{}", distro),
            Platform::MacOs => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for LinuxDistro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LinuxDistro::Ubuntu => "ubuntu",
            LinuxDistro::Debian => "debian",
            LinuxDistro::Centos => "centos",
            LinuxDistro::Rhel => "rhel",
            LinuxDistro::Fedora => "fedora",
            LinuxDistro::Arch => "arch",
            LinuxDistro::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl Platform {
    /// Detect the current platform.
    ///
    /// No side effects beyond reading `/etc/os-release` and, when that file
    /// is missing or unrecognized, querying `lsb_release`.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux(detect_distro())
        } else {
            Platform::Unknown
        }
    }

    /// Whether any tool can be provisioned on this platform.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Unknown | Platform::Linux(LinuxDistro::Unknown))
    }
}

impl LinuxDistro {
    /// Parse a distribution identifier (lowercased) into a family.
    ///
    /// Derivative IDs that behave like a known family map onto it, matching
    /// how the package-manager branch would treat them.
    pub fn from_id(id: &str) -> Self {
        match id.trim().trim_matches('"').to_lowercase().as_str() {
            "ubuntu" => LinuxDistro::Ubuntu,
            "debian" => LinuxDistro::Debian,
            "centos" => LinuxDistro::Centos,
            "rhel" | "redhatenterpriseserver" | "redhatenterprise" => LinuxDistro::Rhel,
            "fedora" => LinuxDistro::Fedora,
            "arch" | "archlinux" => LinuxDistro::Arch,
            _ => LinuxDistro::Unknown,
        }
    }
}

/// Extract the distribution family from `/etc/os-release` content.
pub fn distro_from_os_release(content: &str) -> LinuxDistro {
    for line in content.lines() {
        if let Some(id) = line.strip_prefix("ID=") {
            return LinuxDistro::from_id(id);
        }
    }
    LinuxDistro::Unknown
}

fn detect_distro() -> LinuxDistro {
    let os_release = Path::new("/etc/os-release");
    if let Ok(content) = std::fs::read_to_string(os_release) {
        let distro = distro_from_os_release(&content);
        if distro != LinuxDistro::Unknown {
            return distro;
        }
    }

    // Fallback: lsb_release prints the distributor ID (e.g. "Ubuntu")
    if let Ok(output) = Command::new("lsb_release").args(["-is"]).output() {
        if output.status.success() {
            let id = String::from_utf8_lossy(&output.stdout);
            return LinuxDistro::from_id(&id);
        }
    }

    LinuxDistro::Unknown
}
