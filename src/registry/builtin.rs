//! Built-in tool table.
//!
//! One entry per provisionable tool, in dependency order. Each entry maps
//! every [`Platform`] to an install action or an explicit `Unsupported`;
//! the `match` arms keep the mapping total.

use super::{InstallAction, Resolution, ToolSpec};
use super::{CURL, GCC, GIT, MINICONDA, PACKAGE_MANAGER, VSCODE, WGET};
use crate::platform::{LinuxDistro, Platform};

const MINICONDA_LINUX_URL: &str =
    "https://repo.anaconda.com/miniconda/Miniconda3-latest-Linux-x86_64.sh";
const MINICONDA_MACOS_URL: &str =
    "https://repo.anaconda.com/miniconda/Miniconda3-latest-MacOSX-x86_64.sh";
const VSCODE_DEB_URL: &str = "https://update.code.visualstudio.com/latest/linux-deb-x64/stable";
const VSCODE_RPM_URL: &str = "https://update.code.visualstudio.com/latest/linux-rpm-x64/stable";
const HOMEBREW_INSTALL: &str = "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const CHOCOLATEY_INSTALL: &str = "https://community.chocolatey.org/install.ps1";

/// All built-in tools, in execution order.
pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: PACKAGE_MANAGER,
            probe: package_manager_probe,
            action: package_manager_action,
        },
        ToolSpec {
            name: CURL,
            probe: |_| "curl",
            action: |p| managed_package(p, "curl", "curl", "curl"),
        },
        ToolSpec {
            name: WGET,
            probe: |_| "wget",
            action: |p| managed_package(p, "wget", "wget", "wget"),
        },
        ToolSpec {
            name: MINICONDA,
            probe: |_| "conda",
            action: miniconda_action,
        },
        ToolSpec {
            name: VSCODE,
            probe: |_| "code",
            action: vscode_action,
        },
        ToolSpec {
            name: GIT,
            probe: |_| "git",
            action: |p| managed_package(p, "git", "git", "git"),
        },
        ToolSpec {
            name: GCC,
            probe: |_| "gcc",
            action: gcc_action,
        },
    ]
}

/// The binary that proves the platform package manager is usable.
fn package_manager_probe(platform: Platform) -> &'static str {
    match platform {
        Platform::Linux(distro) => match distro {
            LinuxDistro::Ubuntu | LinuxDistro::Debian => "apt-get",
            LinuxDistro::Centos | LinuxDistro::Rhel | LinuxDistro::Fedora => "dnf",
            LinuxDistro::Arch => "pacman",
            LinuxDistro::Unknown => "apt-get",
        },
        Platform::MacOs => "brew",
        Platform::Windows => "choco",
        Platform::Unknown => "sh",
    }
}

fn package_manager_action(platform: Platform) -> Resolution {
    match platform {
        // The distro ships its package manager; rigup never installs one.
        Platform::Linux(_) => Resolution::Unsupported,
        Platform::MacOs => Resolution::Action(InstallAction::new(vec![format!(
            "NONINTERACTIVE=1 /bin/bash -c \"$(curl -fsSL {})\"",
            HOMEBREW_INSTALL
        )])),
        Platform::Windows => Resolution::Action(InstallAction::new(vec![format!(
            "powershell -NoProfile -ExecutionPolicy Bypass -Command \"Set-ExecutionPolicy Bypass -Scope Process -Force; \
             [System.Net.ServicePointManager]::SecurityProtocol = [System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
             iex ((New-Object System.Net.WebClient).DownloadString('{}'))\"",
            CHOCOLATEY_INSTALL
        )])),
        Platform::Unknown => Resolution::Unsupported,
    }
}

/// A tool that installs through the platform package manager under the
/// given per-family package names (apt/dnf-pacman shared, brew, choco).
fn managed_package(
    platform: Platform,
    linux_pkg: &str,
    brew_pkg: &str,
    choco_pkg: &str,
) -> Resolution {
    match platform {
        Platform::Linux(distro) => match distro {
            LinuxDistro::Ubuntu | LinuxDistro::Debian => Resolution::Action(
                InstallAction::new(vec![
                    "sudo apt-get update".to_string(),
                    format!("sudo apt-get install -y {}", linux_pkg),
                ])
                .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Centos | LinuxDistro::Rhel | LinuxDistro::Fedora => Resolution::Action(
                InstallAction::new(vec![format!("sudo dnf install -y {}", linux_pkg)])
                    .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Arch => Resolution::Action(
                InstallAction::new(vec![format!("sudo pacman -Sy --noconfirm {}", linux_pkg)])
                    .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Unknown => Resolution::Unsupported,
        },
        Platform::MacOs => Resolution::Action(
            InstallAction::new(vec![format!("brew install {}", brew_pkg)])
                .requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Windows => Resolution::Action(
            InstallAction::new(vec![format!("choco install -y {}", choco_pkg)])
                .requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Unknown => Resolution::Unsupported,
    }
}

fn miniconda_action(platform: Platform) -> Resolution {
    match platform {
        Platform::Linux(LinuxDistro::Unknown) | Platform::Unknown => Resolution::Unsupported,
        Platform::Linux(_) => Resolution::Action(
            InstallAction::new(vec![
                format!("curl -fsSL {} -o /tmp/miniconda.sh", MINICONDA_LINUX_URL),
                "bash /tmp/miniconda.sh -b -p \"$HOME/miniconda3\"".to_string(),
            ])
            .requires(&[CURL])
            .extends_path(&["~/miniconda3/bin"]),
        ),
        Platform::MacOs => Resolution::Action(
            InstallAction::new(vec![
                format!("curl -fsSL {} -o /tmp/miniconda.sh", MINICONDA_MACOS_URL),
                "bash /tmp/miniconda.sh -b -p \"$HOME/miniconda3\"".to_string(),
            ])
            .requires(&[CURL])
            .extends_path(&["~/miniconda3/bin"]),
        ),
        Platform::Windows => Resolution::Action(
            InstallAction::new(vec!["choco install -y miniconda3".to_string()])
                .requires(&[PACKAGE_MANAGER])
                .extends_path(&["C:\\tools\\miniconda3", "C:\\tools\\miniconda3\\Scripts"]),
        ),
    }
}

fn vscode_action(platform: Platform) -> Resolution {
    match platform {
        Platform::Linux(distro) => match distro {
            LinuxDistro::Ubuntu | LinuxDistro::Debian => Resolution::Action(
                InstallAction::new(vec![
                    format!("curl -fsSL {} -o /tmp/vscode.deb", VSCODE_DEB_URL),
                    "sudo apt-get install -y /tmp/vscode.deb".to_string(),
                ])
                .requires(&[PACKAGE_MANAGER, CURL]),
            ),
            LinuxDistro::Centos | LinuxDistro::Rhel | LinuxDistro::Fedora => Resolution::Action(
                InstallAction::new(vec![
                    format!("curl -fsSL {} -o /tmp/vscode.rpm", VSCODE_RPM_URL),
                    "sudo dnf install -y /tmp/vscode.rpm".to_string(),
                ])
                .requires(&[PACKAGE_MANAGER, CURL]),
            ),
            LinuxDistro::Arch => Resolution::Action(
                InstallAction::new(vec!["sudo pacman -Sy --noconfirm code".to_string()])
                    .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Unknown => Resolution::Unsupported,
        },
        Platform::MacOs => Resolution::Action(
            InstallAction::new(vec!["brew install --cask visual-studio-code".to_string()])
                .requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Windows => Resolution::Action(
            InstallAction::new(vec!["choco install -y vscode".to_string()])
                .requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Unknown => Resolution::Unsupported,
    }
}

fn gcc_action(platform: Platform) -> Resolution {
    match platform {
        Platform::Linux(distro) => match distro {
            LinuxDistro::Ubuntu | LinuxDistro::Debian => Resolution::Action(
                InstallAction::new(vec![
                    "sudo apt-get update".to_string(),
                    "sudo apt-get install -y build-essential".to_string(),
                ])
                .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Centos | LinuxDistro::Rhel | LinuxDistro::Fedora => Resolution::Action(
                InstallAction::new(vec!["sudo dnf install -y gcc gcc-c++ make".to_string()])
                    .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Arch => Resolution::Action(
                InstallAction::new(vec![
                    "sudo pacman -Sy --noconfirm base-devel".to_string()
                ])
                .requires(&[PACKAGE_MANAGER]),
            ),
            LinuxDistro::Unknown => Resolution::Unsupported,
        },
        Platform::MacOs => Resolution::Action(
            InstallAction::new(vec!["brew install gcc".to_string()]).requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Windows => Resolution::Action(
            InstallAction::new(vec!["choco install -y mingw".to_string()])
                .requires(&[PACKAGE_MANAGER]),
        ),
        Platform::Unknown => Resolution::Unsupported,
    }
}
