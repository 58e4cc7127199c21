//! Package manager command table.
//!
//! Single source of truth for install prefixes, firewall families and the
//! per-manager package names used by the tool section.

use crate::models::PackageManager;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallFamily {
    Ufw,
    Firewalld,
    Unsupported,
}

impl FirewallFamily {
    pub fn id(&self) -> &'static str {
        match self {
            FirewallFamily::Ufw => "ufw",
            FirewallFamily::Firewalld => "firewalld",
            FirewallFamily::Unsupported => "unsupported",
        }
    }
}

/// Install command prefix; package names are appended by the caller.
pub fn install_command(pm: PackageManager) -> &'static str {
    match pm {
        PackageManager::Apt => "sudo apt-get install -y",
        PackageManager::Pacman => "sudo pacman -Syu --noconfirm",
        PackageManager::Dnf => "sudo dnf install -y",
        PackageManager::Yum => "sudo yum install -y",
        PackageManager::Zypper => "sudo zypper install -y",
        PackageManager::Brew => "brew install",
    }
}

pub fn firewall_family(pm: PackageManager) -> FirewallFamily {
    match pm {
        PackageManager::Apt | PackageManager::Pacman => FirewallFamily::Ufw,
        PackageManager::Dnf | PackageManager::Yum | PackageManager::Zypper => {
            FirewallFamily::Firewalld
        }
        PackageManager::Brew => FirewallFamily::Unsupported,
    }
}

/// Package providing the `ssh` client, keyed by firewall family.
pub fn ssh_package(pm: PackageManager) -> &'static str {
    match firewall_family(pm) {
        FirewallFamily::Ufw => "openssh-client",
        FirewallFamily::Firewalld | FirewallFamily::Unsupported => "openssh",
    }
}

/// Package providing `pip3`.
pub fn pip_package(pm: PackageManager) -> &'static str {
    match pm {
        PackageManager::Pacman => "python-pip",
        _ => "python3-pip",
    }
}
