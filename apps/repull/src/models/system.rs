//! Provisioning settings and sync options, independent of the endpoints.

use serde::{Deserialize, Serialize};

/// Supported system package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Brew,
}

impl PackageManager {
    pub const ALL: [PackageManager; 6] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Yum,
        PackageManager::Pacman,
        PackageManager::Zypper,
        PackageManager::Brew,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Brew => "brew",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.id().eq_ignore_ascii_case(id.trim()))
    }
}

/// Ordered list of pip requirements with duplicates dropped on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PythonPackages(Vec<String>);

impl PythonPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package name exactly as given. Blank names and repeats are
    /// ignored; returns whether the list changed.
    pub fn insert(&mut self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        if name.trim().is_empty() || self.0.iter().any(|p| p == name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for PythonPackages {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<PythonPackages> for Vec<String> {
    fn from(pkgs: PythonPackages) -> Self {
        pkgs.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for PythonPackages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = PythonPackages::new();
        for name in iter {
            out.insert(name);
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub package_manager: PackageManager,
    pub install_tools: bool,
    pub configure_firewall: bool,
    pub install_dependencies: bool,
    pub python_packages: PythonPackages,
}

pub const DEFAULT_SYNC_EXECUTABLE: &str = "python3 sync.py";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncOptions {
    pub dry_run: bool,
    /// Command placed before the sync flags.
    pub executable: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            executable: DEFAULT_SYNC_EXECUTABLE.to_string(),
        }
    }
}
