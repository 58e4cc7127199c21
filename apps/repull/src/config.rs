//! Plan file discovery and effective settings resolution.
//!
//! Repull reads `repull.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `sync.dry_run`: false
//! - `sync.executable`: `python3 sync.py`
//! - `system.package_manager`: `apt`, all toggles off
//!
//! Overrides precedence: CLI > plan file > defaults.

use crate::models::{EndpointConfig, PackageManager, Plan, SyncOptions, SystemConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PLAN_FILE_NAMES: [&str; 3] = ["repull.toml", "repull.yaml", "repull.yml"];

#[derive(Debug, Deserialize)]
/// Root layout of a plan file.
pub struct PlanFile {
    pub output: Option<String>,
    pub source: EndpointConfig,
    pub target: EndpointConfig,
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub sync: SyncOptions,
}

impl PlanFile {
    pub fn into_plan(self) -> (Plan, Option<String>) {
        let plan = Plan {
            source: self.source,
            target: self.target,
            system: self.system,
            sync: self.sync,
        };
        (plan, self.output)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no plan file found in {} (looked for {})", .0.display(), PLAN_FILE_NAMES.join(", "))]
    NotFound(PathBuf),
    #[error("failed to read plan file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid plan TOML {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid plan YAML {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub plan_path: PathBuf,
    pub plan: Plan,
    pub output: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a plan file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if PLAN_FILE_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// First plan file present in `root`, in `PLAN_FILE_NAMES` order.
pub fn find_plan_file(root: &Path) -> Option<PathBuf> {
    PLAN_FILE_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.exists())
}

/// Parse a plan file; the extension picks YAML, anything else is TOML.
pub fn load_plan_file(path: &Path) -> Result<PlanFile, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, the plan file, and defaults.
///
/// An explicit `cli_plan` is used as-is (relative to the working directory);
/// otherwise the plan file is looked up in the detected repository root.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_plan: Option<&str>,
    cli_output: Option<&str>,
    cli_dry_run: Option<bool>,
    cli_package_manager: Option<PackageManager>,
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let plan_path = match cli_plan {
        Some(p) => PathBuf::from(p),
        None => find_plan_file(&repo_root).ok_or_else(|| ConfigError::NotFound(repo_root.clone()))?,
    };
    debug!(plan = %plan_path.display(), root = %repo_root.display(), "loading plan");
    let (mut plan, file_output) = load_plan_file(&plan_path)?.into_plan();

    if let Some(dry_run) = cli_dry_run {
        plan.sync.dry_run = dry_run;
    }
    if let Some(pm) = cli_package_manager {
        plan.system.package_manager = pm;
    }
    let output = cli_output
        .map(|s| s.to_string())
        .or(file_output)
        .unwrap_or_else(|| "human".to_string());

    Ok(Effective {
        repo_root,
        plan_path,
        plan,
        output,
    })
}
