//! CLI argument parsing via `clap`.

use crate::models::PackageManager;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "repull", version, about = "Compile repo sync plans into provisioning scripts")]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Default)]
/// Plan lookup flags shared by the plan-driven subcommands.
pub struct PlanArgs {
    #[arg(long)]
    pub repo_root: Option<String>,
    /// Plan file to use instead of repull.{toml,yaml} in the repo root
    #[arg(long)]
    pub plan: Option<String>,
    /// human | json
    #[arg(long)]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Add --dry-run to the sync invocation")]
    pub dry_run: bool,
    #[arg(long, value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,
}

impl PlanArgs {
    /// `--dry-run` can only switch dry-run on; absent means "keep the plan's value".
    pub fn dry_run_override(&self) -> Option<bool> {
        self.dry_run.then_some(true)
    }
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    Version,
    /// Validate, compile and lint the plan; print the script
    Compile {
        #[command(flatten)]
        plan: PlanArgs,
        /// Write the script to this file instead of stdout
        #[arg(long)]
        write: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if the linter reports errors")]
        strict: bool,
    },
    /// Check source and target endpoints only
    Validate {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Print the sync invocation without the provisioning sections
    Preview {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Lint existing shell scripts (paths or glob patterns)
    Lint {
        #[arg(required = true)]
        paths: Vec<String>,
        #[arg(long)]
        output: Option<String>,
    },
}

fn parse_package_manager(s: &str) -> Result<PackageManager, String> {
    PackageManager::from_id(s).ok_or_else(|| {
        format!(
            "unknown package manager '{}' (expected one of: {})",
            s,
            PackageManager::ALL
                .iter()
                .map(|pm| pm.id())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}
