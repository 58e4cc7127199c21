//! Repull CLI binary entry point.
//! Delegates to the library for validation, compilation and linting.

use clap::Parser;
use owo_colors::OwoColorize;
use repull::cli::{Cli, Commands, PlanArgs};
use repull::config::{self, Effective};
use repull::{lint, output, script};
use std::fs;
use std::process::exit;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let layer = fmt::layer().compact().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(layer).with(filter).init();
}

fn fail(msg: &str, code: i32) -> ! {
    eprintln!("{} {}", "❌ error:".red().bold(), msg);
    exit(code);
}

/// Load the plan or exit with code 2.
fn effective(args: &PlanArgs) -> Effective {
    match config::resolve_effective(
        args.repo_root.as_deref(),
        args.plan.as_deref(),
        args.output.as_deref(),
        args.dry_run_override(),
        args.package_manager,
    ) {
        Ok(eff) => {
            debug!(
                root = %eff.repo_root.display(),
                source = eff.plan.source.kind.id(),
                target = eff.plan.target.kind.id(),
                pm = eff.plan.system.package_manager.id(),
                "resolved plan"
            );
            eff
        }
        Err(e) => fail(&format!("{} (pass --plan or add repull.toml)", e), 2),
    }
}

/// Validation errors abort every plan-driven command.
fn require_valid(eff: &Effective) {
    let errors = eff.plan.validate();
    if !errors.is_empty() {
        output::print_validation(&errors, &eff.output);
        exit(2);
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Compile {
            plan,
            write,
            strict,
        } => {
            let eff = effective(&plan);
            require_valid(&eff);
            let (compiled, report) = match repull::compile_and_lint(&eff.plan) {
                Ok(r) => r,
                Err(e) => fail(&e.to_string(), 2),
            };
            debug!(
                sections = compiled.sections().len(),
                errors = report.summary.errors,
                warnings = report.summary.warnings,
                "compiled plan"
            );
            if let Some(path) = write.as_deref() {
                if let Err(e) = fs::write(path, compiled.text()) {
                    fail(&format!("Failed to write script '{}': {}", path, e), 2);
                }
                info!(path, "wrote script");
            }
            output::print_compile(&compiled, &report, &eff.output, write.as_deref());
            if strict && report.summary.errors > 0 {
                exit(1);
            }
        }
        Commands::Validate { plan } => {
            let eff = effective(&plan);
            let errors = eff.plan.validate();
            output::print_validation(&errors, &eff.output);
            if !errors.is_empty() {
                exit(2);
            }
        }
        Commands::Preview { plan } => {
            let eff = effective(&plan);
            require_valid(&eff);
            match script::compile(&eff.plan) {
                Ok(compiled) => output::print_preview(compiled.sync_command(), &eff.output),
                Err(e) => fail(&e.to_string(), 2),
            }
        }
        Commands::Lint {
            paths,
            output: out,
        } => {
            let out = out.unwrap_or_else(|| "human".to_string());
            let files = lint::expand_targets(&paths);
            if files.is_empty() {
                fail("No scripts matched the given paths", 2);
            }
            let (reports, failures) = lint::lint_files(&files);
            output::print_lint(&reports, &failures, &out);
            if !failures.is_empty() {
                exit(2);
            }
            if reports.iter().any(|r| r.summary.errors > 0) {
                exit(1);
            }
        }
    }
}
