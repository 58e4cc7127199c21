//! Repull: compile repository sync plans into provisioning shell scripts and
//! lint the result.
//!
//! The flow is one-way: validate endpoints, compile the plan into a script,
//! lint the exact script text.

pub mod cli;
pub mod config;
pub mod lint;
pub mod models;
pub mod output;
pub mod resolver;
pub mod script;
pub mod utils;
pub mod validate;

use models::{LintReport, Plan};
use script::{CompileError, CompiledScript};

/// Compile a plan and lint the generated text.
///
/// Diagnostics never block the script; callers decide what to do with them.
pub fn compile_and_lint(plan: &Plan) -> Result<(CompiledScript, LintReport), CompileError> {
    let script = script::compile(plan)?;
    let report = lint::lint_report(None, &script.text());
    Ok((script, report))
}
