//! Heuristic shell-script linter.
//!
//! Line-oriented pattern checks, no shell parsing. Rule ids follow
//! ShellCheck's numbering for the defects they approximate:
//! - `SC1068` spaces around `=` in an assignment (error)
//! - `SC2086` unquoted `$` expansion (warning)
//! - `SC1035` missing space after `[` in `if [` (error)
//! - `SC1020` missing space before a closing `]` (error)
//!
//! Blank lines and full-line comments are skipped.

use crate::models::{Diagnostic, LintReport, Severity};
use crate::utils::rel_to_wd;
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const RULE_ASSIGN_SPACING: &str = "SC1068";
pub const RULE_UNQUOTED_EXPANSION: &str = "SC2086";
pub const RULE_SPACE_AFTER_BRACKET: &str = "SC1035";
pub const RULE_SPACE_BEFORE_BRACKET: &str = "SC1020";

/// Shell function whose call lines are exempt from the unquoted-expansion rule.
pub const TOOL_CHECK_HELPER: &str = "check_tool";

static ASSIGN_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z_][A-Za-z0-9_]*(?:[ \t]+=[ \t]*|=[ \t]+)\S")
        .expect("assignment pattern is valid")
});

static IF_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bif\b").expect("if pattern is valid"));

/// Lint script text, returning diagnostics ordered by line.
pub fn lint(script: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = idx + 1;
        if is_spaced_assignment(raw) {
            out.push(diag(
                RULE_ASSIGN_SPACING,
                Severity::Error,
                lineno,
                "Spaces around '=' break variable assignment; remove them",
            ));
        }
        if is_unquoted_expansion(line) {
            out.push(diag(
                RULE_UNQUOTED_EXPANSION,
                Severity::Warning,
                lineno,
                "Expansion is not quoted; double-quote it to prevent globbing and word splitting",
            ));
        }
        if line.contains("if [") && !line.contains("if [ ") {
            out.push(diag(
                RULE_SPACE_AFTER_BRACKET,
                Severity::Error,
                lineno,
                "Missing space after '[' in test expression",
            ));
        }
        if line.ends_with(']') && line.contains("[ ") && !line.ends_with(" ]") {
            out.push(diag(
                RULE_SPACE_BEFORE_BRACKET,
                Severity::Error,
                lineno,
                "Missing space before ']' in test expression",
            ));
        }
    }
    out
}

/// Lint text and wrap the result with severity counts.
pub fn lint_report(file: Option<String>, script: &str) -> LintReport {
    LintReport::new(file, lint(script))
}

fn is_spaced_assignment(line: &str) -> bool {
    !line.contains('[') && !IF_WORD.is_match(line) && ASSIGN_SPACING.is_match(line)
}

fn is_unquoted_expansion(line: &str) -> bool {
    line.contains('$')
        && !line.contains('"')
        && !line.contains('\'')
        && !line.contains('=')
        && !line.starts_with("if")
        && !line.starts_with("while")
        && !line.starts_with(TOOL_CHECK_HELPER)
}

fn diag(rule: &str, severity: Severity, line: usize, message: &str) -> Diagnostic {
    Diagnostic {
        rule_id: rule.to_string(),
        severity,
        line,
        message: message.to_string(),
    }
}

/// Expand CLI path arguments: existing paths pass through, anything else is
/// treated as a glob pattern. Order follows the arguments, duplicates dropped.
pub fn expand_targets(args: &[String]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();
    for arg in args {
        let direct = PathBuf::from(arg);
        let matches: Vec<PathBuf> = if direct.exists() {
            vec![direct]
        } else {
            match glob::glob(arg) {
                Ok(paths) => paths.flatten().collect(),
                Err(e) => {
                    warn!("invalid glob pattern '{}': {}", arg, e);
                    Vec::new()
                }
            }
        };
        for p in matches {
            if p.is_file() && !out.contains(&p) {
                out.push(p);
            }
        }
    }
    out
}

/// A script that could not be read.
#[derive(Debug, Clone)]
pub struct ReadFailure {
    pub file: String,
    pub message: String,
}

/// Lint files on disk in parallel. Reports come back in input order.
pub fn lint_files(paths: &[PathBuf]) -> (Vec<LintReport>, Vec<ReadFailure>) {
    let results: Vec<Result<LintReport, ReadFailure>> =
        paths.par_iter().map(|p| lint_file(p)).collect();
    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for r in results {
        match r {
            Ok(rep) => reports.push(rep),
            Err(f) => failures.push(f),
        }
    }
    (reports, failures)
}

fn lint_file(path: &Path) -> Result<LintReport, ReadFailure> {
    let name = rel_to_wd(path);
    let text = fs::read_to_string(path).map_err(|e| ReadFailure {
        file: name.clone(),
        message: e.to_string(),
    })?;
    let report = lint_report(Some(name), &text);
    debug!(
        file = report.file.as_deref().unwrap_or_default(),
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "linted script"
    );
    Ok(report)
}
