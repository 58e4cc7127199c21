//! Data model shared by the validator, compiler, linter and renderers.

pub mod endpoint;
pub mod plan;
pub mod system;

pub use endpoint::{EndpointConfig, EndpointKind};
pub use plan::Plan;
pub use system::{PackageManager, PythonPackages, SyncOptions, SystemConfig};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single linter finding against script text. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintSummary {
    pub errors: usize,
    pub warnings: usize,
}

/// Diagnostics for one script plus counts by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    /// Display name of the linted file; `None` for freshly compiled text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: LintSummary,
}

impl LintReport {
    pub fn new(file: Option<String>, diagnostics: Vec<Diagnostic>) -> Self {
        let errors = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let summary = LintSummary {
            errors,
            warnings: diagnostics.len() - errors,
        };
        Self {
            file,
            diagnostics,
            summary,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
