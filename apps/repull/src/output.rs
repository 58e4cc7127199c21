//! Output rendering for compile, validate, preview and lint commands.
//!
//! Supports `human` (default) and `json` outputs. In human mode the script
//! goes to stdout and diagnostics to stderr, so the script can be piped.

use crate::lint::ReadFailure;
use crate::models::{Diagnostic, LintReport, LintSummary, Severity};
use crate::script::CompiledScript;
use owo_colors::OwoColorize;
use serde_json::json;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to render json: {}", e),
    }
}

/// One human-readable diagnostic line.
pub fn format_diagnostic(d: &Diagnostic, file: Option<&str>, color: bool) -> String {
    let (icon, sev) = match d.severity {
        Severity::Error => (
            "❌",
            if color {
                "[ERROR]".red().bold().to_string()
            } else {
                "[ERROR]".to_string()
            },
        ),
        Severity::Warning => (
            "⚠️",
            if color {
                "[WARN]".yellow().bold().to_string()
            } else {
                "[WARN]".to_string()
            },
        ),
    };
    let loc = match file {
        Some(f) => format!("{}:{}", f, d.line),
        None => format!("line {}", d.line),
    };
    let loc = if color { loc.bold().to_string() } else { loc };
    format!("{} {} {} (rule={}) — {}", icon, sev, loc, d.rule_id, d.message)
}

fn summary_line(s: &LintSummary, files: Option<usize>, color: bool) -> String {
    let text = match files {
        Some(n) => format!(
            "— Summary — errors={} warnings={} files={}",
            s.errors, s.warnings, n
        ),
        None => format!("— Summary — errors={} warnings={}", s.errors, s.warnings),
    };
    if color {
        text.bold().to_string()
    } else {
        text
    }
}

/// Print a compiled script and its lint report.
pub fn print_compile(script: &CompiledScript, report: &LintReport, output: &str, wrote: Option<&str>) {
    match output {
        "json" => print_json(&json!({
            "script": script.text(),
            "sections": script.sections(),
            "diagnostics": report.diagnostics,
            "summary": report.summary,
            "wrote": wrote,
        })),
        _ => {
            let color = use_colors(output);
            match wrote {
                Some(path) => {
                    if color {
                        eprintln!("{} {}", "📝 wrote:".green().bold(), path.bold());
                    } else {
                        eprintln!("📝 wrote: {}", path);
                    }
                }
                None => print!("{}", script.text()),
            }
            for d in &report.diagnostics {
                eprintln!("{}", format_diagnostic(d, None, color));
            }
            eprintln!("{}", summary_line(&report.summary, None, color));
        }
    }
}

/// Print endpoint validation errors.
pub fn print_validation(errors: &[String], output: &str) {
    match output {
        "json" => print_json(&json!({
            "valid": errors.is_empty(),
            "errors": errors,
        })),
        _ => {
            let color = use_colors(output);
            if errors.is_empty() {
                if color {
                    println!("{} {}", "✅".green(), "Plan is valid.".bold());
                } else {
                    println!("✅ Plan is valid.");
                }
                return;
            }
            for e in errors {
                if color {
                    eprintln!("{} {}", "❌ error:".red().bold(), e);
                } else {
                    eprintln!("❌ error: {}", e);
                }
            }
        }
    }
}

/// Print the sync invocation alone.
pub fn print_preview(command: &str, output: &str) {
    match output {
        "json" => print_json(&json!({ "command": command })),
        _ => println!("{}", command),
    }
}

/// Print lint reports for files on disk plus any read failures.
pub fn print_lint(reports: &[LintReport], failures: &[ReadFailure], output: &str) {
    let total = LintSummary {
        errors: reports.iter().map(|r| r.summary.errors).sum(),
        warnings: reports.iter().map(|r| r.summary.warnings).sum(),
    };
    match output {
        "json" => {
            let errors: Vec<_> = failures
                .iter()
                .map(|f| json!({"file": f.file, "message": f.message}))
                .collect();
            print_json(&json!({
                "results": reports,
                "errors": errors,
                "summary": {
                    "errors": total.errors,
                    "warnings": total.warnings,
                    "files": reports.len(),
                },
            }));
        }
        _ => {
            let color = use_colors(output);
            for f in failures {
                if color {
                    eprintln!("{} {}: {}", "❌ error:".red().bold(), f.file, f.message);
                } else {
                    eprintln!("❌ error: {}: {}", f.file, f.message);
                }
            }
            for r in reports {
                for d in &r.diagnostics {
                    println!("{}", format_diagnostic(d, r.file.as_deref(), color));
                }
            }
            println!("{}", summary_line(&total, Some(reports.len()), color));
        }
    }
}
