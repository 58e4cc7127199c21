//! Structural validation of endpoints and pip package names.
//!
//! Errors are collected, never raised. An empty path short-circuits every
//! other rule; SSH checks accumulate independently.

use crate::models::{EndpointConfig, EndpointKind, PythonPackages};

/// URL prefixes accepted for Git endpoints.
pub const GIT_URL_PREFIXES: [&str; 5] = ["https://", "http://", "git@", "ssh://", "git://"];

/// Validate one endpoint, prefixing every message with `label`.
pub fn validate(config: &EndpointConfig, label: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let path = config.path.as_str();
    if path.trim().is_empty() {
        errors.push(format!("{}: Path is required.", label));
        return errors;
    }
    match config.kind {
        EndpointKind::Local => {
            if !path.starts_with('/') {
                errors.push(format!(
                    "{}: Local path must be absolute (start with '/').",
                    label
                ));
            }
        }
        EndpointKind::Ssh => {
            if is_blank(config.host.as_deref()) {
                errors.push(format!("{}: SSH host is required.", label));
            }
            if is_blank(config.user.as_deref()) {
                errors.push(format!("{}: SSH user is required.", label));
            }
            if !path.starts_with('/') {
                errors.push(format!(
                    "{}: Remote path must be absolute (start with '/').",
                    label
                ));
            }
        }
        EndpointKind::Git => {
            if !GIT_URL_PREFIXES.iter().any(|p| path.starts_with(p)) {
                errors.push(format!(
                    "{}: Git URL must start with one of {}.",
                    label,
                    GIT_URL_PREFIXES.join(", ")
                ));
            }
            // scp-style: git@host:owner/repo
            if path.starts_with("git@") && !path.contains(':') {
                errors.push(format!(
                    "{}: SSH Git URL is missing the ':' separator (expected git@host:owner/repo).",
                    label
                ));
            }
        }
    }
    errors
}

/// Package names land one per line in a here-document, so whitespace and
/// control characters are refused outright.
pub fn validate_packages(pkgs: &PythonPackages, label: &str) -> Vec<String> {
    pkgs.iter()
        .filter(|name| name.chars().any(|c| c.is_whitespace() || c.is_control()))
        .map(|name| {
            format!(
                "{}: Python package {:?} must not contain whitespace or control characters.",
                label, name
            )
        })
        .collect()
}

fn is_blank(v: Option<&str>) -> bool {
    v.map(|s| s.trim().is_empty()).unwrap_or(true)
}
