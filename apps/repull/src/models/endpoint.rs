//! Endpoint schema: one side (source or target) of a sync.

use serde::{Deserialize, Serialize};

/// Path prefixes treated as user-owned when guessing whether writes need sudo.
pub const USER_OWNED_PREFIXES: [&str; 3] = ["/home", "/Users", "/tmp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    #[default]
    Local,
    Ssh,
    Git,
}

impl EndpointKind {
    pub fn id(&self) -> &'static str {
        match self {
            EndpointKind::Local => "local",
            EndpointKind::Ssh => "ssh",
            EndpointKind::Git => "git",
        }
    }
}

/// Endpoint description as supplied by the caller.
///
/// Fields that do not apply to `kind` are carried but ignored: `host`, `user`
/// and `private_key_path` only matter for SSH, `branch` and `use_github_cli`
/// only for Git.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub kind: EndpointKind,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub use_github_cli: bool,
    /// Explicit sudo choice. `None` falls back to [`suggest_force_sudo`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_sudo: Option<bool>,
}

impl EndpointConfig {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            kind: EndpointKind::Local,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn ssh(user: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: EndpointKind::Ssh,
            path: path.into(),
            host: Some(host.into()),
            user: Some(user.into()),
            ..Self::default()
        }
    }

    pub fn git(url: impl Into<String>) -> Self {
        Self {
            kind: EndpointKind::Git,
            path: url.into(),
            ..Self::default()
        }
    }

    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key_path = Some(key.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_github_cli(mut self, on: bool) -> Self {
        self.use_github_cli = on;
        self
    }

    pub fn with_force_sudo(mut self, on: bool) -> Self {
        self.force_sudo = Some(on);
        self
    }

    /// Whether commands touching this endpoint should run under sudo.
    ///
    /// An explicit `force_sudo` always wins. Otherwise only local paths get the
    /// prefix heuristic; remote and Git endpoints default to no sudo.
    pub fn wants_sudo(&self) -> bool {
        match self.force_sudo {
            Some(v) => v,
            None => self.kind == EndpointKind::Local && suggest_force_sudo(&self.path),
        }
    }

    /// Git endpoint that asked for the GitHub CLI.
    pub fn uses_github_cli(&self) -> bool {
        self.kind == EndpointKind::Git && self.use_github_cli
    }

    /// Branch to pass along, Git endpoints only. Blank branches count as unset.
    pub fn git_branch(&self) -> Option<&str> {
        if self.kind != EndpointKind::Git {
            return None;
        }
        self.branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

/// Guess whether a local path lies outside the user-owned prefixes.
///
/// Prefixes match whole path components, so `/homework` is not under `/home`.
/// This is a default for the UI, not a permission check.
pub fn suggest_force_sudo(path: &str) -> bool {
    let p = path.trim();
    if p.is_empty() {
        return false;
    }
    !USER_OWNED_PREFIXES.iter().any(|prefix| {
        p == *prefix
            || p.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_match_plan_file_names() {
        for kind in [EndpointKind::Local, EndpointKind::Ssh, EndpointKind::Git] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.id());
        }
    }

    #[test]
    fn test_suggest_force_sudo_prefixes() {
        assert!(!suggest_force_sudo("/home/bob/repo"));
        assert!(!suggest_force_sudo("/Users/alice/src"));
        assert!(!suggest_force_sudo("/tmp"));
        assert!(suggest_force_sudo("/var/www/html"));
        assert!(suggest_force_sudo("/homework/repo"));
        assert!(!suggest_force_sudo(""));
    }

    #[test]
    fn test_wants_sudo_explicit_value_wins() {
        let ep = EndpointConfig::local("/opt/app");
        assert!(ep.wants_sudo());
        assert!(!ep.clone().with_force_sudo(false).wants_sudo());
        let home = EndpointConfig::local("/home/bob/app").with_force_sudo(true);
        assert!(home.wants_sudo());
        // heuristic only applies to local endpoints
        assert!(!EndpointConfig::ssh("u", "h", "/srv/app").wants_sudo());
    }

    #[test]
    fn test_git_only_fields_ignored_for_other_kinds() {
        let ep = EndpointConfig::local("/tmp/x")
            .with_branch("main")
            .with_github_cli(true);
        assert_eq!(ep.git_branch(), None);
        assert!(!ep.uses_github_cli());
        let git = EndpointConfig::git("https://github.com/a/b.git").with_branch("  ");
        assert_eq!(git.git_branch(), None);
    }

    #[test]
    fn test_deserialize_endpoint_toml() {
        let ep: EndpointConfig = toml::from_str(
            r#"
kind = "ssh"
path = "/srv/repo"
host = "10.0.0.2"
user = "deploy"
private_key_path = "~/.ssh/id_ed25519"
"#,
        )
        .unwrap();
        assert_eq!(ep.kind, EndpointKind::Ssh);
        assert_eq!(ep.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(ep.force_sudo, None);
    }
}
