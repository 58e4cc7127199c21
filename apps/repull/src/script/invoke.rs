//! Final sync invocation line.

use crate::models::{EndpointConfig, EndpointKind, Plan};
use crate::utils::dq_escape;

/// Positional form of an endpoint as passed to `--source`/`--target`.
///
/// SSH endpoints become `ssh://user@host:path`, with `?identity_file=` when a
/// key is set; missing user/host fall back to `user`/`host`.
pub fn endpoint_arg(ep: &EndpointConfig) -> String {
    match ep.kind {
        EndpointKind::Ssh => {
            let user = non_blank(ep.user.as_deref()).unwrap_or("user");
            let host = non_blank(ep.host.as_deref()).unwrap_or("host");
            let mut s = format!("ssh://{}@{}:{}", user, host, ep.path);
            if let Some(key) = non_blank(ep.private_key_path.as_deref()) {
                s.push_str("?identity_file=");
                s.push_str(key);
            }
            s
        }
        EndpointKind::Local | EndpointKind::Git => ep.path.clone(),
    }
}

/// Build the sync command. Flag order is fixed: source, target, `--use-gh`,
/// `--branch`, `--dry-run`.
pub fn render(plan: &Plan) -> String {
    let mut cmd = String::new();
    if plan.target.wants_sudo() {
        cmd.push_str("sudo ");
    }
    cmd.push_str(plan.sync.executable.trim());
    cmd.push_str(&format!(
        " --source \"{}\"",
        dq_escape(&endpoint_arg(&plan.source))
    ));
    cmd.push_str(&format!(
        " --target \"{}\"",
        dq_escape(&endpoint_arg(&plan.target))
    ));
    if plan.source.uses_github_cli() {
        cmd.push_str(" --use-gh");
    }
    if let Some(branch) = plan.source.git_branch() {
        cmd.push_str(&format!(" --branch \"{}\"", dq_escape(branch)));
    }
    if plan.sync.dry_run {
        cmd.push_str(" --dry-run");
    }
    cmd
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}
