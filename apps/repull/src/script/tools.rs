//! Tool detection and installation section.

use super::helper;
use crate::models::Plan;
use crate::resolver;

pub const PLACEHOLDER: &str = "# Tool installation skipped (install_tools is off).";

/// A tool the script makes sure is present before syncing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    pub cmd: &'static str,
    pub package: &'static str,
    pub min_version: Option<&'static str>,
}

/// Tools required by the plan, in emission order.
pub fn requirements(plan: &Plan) -> Vec<ToolRequirement> {
    let pm = plan.system.package_manager;
    let mut reqs = vec![
        ToolRequirement {
            cmd: "git",
            package: "git",
            min_version: Some("2.25.0"),
        },
        ToolRequirement {
            cmd: "curl",
            package: "curl",
            min_version: None,
        },
        ToolRequirement {
            cmd: "python3",
            package: "python3",
            min_version: None,
        },
    ];
    if plan.source.uses_github_cli() {
        reqs.push(ToolRequirement {
            cmd: "gh",
            package: "gh",
            min_version: Some("2.0.0"),
        });
    }
    reqs.push(ToolRequirement {
        cmd: "ssh",
        package: resolver::ssh_package(pm),
        min_version: Some("7.6"),
    });
    if plan.system.install_dependencies {
        reqs.push(ToolRequirement {
            cmd: "pip3",
            package: resolver::pip_package(pm),
            min_version: None,
        });
    }
    reqs
}

pub fn render(plan: &Plan) -> Option<String> {
    if !plan.system.install_tools {
        return None;
    }
    let mut lines = vec![format!(
        "# --- Tool installation ({}) ---",
        plan.system.package_manager.id()
    )];
    for req in requirements(plan) {
        lines.push(helper::call(req.cmd, req.package, req.min_version));
    }
    Some(lines.join("\n"))
}
