//! Plan-to-script compiler.
//!
//! Sections are emitted in a fixed order: shebang, tool-check helper (only
//! when tools or firewall are requested), tools, firewall, dependencies and
//! the sync invocation. Disabled sections become a single comment so the
//! reader can see what was skipped.

pub mod deps;
pub mod firewall;
pub mod helper;
pub mod invoke;
pub mod tools;

use crate::models::Plan;
use serde::Serialize;

pub const SHEBANG: &str = "#!/bin/bash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Shebang,
    Helper,
    Tools,
    Firewall,
    Dependencies,
    Sync,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// False when the body is only the explanatory placeholder.
    pub populated: bool,
    pub body: String,
}

impl Section {
    fn populated(kind: SectionKind, body: String) -> Self {
        Self {
            kind,
            populated: true,
            body,
        }
    }

    fn from_toggle(kind: SectionKind, body: Option<String>, placeholder: &str) -> Self {
        match body {
            Some(body) => Self::populated(kind, body),
            None => Self {
                kind,
                populated: false,
                body: placeholder.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledScript {
    sections: Vec<Section>,
}

impl CompiledScript {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// The sync command line on its own.
    pub fn sync_command(&self) -> &str {
        self.section(SectionKind::Sync)
            .map(|s| s.body.as_str())
            .unwrap_or_default()
    }

    /// Flattened script: sections separated by a blank line, trailing newline.
    pub fn text(&self) -> String {
        let mut out = self
            .sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("plan has {} invalid setting(s):\n  - {}", .0.len(), .0.join("\n  - "))]
    InvalidPlan(Vec<String>),
}

/// Validate the plan, then compile it. Refuses while any setting is invalid.
pub fn compile(plan: &Plan) -> Result<CompiledScript, CompileError> {
    let errors = plan.validate();
    if !errors.is_empty() {
        return Err(CompileError::InvalidPlan(errors));
    }
    Ok(assemble(plan))
}

fn assemble(plan: &Plan) -> CompiledScript {
    let sys = &plan.system;
    let mut sections = vec![Section::populated(SectionKind::Shebang, SHEBANG.to_string())];
    if sys.install_tools || sys.configure_firewall {
        sections.push(Section::populated(
            SectionKind::Helper,
            helper::render(sys.package_manager),
        ));
    }
    sections.push(Section::from_toggle(
        SectionKind::Tools,
        tools::render(plan),
        tools::PLACEHOLDER,
    ));
    sections.push(Section::from_toggle(
        SectionKind::Firewall,
        firewall::render(plan),
        firewall::PLACEHOLDER,
    ));
    sections.push(Section::from_toggle(
        SectionKind::Dependencies,
        deps::render(plan),
        deps::PLACEHOLDER,
    ));
    sections.push(Section::populated(SectionKind::Sync, invoke::render(plan)));
    CompiledScript { sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EndpointConfig, PackageManager};

    fn base() -> Plan {
        Plan::new(
            EndpointConfig::local("/home/u/src"),
            EndpointConfig::local("/home/u/dst"),
        )
    }

    #[test]
    fn test_all_sections_off() {
        let script = compile(&base()).unwrap();
        let text = script.text();
        let lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], SHEBANG);
        assert_eq!(&lines[1..4], &[tools::PLACEHOLDER, firewall::PLACEHOLDER, deps::PLACEHOLDER]);
        assert!(lines[4].starts_with("python3 sync.py --source"));
        assert!(!text.contains("check_tool"));
        assert!(script.section(SectionKind::Helper).is_none());
    }

    #[test]
    fn test_section_order_fixed() {
        let mut plan = base();
        plan.system.install_tools = true;
        plan.system.configure_firewall = true;
        plan.system.install_dependencies = true;
        let kinds: Vec<_> = compile(&plan)
            .unwrap()
            .sections()
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Shebang,
                SectionKind::Helper,
                SectionKind::Tools,
                SectionKind::Firewall,
                SectionKind::Dependencies,
                SectionKind::Sync,
            ]
        );
    }

    #[test]
    fn test_helper_emitted_for_firewall_alone() {
        let mut plan = base();
        plan.system.configure_firewall = true;
        let script = compile(&plan).unwrap();
        let text = script.text();
        let def = text.find("check_tool() {").unwrap();
        let call = text.find("check_tool ufw ufw").unwrap();
        assert!(def < call);
        assert!(!script.section(SectionKind::Tools).unwrap().populated);
    }

    #[test]
    fn test_dnf_firewall_uses_firewall_cmd() {
        let mut plan = base();
        plan.system.package_manager = PackageManager::Dnf;
        plan.system.configure_firewall = true;
        let script = compile(&plan).unwrap();
        let fw = &script.section(SectionKind::Firewall).unwrap().body;
        assert!(fw.contains("firewall-cmd"));
        assert!(!fw.contains("ufw"));
    }

    #[test]
    fn test_invalid_plan_refused() {
        let plan = Plan::new(EndpointConfig::local(""), EndpointConfig::git("ftp://x/y"));
        match compile(&plan) {
            Err(CompileError::InvalidPlan(errs)) => {
                assert_eq!(errs.len(), 2);
                assert!(errs[0].starts_with("Source:"));
                assert!(errs[1].starts_with("Target:"));
            }
            other => panic!("expected invalid plan, got {:?}", other),
        }
    }

    #[test]
    fn test_package_with_line_break_refused() {
        let mut plan = base();
        plan.system.install_dependencies = true;
        plan.system.python_packages = ["requests\nEOF\necho INJECTED"].into_iter().collect();
        match compile(&plan) {
            Err(CompileError::InvalidPlan(errs)) => {
                assert_eq!(errs.len(), 1);
                assert!(errs[0].starts_with("System: Python package"));
            }
            other => panic!("expected invalid plan, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let mut plan = base();
        plan.system.install_tools = true;
        plan.system.install_dependencies = true;
        plan.system.python_packages = ["requests", "rich"].into_iter().collect();
        assert_eq!(compile(&plan).unwrap().text(), compile(&plan).unwrap().text());
    }

    #[test]
    fn test_script_starts_with_shebang_and_ends_with_sync() {
        let script = compile(&base()).unwrap();
        let text = script.text();
        assert!(text.starts_with("#!/bin/bash\n"));
        assert_eq!(text.trim_end().lines().last(), Some(script.sync_command()));
    }
}
