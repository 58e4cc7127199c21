use repull::models::{EndpointConfig, PackageManager, Plan};
use repull::script::{self, SectionKind};
use repull::{config, lint};
use std::fs;

// Integration-style tests using temp dirs

fn full_plan(pm: PackageManager) -> Plan {
    let mut plan = Plan::new(
        EndpointConfig::git("git@github.com:acme/app.git")
            .with_github_cli(true)
            .with_branch("main"),
        EndpointConfig::local("/var/www/app"),
    );
    plan.system.package_manager = pm;
    plan.system.install_tools = true;
    plan.system.configure_firewall = true;
    plan.system.install_dependencies = true;
    plan.system.python_packages = ["requests", "paramiko", "requests"].into_iter().collect();
    plan.sync.dry_run = true;
    plan
}

#[test]
fn plan_file_compiles_to_expected_invocation() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("repull.toml"),
        r#"
[source]
kind = "ssh"
user = "bob"
host = "h"
path = "/r"
private_key_path = "/k"

[target]
kind = "local"
path = "/tmp/t"
force_sudo = false

[sync]
dry_run = true
"#,
    )
    .unwrap();

    let eff = config::resolve_effective(root.to_str(), None, None, None, None).unwrap();
    let (compiled, report) = repull::compile_and_lint(&eff.plan).unwrap();
    assert_eq!(
        compiled.sync_command(),
        "python3 sync.py --source \"ssh://bob@h:/r?identity_file=/k\" --target \"/tmp/t\" --dry-run"
    );
    assert!(report.is_clean(), "{:?}", report.diagnostics);
}

#[test]
fn every_generated_script_is_lint_clean() {
    for pm in PackageManager::ALL {
        let plan = full_plan(pm);
        let (compiled, report) = repull::compile_and_lint(&plan).unwrap();
        assert!(
            report.is_clean(),
            "{}: {:?}\n{}",
            pm.id(),
            report.diagnostics,
            compiled.text()
        );
        // linting the same text again stays clean
        assert!(lint::lint(&compiled.text()).is_empty());
    }
}

#[test]
fn compile_and_lint_are_deterministic() {
    let plan = full_plan(PackageManager::Zypper);
    let a = repull::compile_and_lint(&plan).unwrap();
    let b = repull::compile_and_lint(&plan).unwrap();
    assert_eq!(a.0.text(), b.0.text());
    assert_eq!(a.1, b.1);
}

#[test]
fn full_plan_sections_follow_package_manager() {
    let compiled = script::compile(&full_plan(PackageManager::Pacman)).unwrap();
    let text = compiled.text();
    assert!(text.contains("sudo pacman -Syu --noconfirm \"$pkg\""));
    assert!(text.contains("check_tool gh gh 2.0.0"));
    assert!(text.contains("check_tool pip3 python-pip"));
    assert!(text.contains("sudo ufw allow 80/tcp"));
    assert!(text.contains("requests\nparamiko\nEOF"));
    assert!(compiled
        .sync_command()
        .ends_with("--use-gh --branch \"main\" --dry-run"));
    assert!(compiled.sync_command().starts_with("sudo "));

    let brew = script::compile(&full_plan(PackageManager::Brew)).unwrap();
    let fw = &brew.section(SectionKind::Firewall).unwrap().body;
    assert!(fw.lines().all(|l| l.starts_with('#')));
}

#[test]
fn written_script_lints_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let compiled = script::compile(&full_plan(PackageManager::Apt)).unwrap();
    fs::write(root.join("setup.sh"), compiled.text()).unwrap();
    fs::write(root.join("bad.sh"), "#!/bin/bash\nTARGET = /srv\nrm -rf $TARGET\n").unwrap();

    let files = lint::expand_targets(&[format!("{}/*.sh", root.display())]);
    assert_eq!(files.len(), 2);
    let (reports, failures) = lint::lint_files(&files);
    assert!(failures.is_empty());
    let bad = reports
        .iter()
        .find(|r| r.file.as_deref().unwrap().ends_with("bad.sh"))
        .unwrap();
    assert_eq!(bad.summary.errors, 1);
    assert_eq!(bad.summary.warnings, 1);
    assert_eq!(bad.diagnostics[0].line, 2);
    let good = reports
        .iter()
        .find(|r| r.file.as_deref().unwrap().ends_with("setup.sh"))
        .unwrap();
    assert!(good.is_clean());
}

#[test]
fn invalid_plan_file_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("repull.yml"),
        r#"
source:
  kind: ssh
  path: relative
target:
  kind: git
  path: git@github.com/user/repo
"#,
    )
    .unwrap();
    let eff = config::resolve_effective(root.to_str(), None, None, None, None).unwrap();
    let errors = eff.plan.validate();
    // source: host, user, absolute path; target: scp separator
    assert_eq!(errors.len(), 4);
    assert!(repull::compile_and_lint(&eff.plan).is_err());
}

#[test]
fn package_names_cannot_escape_requirements_heredoc() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("repull.toml"),
        r#"
[source]
kind = "local"
path = "/home/u/src"

[target]
kind = "local"
path = "/home/u/dst"

[system]
install_dependencies = true
python_packages = ["requests\nEOF\necho INJECTED"]
"#,
    )
    .unwrap();
    let eff = config::resolve_effective(root.to_str(), None, None, None, None).unwrap();
    let err = repull::compile_and_lint(&eff.plan).unwrap_err();
    assert!(err.to_string().contains("must not contain whitespace"));

    // a package literally named EOF gets a different delimiter
    let mut plan = eff.plan.clone();
    plan.system.python_packages = ["EOF", "requests"].into_iter().collect();
    let (compiled, report) = repull::compile_and_lint(&plan).unwrap();
    assert!(compiled.text().contains("<<'EOF_1'\nEOF\nrequests\nEOF_1\n"));
    assert!(report.is_clean(), "{:?}", report.diagnostics);
}
