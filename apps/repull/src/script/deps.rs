//! Python dependency installation section.

use crate::models::{Plan, PythonPackages};

pub const PLACEHOLDER: &str =
    "# Dependency installation skipped (install_dependencies is off); nothing is installed.";

const INSTALL: &str = "pip3 install -r requirements.txt";

pub fn render(plan: &Plan) -> Option<String> {
    if !plan.system.install_dependencies {
        return None;
    }
    let pkgs = &plan.system.python_packages;
    let mut lines = vec!["# --- Python dependencies ---".to_string()];
    if pkgs.is_empty() {
        lines.push("# No packages listed; using the existing requirements.txt.".into());
    } else {
        let delim = heredoc_delimiter(pkgs);
        lines.push(format!("cat > requirements.txt <<'{}'", delim));
        lines.extend(pkgs.iter().map(str::to_string));
        lines.push(delim);
    }
    lines.push(INSTALL.into());
    Some(lines.join("\n"))
}

/// `EOF`, suffixed until no package line equals it.
fn heredoc_delimiter(pkgs: &PythonPackages) -> String {
    let mut delim = "EOF".to_string();
    let mut n = 0;
    while pkgs.iter().any(|p| p == delim) {
        n += 1;
        delim = format!("EOF_{}", n);
    }
    delim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EndpointConfig;

    fn plan(pkgs: &[&str]) -> Plan {
        let mut p = Plan::new(EndpointConfig::local("/tmp/a"), EndpointConfig::local("/tmp/b"));
        p.system.install_dependencies = true;
        p.system.python_packages = pkgs.iter().collect();
        p
    }

    #[test]
    fn test_heredoc_preserves_order() {
        let text = render(&plan(&["requests", "numpy", "requests", "flask"])).unwrap();
        assert_eq!(
            text,
            "# --- Python dependencies ---\n\
             cat > requirements.txt <<'EOF'\n\
             requests\n\
             numpy\n\
             flask\n\
             EOF\n\
             pip3 install -r requirements.txt"
        );
    }

    #[test]
    fn test_empty_list_assumes_existing_file() {
        let text = render(&plan(&[])).unwrap();
        assert!(!text.contains("<<'EOF'"));
        assert!(text.contains("existing requirements.txt"));
        assert!(text.ends_with(INSTALL));
    }

    #[test]
    fn test_delimiter_never_matches_a_package_line() {
        let text = render(&plan(&["EOF", "requests", "EOF_1"])).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "cat > requirements.txt <<'EOF_2'");
        assert_eq!(&lines[2..5], &["EOF", "requests", "EOF_1"]);
        assert_eq!(lines[5], "EOF_2");
        assert_eq!(lines[6], INSTALL);
    }

    #[test]
    fn test_disabled_never_installs() {
        let mut p = plan(&["requests"]);
        p.system.install_dependencies = false;
        assert!(render(&p).is_none());
        assert!(!PLACEHOLDER.contains(INSTALL));
    }
}
