//! The `check_tool` shell helper shared by the tool and firewall sections.

use crate::resolver;
use crate::models::PackageManager;

/// `version_lt a b` succeeds when dotted version `a` is older than `b`,
/// comparing numeric components left to right.
const VERSION_LT: &str = r#"version_lt() {
    local IFS=.
    local -a have=($1)
    local -a want=($2)
    local i
    for i in "${!want[@]}"; do
        if (( 10#${have[i]:-0} < 10#${want[i]:-0} )); then
            return 0
        fi
        if (( 10#${have[i]:-0} > 10#${want[i]:-0} )); then
            return 1
        fi
    done
    return 1
}"#;

const TOOL_VERSION: &str = r#"tool_version() {
    case "$1" in
        git) git --version 2>&1 | grep -oE '[0-9]+(\.[0-9]+)+' | head -n 1 ;;
        gh) gh --version 2>&1 | grep -oE '[0-9]+(\.[0-9]+)+' | head -n 1 ;;
        ssh) ssh -V 2>&1 | grep -oE '[0-9]+(\.[0-9]+)+' | head -n 1 ;;
        *) "$1" --version 2>&1 | grep -oE '[0-9]+(\.[0-9]+)+' | head -n 1 ;;
    esac
}"#;

const CHECK_TOOL: &str = r#"check_tool() {
    local cmd="$1"
    local pkg="$2"
    local min_version="${3:-}"
    local current
    if ! command -v "$cmd" >/dev/null 2>&1; then
        echo "[repull] $cmd not found, installing $pkg"
        {{install}} "$pkg"
        return 0
    fi
    if [ -z "$min_version" ]; then
        echo "[repull] $cmd is installed"
        return 0
    fi
    current="$(tool_version "$cmd")"
    if version_lt "$current" "$min_version"; then
        echo "[repull] warning: $cmd $current is older than $min_version, upgrading $pkg" >&2
        {{install}} "$pkg"
    else
        echo "[repull] $cmd $current satisfies >= $min_version"
    fi
}"#;

/// Render the helper block for the given package manager.
pub fn render(pm: PackageManager) -> String {
    let check_tool = CHECK_TOOL.replace("{{install}}", resolver::install_command(pm));
    format!(
        "# --- Tool check helper ---\n{}\n\n{}\n\n{}",
        VERSION_LT, TOOL_VERSION, check_tool
    )
}

/// One `check_tool` invocation line.
pub fn call(cmd: &str, pkg: &str, min_version: Option<&str>) -> String {
    match min_version {
        Some(v) => format!("check_tool {} {} {}", cmd, pkg, v),
        None => format!("check_tool {} {}", cmd, pkg),
    }
}
