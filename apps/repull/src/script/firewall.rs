//! Firewall configuration section.

use super::helper;
use crate::models::Plan;
use crate::resolver::{self, FirewallFamily};

pub const PLACEHOLDER: &str = "# Firewall configuration skipped (configure_firewall is off).";

pub fn render(plan: &Plan) -> Option<String> {
    if !plan.system.configure_firewall {
        return None;
    }
    let pm = plan.system.package_manager;
    let family = resolver::firewall_family(pm);
    let header = format!("# --- Firewall configuration ({}) ---", family.id());
    let body: Vec<String> = match family {
        FirewallFamily::Ufw => vec![
            helper::call("ufw", "ufw", None),
            "sudo ufw allow ssh".into(),
            "sudo ufw allow 80/tcp".into(),
            "sudo ufw allow 443/tcp".into(),
            "sudo ufw --force enable".into(),
        ],
        FirewallFamily::Firewalld => vec![
            helper::call("firewall-cmd", "firewalld", None),
            "sudo systemctl enable firewalld".into(),
            "sudo systemctl start firewalld".into(),
            "sudo firewall-cmd --permanent --add-service=ssh".into(),
            "sudo firewall-cmd --permanent --add-service=http".into(),
            "sudo firewall-cmd --permanent --add-service=https".into(),
            "sudo firewall-cmd --reload".into(),
        ],
        FirewallFamily::Unsupported => vec![format!(
            "# No automatic firewall support for {}; configure the firewall manually (allow ssh, 80/tcp, 443/tcp).",
            pm.id()
        )],
    };
    let mut lines = vec![header];
    lines.extend(body);
    Some(lines.join("\n"))
}
