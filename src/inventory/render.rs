//! Canonical rendering of a host + ping-service definition pair

use chrono::Utc;

use crate::inventory::types::{HostDefinition, ServiceDefinition};

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("    {:<24}{}\n", key, value));
}

/// Render the two-block file content for a host and its paired ping
/// service. The output round-trips through block extraction and body
/// parsing back to the same attribute values.
pub fn render_host_pair(host: &HostDefinition, service: &ServiceDefinition) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Managed by hostpanel - {}\n",
        Utc::now().format("%Y-%m-%d %H:%M")
    ));

    out.push_str("define host {\n");
    push_attr(&mut out, "use", &host.template);
    push_attr(&mut out, "host_name", &host.host_name);
    push_attr(&mut out, "alias", &host.alias);
    push_attr(&mut out, "address", &host.address);
    if let Some(parents) = &host.parents {
        push_attr(&mut out, "parents", parents);
    }
    for (key, value) in &host.extra {
        push_attr(&mut out, key, value);
    }
    out.push_str("}\n\n");

    out.push_str("define service {\n");
    push_attr(&mut out, "use", &service.template);
    push_attr(&mut out, "host_name", &service.host_name);
    push_attr(&mut out, "service_description", &service.service_description);
    push_attr(&mut out, "check_command", &service.check_command);
    out.push_str("}\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::{CheckLevel, HostClass};
    use crate::objects::{define_blocks, parse_define_body};
    use std::collections::BTreeMap;

    #[test]
    fn rendered_pair_round_trips() {
        let host = HostDefinition {
            host_name: "web1".to_string(),
            alias: "Front web server".to_string(),
            address: "10.0.0.5".to_string(),
            template: "icmp-host-internal".to_string(),
            parents: Some("core-sw".to_string()),
            extra: BTreeMap::new(),
            source_file: "web1.cfg".to_string(),
            class: HostClass::Internal,
        };
        let service = ServiceDefinition::ping_for("web1", CheckLevel::Strict);
        let rendered = render_host_pair(&host, &service);

        let bodies: Vec<&str> = define_blocks(&rendered, "host").collect();
        assert_eq!(bodies.len(), 1);
        let attrs = parse_define_body(bodies[0]);
        assert_eq!(attrs.get("host_name").map(String::as_str), Some("web1"));
        assert_eq!(attrs.get("alias").map(String::as_str), Some("Front web server"));
        assert_eq!(attrs.get("address").map(String::as_str), Some("10.0.0.5"));
        assert_eq!(attrs.get("use").map(String::as_str), Some("icmp-host-internal"));
        assert_eq!(attrs.get("parents").map(String::as_str), Some("core-sw"));

        let svc_bodies: Vec<&str> = define_blocks(&rendered, "service").collect();
        assert_eq!(svc_bodies.len(), 1);
        let svc = parse_define_body(svc_bodies[0]);
        assert_eq!(svc.get("check_command").map(String::as_str), Some("check_ping_strict"));
        assert_eq!(svc.get("host_name").map(String::as_str), Some("web1"));
    }
}
