//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use hostpanel::inventory::{CheckLevel, HostClass, HostRepository};
use hostpanel::nagios::{Reloader, Validator};
use hostpanel::services::{HostRequest, HostService};

/// Write an executable stand-in for the external validator. The valid
/// variant prints the pre-flight success marker; the invalid one prints an
/// error and exits non-zero.
pub fn fake_validator(dir: &Path, valid: bool) -> PathBuf {
    let path = dir.join(if valid { "validator-ok.sh" } else { "validator-fail.sh" });
    let script = if valid {
        "#!/bin/sh\necho 'Nagios Core 4.5.1'\necho 'Things look okay - No serious problems were detected during the pre-flight check'\nexit 0\n"
    } else {
        "#!/bin/sh\necho 'Error: Invalid host definition' >&2\nexit 1\n"
    };
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A validator that exits zero but never prints the success marker.
pub fn marker_less_validator(dir: &Path) -> PathBuf {
    let path = dir.join("validator-silent.sh");
    fs::write(&path, "#!/bin/sh\necho 'done'\nexit 0\n").unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

pub fn service_for(hosts_dir: &Path, validator_bin: &Path) -> HostService {
    let repository = Arc::new(HostRepository::new(hosts_dir));
    let validator = Arc::new(Validator::new(
        validator_bin.to_str().unwrap(),
        "/dev/null",
        false,
        Duration::from_secs(5),
    ));
    let reloader = Arc::new(Reloader::new(
        "hostpanel-test-unit",
        false,
        Duration::from_secs(5),
    ));
    HostService::new(repository, validator, reloader)
}

pub fn request(name: &str, address: &str) -> HostRequest {
    HostRequest {
        host_name: name.to_string(),
        address: address.to_string(),
        alias: None,
        class: HostClass::Internal,
        parent: None,
        check_level: CheckLevel::Detailed,
    }
}

/// Hand-written definition file holding two hosts and their ping services.
pub fn write_shared_file(hosts_dir: &Path, filename: &str, first: &str, second: &str) -> PathBuf {
    let content = format!(
        "# shared definitions\n\
         define host {{\n    use                     icmp-host-internal\n    host_name               {first}\n    alias                   {first}\n    address                 10.0.0.1\n}}\n\n\
         define service {{\n    use                     icmp-ping-service\n    host_name               {first}\n    service_description     PING - Latency and Packet Loss\n    check_command           check_ping_detailed\n}}\n\n\
         define host {{\n    use                     icmp-host-external\n    host_name               {second}\n    alias                   {second}\n    address                 203.0.113.9\n}}\n\n\
         define service {{\n    use                     icmp-ping-service\n    host_name               {second}\n    service_description     PING - Latency and Packet Loss\n    check_command           check_ping_quick\n}}\n"
    );
    let path = hosts_dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}
