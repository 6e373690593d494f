//! Integration tests for the transactional add/edit/delete protocol
//!
//! Each test runs against a throwaway inventory directory and a shell
//! script standing in for the external validator.

mod common;

use std::fs;
use tempfile::TempDir;

use common::{fake_validator, marker_less_validator, request, service_for, write_shared_file};
use hostpanel::errors::PanelError;
use hostpanel::inventory::{CheckLevel, HostClass, HostRepository};

// === ADD ===

#[tokio::test]
async fn add_creates_dedicated_file_and_is_listed_once() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let outcome = service.add_host(request("web1", "10.0.0.5")).await.unwrap();
    assert_eq!(outcome.host_name, "web1");
    assert!(outcome.file.ends_with("web1.cfg"));

    let hosts = HostRepository::new(dir.path()).list().await.unwrap();
    let matching: Vec<_> = hosts.iter().filter(|h| h.host_name == "web1").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].address, "10.0.0.5");
    assert_eq!(matching[0].alias, "web1");

    let content = fs::read_to_string(&outcome.file).unwrap();
    assert!(content.contains("define host {"));
    assert!(content.contains("define service {"));
    assert!(content.contains("check_ping_detailed"));
}

#[tokio::test]
async fn add_applies_type_parent_and_check_level() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let mut req = request("branch-gw", "203.0.113.1");
    req.class = HostClass::External;
    req.parent = Some("core-sw".to_string());
    req.check_level = CheckLevel::Strict;
    req.alias = Some("Branch gateway".to_string());
    service.add_host(req).await.unwrap();

    let host = HostRepository::new(dir.path())
        .find("branch-gw")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(host.class, HostClass::External);
    assert_eq!(host.template, "icmp-host-external");
    assert_eq!(host.parents.as_deref(), Some("core-sw"));
    assert_eq!(host.alias, "Branch gateway");

    let content = fs::read_to_string(dir.path().join("branch-gw.cfg")).unwrap();
    assert!(content.contains("check_ping_strict"));
}

#[tokio::test]
async fn add_sanitizes_requested_name() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let outcome = service.add_host(request("web 1;rm", "10.0.0.5")).await.unwrap();
    assert_eq!(outcome.host_name, "web1rm");
    assert!(dir.path().join("web1rm.cfg").exists());
}

#[tokio::test]
async fn add_rejects_missing_required_fields() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let err = service.add_host(request("", "10.0.0.5")).await.unwrap_err();
    assert!(matches!(err, PanelError::ValidationInput { ref field } if field == "host_name"));

    let err = service.add_host(request("web1", "")).await.unwrap_err();
    assert!(matches!(err, PanelError::ValidationInput { ref field } if field == "address"));
}

#[tokio::test]
async fn add_conflicts_with_host_in_any_file() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    // "gamma" lives inside a shared file, not gamma.cfg
    write_shared_file(dir.path(), "routers.cfg", "gamma", "delta");

    let err = service.add_host(request("gamma", "10.0.0.9")).await.unwrap_err();
    assert!(matches!(err, PanelError::Conflict { ref host_name } if host_name == "gamma"));
    assert!(!dir.path().join("gamma.cfg").exists());
}

#[tokio::test]
async fn add_rolls_back_file_when_validation_fails() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), false);
    let service = service_for(dir.path(), &validator);

    let err = service.add_host(request("web1", "10.0.0.5")).await.unwrap_err();
    match err {
        PanelError::ConfigInvalid { output } => assert!(output.contains("Invalid host definition")),
        other => panic!("expected ConfigInvalid, got {other:?}"),
    }
    assert!(!dir.path().join("web1.cfg").exists());
}

#[tokio::test]
async fn add_appends_when_dedicated_file_holds_another_host() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    // epsilon's blocks happen to live in a file named delta.cfg
    write_shared_file(dir.path(), "delta.cfg", "epsilon", "zeta");

    service.add_host(request("delta", "10.0.0.7")).await.unwrap();

    let hosts = HostRepository::new(dir.path()).list().await.unwrap();
    let names: Vec<&str> = hosts.iter().map(|h| h.host_name.as_str()).collect();
    assert_eq!(names, vec!["delta", "epsilon", "zeta"]);
}

#[tokio::test]
async fn validator_marker_decides_validity_not_exit_status() {
    let dir = TempDir::new().unwrap();
    // Exits zero but never prints the marker: must count as invalid
    let validator = marker_less_validator(dir.path());
    let service = service_for(dir.path(), &validator);

    let err = service.add_host(request("web1", "10.0.0.5")).await.unwrap_err();
    assert!(matches!(err, PanelError::ConfigInvalid { .. }));
    assert!(!dir.path().join("web1.cfg").exists());
}

// === EDIT ===

#[tokio::test]
async fn edit_renames_host_and_moves_file() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    service.add_host(request("alpha", "10.0.0.1")).await.unwrap();
    let outcome = service
        .edit_host("alpha", request("bravo", "10.0.0.2"))
        .await
        .unwrap();
    assert_eq!(outcome.host_name, "bravo");

    assert!(!dir.path().join("alpha.cfg").exists());
    assert!(dir.path().join("bravo.cfg").exists());

    let hosts = HostRepository::new(dir.path()).list().await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].host_name, "bravo");
    assert_eq!(hosts[0].address, "10.0.0.2");
}

#[tokio::test]
async fn edit_unknown_host_is_not_found() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let err = service
        .edit_host("ghost", request("ghost", "10.0.0.1"))
        .await
        .unwrap_err();
    assert!(matches!(err, PanelError::NotFound { ref host_name } if host_name == "ghost"));
}

#[tokio::test]
async fn edit_rename_onto_existing_host_conflicts() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    service.add_host(request("alpha", "10.0.0.1")).await.unwrap();
    service.add_host(request("bravo", "10.0.0.2")).await.unwrap();

    let err = service
        .edit_host("alpha", request("bravo", "10.0.0.3"))
        .await
        .unwrap_err();
    assert!(matches!(err, PanelError::Conflict { ref host_name } if host_name == "bravo"));

    // Nothing was touched
    let hosts = HostRepository::new(dir.path()).list().await.unwrap();
    assert_eq!(hosts.len(), 2);
}

#[tokio::test]
async fn edit_restores_old_blocks_when_validation_fails() {
    let dir = TempDir::new().unwrap();
    let ok = fake_validator(dir.path(), true);
    let bad = fake_validator(dir.path(), false);

    service_for(dir.path(), &ok)
        .add_host(request("alpha", "10.0.0.1"))
        .await
        .unwrap();
    let before = fs::read_to_string(dir.path().join("alpha.cfg")).unwrap();

    let err = service_for(dir.path(), &bad)
        .edit_host("alpha", request("charlie", "10.0.0.3"))
        .await
        .unwrap_err();
    assert!(matches!(err, PanelError::ConfigInvalid { .. }));

    // Full rollback: the original survives, the new identity does not
    let after = fs::read_to_string(dir.path().join("alpha.cfg")).unwrap();
    assert_eq!(before, after);
    assert!(!dir.path().join("charlie.cfg").exists());
}

#[tokio::test]
async fn edit_in_shared_file_leaves_sibling_intact() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    write_shared_file(dir.path(), "pair.cfg", "left", "right");

    service
        .edit_host("left", request("left", "192.0.2.20"))
        .await
        .unwrap();

    // "right" still lives in pair.cfg; "left" moved to its dedicated file
    let repository = HostRepository::new(dir.path());
    let right = repository.find("right").await.unwrap().unwrap();
    assert_eq!(right.source_file, "pair.cfg");
    let left = repository.find("left").await.unwrap().unwrap();
    assert_eq!(left.source_file, "left.cfg");
    assert_eq!(left.address, "192.0.2.20");
}

// === DELETE ===

#[tokio::test]
async fn delete_only_host_removes_file() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    service.add_host(request("web1", "10.0.0.5")).await.unwrap();
    let outcome = service.delete_host("web1").await.unwrap();
    assert!(outcome.valid);
    assert!(!dir.path().join("web1.cfg").exists());
}

#[tokio::test]
async fn delete_from_shared_file_keeps_sibling_parseable() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let path = write_shared_file(dir.path(), "pair.cfg", "pair", "other");

    service.delete_host("pair").await.unwrap();

    assert!(path.exists());
    let hosts = HostRepository::new(dir.path()).list().await.unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].host_name, "other");
    assert_eq!(hosts[0].address, "203.0.113.9");
}

#[tokio::test]
async fn delete_unknown_host_is_not_found() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let err = service.delete_host("ghost").await.unwrap_err();
    assert!(matches!(err, PanelError::NotFound { ref host_name } if host_name == "ghost"));
}

#[tokio::test]
async fn delete_restores_file_when_validation_fails() {
    let dir = TempDir::new().unwrap();
    let ok = fake_validator(dir.path(), true);
    let bad = fake_validator(dir.path(), false);

    service_for(dir.path(), &ok)
        .add_host(request("web1", "10.0.0.5"))
        .await
        .unwrap();
    let before = fs::read_to_string(dir.path().join("web1.cfg")).unwrap();

    let err = service_for(dir.path(), &bad).delete_host("web1").await.unwrap_err();
    assert!(matches!(err, PanelError::ConfigInvalid { .. }));

    let after = fs::read_to_string(dir.path().join("web1.cfg")).unwrap();
    assert_eq!(before, after);
}

// === RELOAD / VALIDATE ===

#[tokio::test]
async fn reload_refuses_invalid_configuration() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), false);
    let service = service_for(dir.path(), &validator);

    let err = service.reload().await.unwrap_err();
    match err {
        PanelError::ConfigInvalid { output } => assert!(output.contains("Invalid host definition")),
        other => panic!("expected ConfigInvalid, got {other:?}"),
    }
}

#[tokio::test]
async fn validate_reports_marker_and_output() {
    let dir = TempDir::new().unwrap();
    let validator = fake_validator(dir.path(), true);
    let service = service_for(dir.path(), &validator);

    let validation = service.validate().await.unwrap();
    assert!(validation.valid);
    assert!(validation.output.contains("Things look okay"));
}
