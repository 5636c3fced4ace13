use super::*;
use crate::commands::test_support::{cluster_flavor_json, preference_json, vm_json, write_json};
use serde_json::json;
use tempfile::TempDir;

/// Verify both matchers are pinned to deterministically named revisions.
#[tokio::test]
async fn test_execute_pins_both_matchers() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(
        &dir,
        "vm.json",
        &vm_json(
            Some(json!({ "name": "small" })),
            Some(json!({ "name": "linux", "kind": "VirtualMachinePreference" })),
        ),
    );
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));
    let preference = write_json(&dir, "preference.json", &preference_json());

    let output = execute(&PinArgs {
        vm,
        templates: vec![flavor, preference],
        revisions: vec![],
    })
    .await
    .unwrap();

    let spec = &output.virtual_machine.spec;
    assert_eq!(
        spec.flavor.as_ref().unwrap().pinned_revision(),
        Some("testvm-small-flavor-uid-1")
    );
    assert_eq!(
        spec.preference.as_ref().unwrap().pinned_revision(),
        Some("testvm-linux-preference-uid-3")
    );
    assert_eq!(output.revisions.len(), 2);
    assert!(output
        .revisions
        .iter()
        .all(|revision| revision.metadata.namespace.as_deref() == Some("default")));
}

/// Verify an already pinned workload creates no revisions.
#[tokio::test]
async fn test_execute_already_pinned() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(
        &dir,
        "vm.json",
        &vm_json(
            Some(json!({ "name": "small", "revisionName": "testvm-small-flavor-uid-1" })),
            None,
        ),
    );

    let output = execute(&PinArgs {
        vm,
        templates: vec![],
        revisions: vec![],
    })
    .await
    .unwrap();

    assert!(output.revisions.is_empty());
}

/// Verify an unknown kind fails before anything is written.
#[tokio::test]
async fn test_execute_invalid_kind() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(
        &dir,
        "vm.json",
        &vm_json(Some(json!({ "name": "small", "kind": "foo" })), None),
    );
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));

    let error = execute(&PinArgs {
        vm,
        templates: vec![flavor],
        revisions: vec![],
    })
    .await
    .unwrap_err();

    assert_eq!(error.to_string(), "got unexpected kind in FlavorMatcher: foo");
}

/// Verify the output serializes with camelCase keys.
#[tokio::test]
async fn test_output_serialization() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(&dir, "vm.json", &vm_json(None, None));

    let output = execute(&PinArgs {
        vm,
        templates: vec![],
        revisions: vec![],
    })
    .await
    .unwrap();
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["virtualMachine"]["metadata"]["name"], "testvm");
    assert_eq!(value["revisions"], json!([]));
}

/// Verify pinning the same files twice yields the same revision name, and a
/// template without a uid is refused.
#[tokio::test]
async fn test_execute_revision_names_are_reproducible() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(&dir, "vm.json", &vm_json(Some(json!({ "name": "small" })), None));
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));
    let args = PinArgs {
        vm: vm.clone(),
        templates: vec![flavor],
        revisions: vec![],
    };

    let first = execute(&args).await.unwrap();
    let second = execute(&args).await.unwrap();
    assert_eq!(
        first.revisions[0].metadata.name,
        second.revisions[0].metadata.name
    );

    let mut anonymous = cluster_flavor_json(2);
    anonymous["metadata"] = json!({ "name": "small", "generation": 1 });
    let anonymous = write_json(&dir, "anonymous.json", &anonymous);
    let error = execute(&PinArgs {
        vm,
        templates: vec![anonymous],
        revisions: vec![],
    })
    .await
    .unwrap_err();

    assert!(matches!(error, Error::InvalidArguments(_)));
}
