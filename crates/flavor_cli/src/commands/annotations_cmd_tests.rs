use super::*;
use crate::commands::test_support::{vm_json, write_json};
use serde_json::json;
use tempfile::TempDir;

/// Verify a cluster flavor and a namespaced preference give one annotation each.
#[test]
fn test_execute_annotates_both_matchers() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(
        &dir,
        "vm.json",
        &vm_json(
            Some(json!({ "name": "small" })),
            Some(json!({ "name": "linux", "kind": "VirtualMachinePreference" })),
        ),
    );

    let annotations = execute(&AnnotationsArgs { vm }).unwrap();

    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations["kubevirt.io/cluster-flavor-name"], "small");
    assert_eq!(annotations["kubevirt.io/preference-name"], "linux");
}

/// Verify a workload without matchers gets no annotations.
#[test]
fn test_execute_without_matchers() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(&dir, "vm.json", &vm_json(None, None));

    let annotations = execute(&AnnotationsArgs { vm }).unwrap();

    assert!(annotations.is_empty());
}

/// Verify a missing file is reported with its path.
#[test]
fn test_execute_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = dir.path().join("absent.json");

    let error = execute(&AnnotationsArgs { vm }).unwrap_err();

    assert!(matches!(error, Error::LoadFile { .. }));
}
