use super::*;
use crate::commands::test_support::{cluster_flavor_json, preference_json, write_json};
use flavor_api::{ObjectMeta, VirtualMachine};
use flavor_core::ObjectStore;
use serde_json::json;
use tempfile::TempDir;

/// Verify templates are stored under the resource their kind names.
#[tokio::test]
async fn test_load_store_routes_templates_by_kind() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));
    let preference = write_json(&dir, "preference.json", &preference_json());

    let store = load_store(&[flavor, preference], &[]).unwrap();

    let flavor = store
        .get_template(ResourceKind::VirtualMachineClusterFlavor, None, "small")
        .await
        .unwrap();
    let preference = store
        .get_template(ResourceKind::VirtualMachinePreference, Some("default"), "linux")
        .await
        .unwrap();
    assert_eq!(flavor.spec["cpu"]["guest"], 2);
    assert_eq!(preference.metadata.generation, Some(3));
}

/// Verify a file whose kind is not a template kind is rejected.
#[test]
fn test_load_store_rejects_non_template_kind() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_json(
        &dir,
        "vm.json",
        &json!({ "kind": "VirtualMachine", "metadata": { "name": "testvm" }, "spec": {} }),
    );

    let error = load_store(&[path], &[]).unwrap_err();

    assert!(matches!(error, Error::InvalidArguments(_)));
}

/// Verify revision files are seeded as-is.
#[test]
fn test_load_store_seeds_revisions() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let revision = ControllerRevision::new(
        ObjectMeta::namespaced("default", "testvm-small-flavor-uid-1"),
        b"{}".to_vec(),
    );
    let path = write_json(&dir, "revision.json", &serde_json::to_value(&revision).unwrap());

    let store = load_store(&[], &[path]).unwrap();

    let stored = store.revision("default", "testvm-small-flavor-uid-1").unwrap();
    assert_eq!(stored.data, b"{}".to_vec());
}

/// Verify malformed JSON names the offending file.
#[test]
fn test_read_json_reports_parse_errors() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let error = read_json::<VirtualMachine>(&path).unwrap_err();

    match error {
        Error::ParseJsonFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected ParseJsonFile, got {other:?}"),
    }
}

/// Verify rendering produces indented JSON.
#[test]
fn test_render_pretty_prints() {
    let rendered = render(&json!({ "a": 1 })).unwrap();
    assert_eq!(rendered, "{\n  \"a\": 1\n}");
}

/// Verify a template without uid or generation is rejected.
#[test]
fn test_load_store_requires_template_identity() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut without_uid = cluster_flavor_json(2);
    without_uid["metadata"] = json!({ "name": "small", "generation": 1 });
    let mut without_generation = cluster_flavor_json(2);
    without_generation["metadata"] = json!({ "name": "small", "uid": "flavor-uid" });
    let without_uid = write_json(&dir, "no-uid.json", &without_uid);
    let without_generation = write_json(&dir, "no-generation.json", &without_generation);

    for path in [without_uid, without_generation] {
        match load_store(&[path.clone()], &[]).unwrap_err() {
            Error::InvalidArguments(message) => {
                assert!(message.contains("metadata.uid and metadata.generation"));
                assert!(message.contains(path.file_name().unwrap().to_str().unwrap()));
            }
            other => panic!("Expected InvalidArguments, got {other:?}"),
        }
    }
}
