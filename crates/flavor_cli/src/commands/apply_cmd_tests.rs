use super::*;
use crate::commands::pin_cmd::{self, PinArgs};
use crate::commands::test_support::{cluster_flavor_json, preference_json, vm_json, write_json};
use serde_json::json;
use tempfile::TempDir;

fn args(vm: PathBuf, templates: Vec<PathBuf>, revisions: Vec<PathBuf>) -> ApplyArgs {
    ApplyArgs {
        vm,
        templates,
        revisions,
    }
}

fn vm_with_preset_cpu(dir: &TempDir) -> PathBuf {
    let mut vm = vm_json(Some(json!({ "name": "small" })), None);
    vm["spec"]["template"] = json!({
        "spec": { "domain": { "cpu": { "sockets": 1, "cores": 4, "threads": 1 } } }
    });
    write_json(dir, "vm.json", &vm)
}

/// Verify flavor and preference are merged and the instance template is annotated.
#[tokio::test]
async fn test_execute_merges_flavor_and_preference() {
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

    let outcome = execute(&args(vm, vec![flavor, preference], vec![]), &AppConfig::default())
        .await
        .unwrap();

    let template = outcome.virtual_machine.spec.template.unwrap();
    let cpu = template.spec.domain.cpu.unwrap();
    assert!(outcome.conflicts.is_empty());
    assert_eq!((cpu.sockets, cpu.cores, cpu.threads), (1, 2, 1));
    assert_eq!(cpu.model.as_deref(), Some("host-passthrough"));
    assert_eq!(
        template.metadata.annotations["kubevirt.io/cluster-flavor-name"],
        "small"
    );
    assert_eq!(
        template.metadata.annotations["kubevirt.io/preference-name"],
        "linux"
    );
}

/// Verify conflicts fail the command under the reject policy.
#[tokio::test]
async fn test_execute_rejects_conflicts() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = vm_with_preset_cpu(&dir);
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));

    let error = execute(&args(vm, vec![flavor], vec![]), &AppConfig::default())
        .await
        .unwrap_err();

    match error {
        Error::Conflicts(paths) => assert_eq!(paths, "spec.template.spec.domain.cpu"),
        other => panic!("Expected Conflicts, got {other:?}"),
    }
}

/// Verify the warn policy returns the workload with pre-set fields untouched.
#[tokio::test]
async fn test_execute_warns_on_conflicts() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = vm_with_preset_cpu(&dir);
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));
    let config = AppConfig {
        conflict_policy: ConflictPolicy::Warn,
        base_path: "spec".to_string(),
        ..AppConfig::default()
    };

    let outcome = execute(&args(vm, vec![flavor], vec![]), &config)
        .await
        .unwrap();

    let cpu = outcome
        .virtual_machine
        .spec
        .template
        .unwrap()
        .spec
        .domain
        .cpu
        .unwrap();
    assert_eq!(outcome.conflicts.to_string(), "spec.domain.cpu");
    assert_eq!(cpu.cores, 4);
}

/// Verify a missing template surfaces the resolver's not-found error.
#[tokio::test]
async fn test_execute_missing_template() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(&dir, "vm.json", &vm_json(Some(json!({ "name": "small" })), None));

    let error = execute(&args(vm, vec![], vec![]), &AppConfig::default())
        .await
        .unwrap_err();

    match error {
        Error::Flavor(flavor_error) => assert!(flavor_error.is_not_found()),
        other => panic!("Expected Flavor error, got {other:?}"),
    }
}

/// Verify a pinned workload is sized from its revision, not the edited template.
#[tokio::test]
async fn test_execute_uses_pinned_revision() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let vm = write_json(&dir, "vm.json", &vm_json(Some(json!({ "name": "small" })), None));
    let flavor = write_json(&dir, "flavor.json", &cluster_flavor_json(2));

    let pinned = pin_cmd::execute(&PinArgs {
        vm,
        templates: vec![flavor],
        revisions: vec![],
    })
    .await
    .unwrap();
    let pinned_vm = write_json(
        &dir,
        "pinned.json",
        &serde_json::to_value(&pinned.virtual_machine).unwrap(),
    );
    let revision = write_json(
        &dir,
        "revision.json",
        &serde_json::to_value(&pinned.revisions[0]).unwrap(),
    );
    let edited = write_json(&dir, "edited.json", &cluster_flavor_json(16));

    let outcome = execute(
        &args(pinned_vm, vec![edited], vec![revision]),
        &AppConfig::default(),
    )
    .await
    .unwrap();

    let cpu = outcome
        .virtual_machine
        .spec
        .template
        .unwrap()
        .spec
        .domain
        .cpu
        .unwrap();
    assert_eq!(cpu.sockets, 2);
}
