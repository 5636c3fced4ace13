//! Tests for template objects and resource kinds.

use super::*;
use crate::CpuFlavor;

/// Verify only the cluster template kinds are cluster scoped.
#[test]
fn test_is_namespaced() {
    assert!(ResourceKind::VirtualMachine.is_namespaced());
    assert!(ResourceKind::VirtualMachineFlavor.is_namespaced());
    assert!(ResourceKind::VirtualMachinePreference.is_namespaced());
    assert!(ResourceKind::ControllerRevision.is_namespaced());
    assert!(!ResourceKind::VirtualMachineClusterFlavor.is_namespaced());
    assert!(!ResourceKind::VirtualMachineClusterPreference.is_namespaced());
}

/// Verify every resource kind maps back from its object kind.
#[test]
fn test_object_kind_round_trip() {
    for resource in [
        ResourceKind::VirtualMachine,
        ResourceKind::VirtualMachineFlavor,
        ResourceKind::VirtualMachineClusterFlavor,
        ResourceKind::VirtualMachinePreference,
        ResourceKind::VirtualMachineClusterPreference,
        ResourceKind::ControllerRevision,
    ] {
        assert_eq!(
            ResourceKind::from_object_kind(resource.object_kind()),
            Some(resource)
        );
    }
}

/// Verify a typed flavor object parses from its wire form.
#[test]
fn test_flavor_object_deserialization() {
    let json = serde_json::json!({
        "apiVersion": "flavor.kubevirt.io/v1alpha1",
        "kind": "VirtualMachineClusterFlavor",
        "metadata": { "name": "test-cluster-flavor", "uid": "1234", "generation": 1 },
        "spec": { "cpu": { "guest": 2, "model": "host-passthrough" } }
    });

    let flavor: VirtualMachineClusterFlavor =
        serde_json::from_value(json).expect("Failed to parse flavor");

    assert_eq!(flavor.metadata.generation, Some(1));
    assert_eq!(
        flavor.spec.cpu,
        CpuFlavor {
            guest: 2,
            model: Some("host-passthrough".to_string()),
            ..Default::default()
        }
    );
}
