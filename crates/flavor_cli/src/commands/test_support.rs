//! JSON fixtures written to temporary files for command tests.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

pub(crate) fn write_json(dir: &TempDir, file_name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(file_name);
    fs::write(&path, value.to_string()).expect("Failed to write fixture");
    path
}

/// Virtual machine `testvm` in namespace `default` with the given matchers.
pub(crate) fn vm_json(flavor: Option<Value>, preference: Option<Value>) -> Value {
    let mut spec = serde_json::Map::new();
    if let Some(flavor) = flavor {
        spec.insert("flavor".to_string(), flavor);
    }
    if let Some(preference) = preference {
        spec.insert("preference".to_string(), preference);
    }
    json!({
        "apiVersion": "kubevirt.io/v1",
        "kind": "VirtualMachine",
        "metadata": { "name": "testvm", "namespace": "default", "uid": "vm-uid" },
        "spec": spec,
    })
}

/// Cluster flavor `small` with `guest` vCPUs.
pub(crate) fn cluster_flavor_json(guest: u32) -> Value {
    json!({
        "apiVersion": "flavor.kubevirt.io/v1alpha1",
        "kind": "VirtualMachineClusterFlavor",
        "metadata": { "name": "small", "uid": "flavor-uid", "generation": 1 },
        "spec": { "cpu": { "guest": guest, "model": "host-passthrough" } },
    })
}

/// Namespaced preference `linux` preferring cores.
pub(crate) fn preference_json() -> Value {
    json!({
        "apiVersion": "flavor.kubevirt.io/v1alpha1",
        "kind": "VirtualMachinePreference",
        "metadata": { "name": "linux", "namespace": "default", "uid": "preference-uid", "generation": 3 },
        "spec": { "cpu": { "preferredCPUTopology": "preferCores" } },
    })
}
