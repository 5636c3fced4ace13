//! Shared fixtures for unit tests.

use flavor_api::{
    CpuFlavor, CpuPreferences, Matcher, ObjectMeta, PreferredCpuTopology, ResourceKind,
    TemplateObject, VirtualMachine, VirtualMachineFlavorSpec, VirtualMachinePreferenceSpec,
    FLAVOR_API_VERSION,
};

use crate::InMemoryStore;

pub(crate) const NAMESPACE: &str = "default";
pub(crate) const VM_NAME: &str = "testvm";

pub(crate) fn flavor_spec(guest: u32) -> VirtualMachineFlavorSpec {
    VirtualMachineFlavorSpec {
        cpu: CpuFlavor {
            guest,
            model: Some("host-passthrough".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(crate) fn preference_spec() -> VirtualMachinePreferenceSpec {
    VirtualMachinePreferenceSpec {
        cpu: Some(CpuPreferences {
            preferred_cpu_topology: Some(PreferredCpuTopology::PreferCores),
        }),
        ..Default::default()
    }
}

pub(crate) fn template<S>(
    resource: ResourceKind,
    name: &str,
    uid: &str,
    generation: i64,
    spec: S,
) -> TemplateObject<S> {
    let mut metadata = if resource.is_namespaced() {
        ObjectMeta::namespaced(NAMESPACE, name)
    } else {
        ObjectMeta::named(name)
    };
    metadata.uid = Some(uid.to_string());
    metadata.generation = Some(generation);
    TemplateObject {
        api_version: FLAVOR_API_VERSION.to_string(),
        kind: resource.object_kind().to_string(),
        metadata,
        spec,
    }
}

pub(crate) fn vm(flavor: Option<Matcher>, preference: Option<Matcher>) -> VirtualMachine {
    let mut vm = VirtualMachine::new(NAMESPACE, VM_NAME);
    vm.metadata.uid = Some("vm-uid".to_string());
    vm.spec.flavor = flavor;
    vm.spec.preference = preference;
    vm
}

/// A store holding a cluster flavor `small` (guest 2) and a namespaced preference `linux`.
pub(crate) fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .insert_template(
            ResourceKind::VirtualMachineClusterFlavor,
            template(
                ResourceKind::VirtualMachineClusterFlavor,
                "small",
                "flavor-uid",
                1,
                flavor_spec(2),
            ),
        )
        .unwrap();
    store
        .insert_template(
            ResourceKind::VirtualMachinePreference,
            template(
                ResourceKind::VirtualMachinePreference,
                "linux",
                "preference-uid",
                1,
                preference_spec(),
            ),
        )
        .unwrap();
    store
}
