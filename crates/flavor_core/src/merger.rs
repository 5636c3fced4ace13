//! Conflict-aware defaulting of a virtual machine instance spec.
//!
//! Two layers are applied in order onto the instance spec:
//!
//! 1. **Sizing** from a flavor: CPU topology, guest memory, IO thread
//!    policy, launch security, GPUs and host devices.
//! 2. **Defaults** from a preference: device, feature and firmware defaults,
//!    machine type and clock.
//!
//! A value the caller already set is never overwritten. For sizing, and for
//! machine type and clock, a pre-set value is reported as a conflict at its
//! field path. Device, feature and firmware defaults only fill fields that are
//! unset and never conflict.
//!
//! # Examples
//!
//! ```rust
//! use flavor_api::{CpuFlavor, VirtualMachineFlavorSpec, VirtualMachineInstanceSpec};
//! use flavor_core::{FieldPath, SpecMerger};
//!
//! let flavor = VirtualMachineFlavorSpec {
//!     cpu: CpuFlavor { guest: 2, ..Default::default() },
//!     ..Default::default()
//! };
//! let mut vmi = VirtualMachineInstanceSpec::default();
//!
//! let conflicts = SpecMerger::new().apply(&FieldPath::default(), Some(&flavor), None, &mut vmi);
//!
//! assert!(conflicts.is_empty());
//! assert_eq!(vmi.domain.cpu.unwrap().sockets, 2);
//! ```

use flavor_api::{
    Cpu, DomainSpec, Memory, PreferredCpuTopology, VirtualMachineFlavorSpec,
    VirtualMachineInstanceSpec, VirtualMachinePreferenceSpec,
};
use tracing::{debug, warn};

use crate::{preferences::apply_preferences, Conflicts, FieldPath};

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;

/// Applies flavors and preferences to instance specs.
///
/// Stateless: every call depends only on its arguments.
#[derive(Debug, Clone, Default)]
pub struct SpecMerger {}

impl SpecMerger {
    pub fn new() -> Self {
        Self {}
    }

    /// Apply `flavor` and then `preference` to `vmi`.
    ///
    /// Either layer may be absent, in which case it is skipped. `base_path`
    /// prefixes every reported conflict; for a virtual machine's template it
    /// is `spec.template.spec`.
    ///
    /// Always succeeds. Returns every field path that was left untouched
    /// because the caller had already set it.
    pub fn apply(
        &self,
        base_path: &FieldPath,
        flavor: Option<&VirtualMachineFlavorSpec>,
        preference: Option<&VirtualMachinePreferenceSpec>,
        vmi: &mut VirtualMachineInstanceSpec,
    ) -> Conflicts {
        let mut conflicts = Conflicts::new();

        if let Some(flavor) = flavor {
            conflicts.extend(self.apply_flavor(base_path, flavor, preference, vmi));
        }
        if let Some(preference) = preference {
            conflicts.extend(apply_preferences(base_path, preference, vmi));
        }

        if conflicts.is_empty() {
            debug!(
                flavor = flavor.is_some(),
                preference = preference.is_some(),
                "Applied templates without conflicts"
            );
        } else {
            warn!(conflicts = %conflicts, "Left pre-set fields untouched");
        }
        conflicts
    }

    fn apply_flavor(
        &self,
        base_path: &FieldPath,
        flavor: &VirtualMachineFlavorSpec,
        preference: Option<&VirtualMachinePreferenceSpec>,
        vmi: &mut VirtualMachineInstanceSpec,
    ) -> Conflicts {
        let domain_path = base_path.child("domain");
        let domain = &mut vmi.domain;
        let mut conflicts = Conflicts::new();

        conflicts.extend(apply_cpu(&domain_path, flavor, preference, domain));
        conflicts.extend(apply_memory(&domain_path, flavor, domain));
        conflicts.extend(apply_io_threads_policy(&domain_path, flavor, domain));
        conflicts.extend(apply_launch_security(&domain_path, flavor, domain));
        conflicts.extend(apply_gpus(&domain_path, flavor, domain));
        conflicts.extend(apply_host_devices(&domain_path, flavor, domain));

        conflicts
    }
}

/// Conflicts for a resource that may be set on the CPU/memory block or as a request or limit.
fn resource_conflicts(
    domain_path: &FieldPath,
    domain: &DomainSpec,
    block: &str,
    block_is_set: bool,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let resources = domain_path.child("resources");

    if block_is_set {
        conflicts.push(domain_path.child(block));
    }
    if domain.resources.requests.contains_key(block) {
        conflicts.push(resources.child("requests").child(block));
    }
    if domain.resources.limits.contains_key(block) {
        conflicts.push(resources.child("limits").child(block));
    }
    conflicts
}

fn apply_cpu(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    preference: Option<&VirtualMachinePreferenceSpec>,
    domain: &mut DomainSpec,
) -> Conflicts {
    let conflicts = resource_conflicts(domain_path, domain, "cpu", domain.cpu.is_some());
    if !conflicts.is_empty() {
        return conflicts;
    }

    let guest = flavor.cpu.guest;
    let mut cpu = Cpu {
        sockets: 1,
        cores: 1,
        threads: 1,
        model: flavor.cpu.model.clone(),
        dedicated_cpu_placement: flavor.cpu.dedicated_cpu_placement,
        isolate_emulator_thread: flavor.cpu.isolate_emulator_thread,
        numa: flavor.cpu.numa.clone(),
        realtime: flavor.cpu.realtime.clone(),
    };
    match preferred_topology(preference) {
        PreferredCpuTopology::PreferSockets => cpu.sockets = guest,
        PreferredCpuTopology::PreferCores => cpu.cores = guest,
        PreferredCpuTopology::PreferThreads => cpu.threads = guest,
    }
    domain.cpu = Some(cpu);
    conflicts
}

fn preferred_topology(preference: Option<&VirtualMachinePreferenceSpec>) -> PreferredCpuTopology {
    preference
        .and_then(|p| p.cpu.as_ref())
        .and_then(|cpu| cpu.preferred_cpu_topology)
        .unwrap_or_default()
}

fn apply_memory(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    domain: &mut DomainSpec,
) -> Conflicts {
    let Some(guest) = flavor.memory.guest.as_ref() else {
        return Conflicts::new();
    };

    let conflicts = resource_conflicts(domain_path, domain, "memory", domain.memory.is_some());
    if !conflicts.is_empty() {
        return conflicts;
    }

    domain.memory = Some(Memory {
        guest: Some(guest.clone()),
        hugepages: flavor.memory.hugepages.clone(),
    });
    conflicts
}

fn apply_io_threads_policy(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let Some(policy) = flavor.io_threads_policy else {
        return conflicts;
    };

    if domain.io_threads_policy.is_some() {
        conflicts.push(domain_path.child("ioThreadsPolicy"));
    } else {
        domain.io_threads_policy = Some(policy);
    }
    conflicts
}

fn apply_launch_security(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let Some(launch_security) = flavor.launch_security.as_ref() else {
        return conflicts;
    };

    if domain.launch_security.is_some() {
        conflicts.push(domain_path.child("launchSecurity"));
    } else {
        domain.launch_security = Some(launch_security.clone());
    }
    conflicts
}

// Device lists conflict as a whole; they are never merged per entry.
fn apply_gpus(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    if flavor.gpus.is_empty() {
        return conflicts;
    }

    if !domain.devices.gpus.is_empty() {
        conflicts.push(domain_path.child("devices").child("gpus"));
    } else {
        domain.devices.gpus = flavor.gpus.clone();
    }
    conflicts
}

fn apply_host_devices(
    domain_path: &FieldPath,
    flavor: &VirtualMachineFlavorSpec,
    domain: &mut DomainSpec,
) -> Conflicts {
    let mut conflicts = Conflicts::new();
    if flavor.host_devices.is_empty() {
        return conflicts;
    }

    if !domain.devices.host_devices.is_empty() {
        conflicts.push(domain_path.child("devices").child("hostDevices"));
    } else {
        domain.devices.host_devices = flavor.host_devices.clone();
    }
    conflicts
}
