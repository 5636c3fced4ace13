//! Preference (default value template) specification.
//!
//! A preference carries defaults the workload may or may not have chosen
//! itself: bus types, cache modes, feature toggles, firmware and machine type.
//! Preferred values only fill gaps; they never replace a user choice.

use serde::{Deserialize, Serialize};

use crate::domain::{
    BlockSize, ClockOffset, DiskBus, DiskCache, DiskIo, FeatureApic, FeatureHyperv,
    FeatureIoapic, FeatureKvm, FeatureState, Rng, Timer, TpmDevice,
};

/// Specification of a `VirtualMachinePreference` or `VirtualMachineClusterPreference`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachinePreferenceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockPreferences>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuPreferences>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<DevicePreferences>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturePreferences>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<FirmwarePreferences>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachinePreferences>,
}

/// How the flavor's vCPU count is spread over sockets, cores and threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredCpuTopology {
    #[default]
    PreferSockets,
    PreferCores,
    PreferThreads,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuPreferences {
    #[serde(rename = "preferredCPUTopology", skip_serializing_if = "Option::is_none")]
    pub preferred_cpu_topology: Option<PreferredCpuTopology>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_autoattach_graphics_device: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_autoattach_mem_balloon: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_autoattach_pod_interface: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_autoattach_serial_console: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_disable_hotplug: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_use_virtio_transitional: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_block_multi_queue: Option<bool>,

    #[serde(rename = "preferredNetworkInterfaceMultiQueue", skip_serializing_if = "Option::is_none")]
    pub preferred_network_interface_multi_queue: Option<bool>,

    #[serde(rename = "preferredDiskDedicatedIoThread", skip_serializing_if = "Option::is_none")]
    pub preferred_disk_dedicated_io_thread: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_disk_block_size: Option<BlockSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_disk_cache: Option<DiskCache>,

    #[serde(rename = "preferredDiskIO", skip_serializing_if = "Option::is_none")]
    pub preferred_disk_io: Option<DiskIo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_disk_bus: Option<DiskBus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_cdrom_bus: Option<DiskBus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_lun_bus: Option<DiskBus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_input_bus: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_input_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_interface_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_sound_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_rng: Option<Rng>,

    #[serde(rename = "preferredTPM", skip_serializing_if = "Option::is_none")]
    pub preferred_tpm: Option<TpmDevice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_acpi: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_apic: Option<FeatureApic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_hyperv: Option<FeatureHyperv>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_kvm: Option<FeatureKvm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_pvspinlock: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_smm: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_ioapic: Option<FeatureIoapic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_pic: Option<FeatureState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirmwarePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_use_bios: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_use_bios_serial: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_use_efi: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_use_secure_boot: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachinePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_machine_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_clock_offset: Option<ClockOffset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_timer: Option<Timer>,
}
