//! The virtual machine instance specification.
//!
//! This is the target the merger defaults. It is a tree of optional blocks
//! grouped into domains (CPU, memory, devices, features, firmware, machine,
//! clock). An unset field is always representable: blocks are `Option`s,
//! flags are `Option<bool>`, enumerations and free-form strings are
//! `Option`s, and lists are empty when unset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Quantity;

#[cfg(test)]
#[path = "domain_tests.rs"]
mod tests;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Runtime specification of a virtual machine instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineInstanceSpec {
    pub domain: DomainSpec,
}

/// The guest domain: everything the hypervisor needs to realise the guest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainSpec {
    #[serde(skip_serializing_if = "ResourceRequirements::is_empty")]
    pub resources: ResourceRequirements,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Cpu>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<Memory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<Machine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware: Option<Firmware>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<Clock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,

    pub devices: Devices,

    #[serde(rename = "ioThreadsPolicy", skip_serializing_if = "Option::is_none")]
    pub io_threads_policy: Option<IoThreadsPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_security: Option<LaunchSecurity>,
}

/// Compute resource requests and limits, keyed by resource name (`cpu`, `memory`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, Quantity>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, Quantity>,
}

impl ResourceRequirements {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.limits.is_empty()
    }
}

// ================================================================================================
// CPU and memory
// ================================================================================================

/// Guest CPU topology and placement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cpu {
    pub cores: u32,
    pub sockets: u32,
    pub threads: u32,

    /// CPU model, e.g. `host-passthrough`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(rename = "dedicatedCpuPlacement", skip_serializing_if = "is_false")]
    pub dedicated_cpu_placement: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub isolate_emulator_thread: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numa: Option<Numa>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime: Option<Realtime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Numa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_mapping_passthrough: Option<NumaGuestMappingPassthrough>,
}

/// Marker enabling passthrough of the host NUMA topology.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumaGuestMappingPassthrough {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Realtime {
    /// vCPU mask in libvirt syntax, e.g. `0-3,^1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

/// Guest memory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Memory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hugepages: Option<Hugepages>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hugepages {
    pub page_size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoThreadsPolicy {
    Shared,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchSecurity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sev: Option<Sev>,
}

/// AMD Secure Encrypted Virtualization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sev {}

// ================================================================================================
// Devices
// ================================================================================================

/// Devices attached to the guest.
///
/// The `autoattach_*`, queueing and transitional flags are tri-state:
/// `None` means the user expressed no choice, `Some(false)` is an explicit
/// opt-out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Devices {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<Disk>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Input>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gpus: Vec<Gpu>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_devices: Vec<HostDevice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundDevice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng: Option<Rng>,

    #[serde(rename = "tpm", skip_serializing_if = "Option::is_none")]
    pub tpm: Option<TpmDevice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoattach_graphics_device: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoattach_mem_balloon: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoattach_pod_interface: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoattach_serial_console: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_virtio_transitional: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_hotplug: Option<bool>,

    #[serde(rename = "networkInterfaceMultiqueue", skip_serializing_if = "Option::is_none")]
    pub network_interface_multi_queue: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_multi_queue: Option<bool>,
}

/// A disk attached to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Disk {
    pub name: String,

    #[serde(flatten)]
    pub device: DiskDevice,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<DiskCache>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub io: Option<DiskIo>,

    #[serde(rename = "dedicatedIOThread", skip_serializing_if = "Option::is_none")]
    pub dedicated_io_thread: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<BlockSize>,
}

/// The device type discriminator of a disk. At most one target is expected
/// to be set; a disk with none is treated as a plain disk target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskTarget>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lun: Option<LunTarget>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdrom: Option<CdromTarget>,
}

impl DiskDevice {
    /// True when no target type has been chosen.
    pub fn is_unset(&self) -> bool {
        self.disk.is_none() && self.lun.is_none() && self.cdrom.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<DiskBus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LunTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<DiskBus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CdromTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<DiskBus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskBus {
    Virtio,
    Sata,
    Scsi,
    Usb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskCache {
    None,
    WriteThrough,
    WriteBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskIo {
    Native,
    Threads,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSize {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomBlockSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_volume: Option<FeatureState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomBlockSize {
    pub logical: u32,
    pub physical: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interface {
    pub name: String,

    /// NIC model, e.g. `virtio` or `e1000`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gpu {
    pub name: String,
    pub device_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostDevice {
    pub name: String,
    pub device_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundDevice {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Virtio random number generator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rng {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TpmDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
}

// ================================================================================================
// Machine, firmware and clock
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Machine {
    /// Emulated machine type, e.g. `q35`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Firmware {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootloader: Option<Bootloader>,
}

/// Exactly one of `bios` or `efi` is expected to be set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bootloader {
    #[serde(rename = "bios", skip_serializing_if = "Option::is_none")]
    pub bios: Option<Bios>,

    #[serde(rename = "efi", skip_serializing_if = "Option::is_none")]
    pub efi: Option<Efi>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_serial: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Efi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_boot: Option<bool>,
}

/// Guest clock. The offset is inlined into the clock object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Clock {
    #[serde(flatten)]
    pub offset: ClockOffset,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<Timer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockOffset {
    #[serde(rename = "utc", skip_serializing_if = "Option::is_none")]
    pub utc: Option<ClockOffsetUtc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ClockOffset {
    pub fn is_empty(&self) -> bool {
        self.utc.is_none() && self.timezone.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockOffsetUtc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_seconds: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hpet: Option<HpetTimer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kvm: Option<KvmTimer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperv: Option<HypervTimer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HpetTimer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_policy: Option<String>,

    #[serde(rename = "present", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KvmTimer {
    #[serde(rename = "present", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HypervTimer {
    #[serde(rename = "present", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// ================================================================================================
// Features
// ================================================================================================

/// Hypervisor features exposed to the guest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Features {
    #[serde(rename = "acpi", skip_serializing_if = "Option::is_none")]
    pub acpi: Option<FeatureState>,

    #[serde(rename = "apic", skip_serializing_if = "Option::is_none")]
    pub apic: Option<FeatureApic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperv: Option<FeatureHyperv>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub smm: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kvm: Option<FeatureKvm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pvspinlock: Option<FeatureState>,

    #[serde(rename = "ioapic", skip_serializing_if = "Option::is_none")]
    pub ioapic: Option<FeatureIoapic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic: Option<FeatureState>,
}

/// On/off state of a feature. `enabled: None` means "enabled with hypervisor defaults".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl FeatureState {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureApic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "is_false")]
    pub end_of_interrupt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureKvm {
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureIoapic {
    /// Interrupt controller driver, `kvm` or `qemu`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

/// Hyper-V enlightenments. Each sub-feature is defaulted independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureHyperv {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaxed: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vapic: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinlocks: Option<FeatureSpinlocks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpindex: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synic: Option<FeatureState>,

    #[serde(rename = "synictimer", skip_serializing_if = "Option::is_none")]
    pub synic_timer: Option<SyNicTimer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<FeatureState>,

    #[serde(rename = "vendorid", skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<FeatureVendorId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reenlightenment: Option<FeatureState>,

    #[serde(rename = "tlbflush", skip_serializing_if = "Option::is_none")]
    pub tlb_flush: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipi: Option<FeatureState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub evmcs: Option<FeatureState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureSpinlocks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(rename = "spinlocks", skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyNicTimer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<FeatureState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureVendorId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(rename = "vendorid")]
    pub vendor_id: String,
}
