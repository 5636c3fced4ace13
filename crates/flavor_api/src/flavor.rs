//! Flavor (sizing template) specification.
//!
//! A flavor describes how big a virtual machine is: its vCPU count and
//! placement, memory, IO thread policy, launch security and passed-through
//! devices. Every value a flavor carries is mandatory for the workload; a
//! workload that already sets one of them conflicts with the flavor.

use serde::{Deserialize, Serialize};

use crate::domain::{is_false, Gpu, HostDevice, Hugepages, IoThreadsPolicy, LaunchSecurity, Numa, Realtime};
use crate::Quantity;

/// Specification of a `VirtualMachineFlavor` or `VirtualMachineClusterFlavor`.
///
/// # Examples
///
/// ```rust
/// use flavor_api::{CpuFlavor, VirtualMachineFlavorSpec};
///
/// let spec = VirtualMachineFlavorSpec {
///     cpu: CpuFlavor {
///         guest: 2,
///         model: Some("host-passthrough".to_string()),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// assert_eq!(spec.cpu.guest, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineFlavorSpec {
    pub cpu: CpuFlavor,

    #[serde(skip_serializing_if = "MemoryFlavor::is_empty")]
    pub memory: MemoryFlavor,

    #[serde(rename = "gpus", skip_serializing_if = "Vec::is_empty")]
    pub gpus: Vec<Gpu>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_devices: Vec<HostDevice>,

    #[serde(rename = "ioThreadsPolicy", skip_serializing_if = "Option::is_none")]
    pub io_threads_policy: Option<IoThreadsPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_security: Option<LaunchSecurity>,
}

/// CPU sizing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuFlavor {
    /// Number of vCPUs exposed to the guest.
    pub guest: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(rename = "dedicatedCPUPlacement", skip_serializing_if = "is_false")]
    pub dedicated_cpu_placement: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub isolate_emulator_thread: bool,

    #[serde(rename = "numa", skip_serializing_if = "Option::is_none")]
    pub numa: Option<Numa>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime: Option<Realtime>,
}

/// Memory sizing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryFlavor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hugepages: Option<Hugepages>,
}

impl MemoryFlavor {
    pub fn is_empty(&self) -> bool {
        self.guest.is_none() && self.hugepages.is_none()
    }
}
