//! Typed API objects for virtual machine flavors and preferences.
//!
//! This crate holds the data model shared by the resolver, the revision
//! snapshotter and the merger in `flavor_core`:
//!
//! - [`VirtualMachine`] and its [`Matcher`] references to templates
//! - [`VirtualMachineInstanceSpec`], the runtime specification being defaulted
//! - [`VirtualMachineFlavorSpec`] (sizing) and [`VirtualMachinePreferenceSpec`]
//!   (default values)
//! - [`TemplateObject`], the envelope the object store returns for any template
//! - [`ControllerRevision`], the immutable snapshot of a template
//!
//! All types serialize with the camelCase field names used on the wire and omit
//! unset optional fields, so that two semantically equal specs always produce
//! identical bytes.

pub mod domain;
pub mod flavor;
pub mod meta;
pub mod preference;
pub mod quantity;
pub mod revision;
pub mod template;
pub mod virtual_machine;

pub use domain::*;
pub use flavor::{CpuFlavor, MemoryFlavor, VirtualMachineFlavorSpec};
pub use meta::{ObjectMeta, OwnerReference};
pub use preference::{
    ClockPreferences, CpuPreferences, DevicePreferences, FeaturePreferences, FirmwarePreferences,
    MachinePreferences, PreferredCpuTopology, VirtualMachinePreferenceSpec,
};
pub use quantity::Quantity;
pub use revision::{ControllerRevision, SpecRevision};
pub use template::{
    ResourceKind, TemplateObject, VirtualMachineClusterFlavor, VirtualMachineClusterPreference,
    VirtualMachineFlavor, VirtualMachinePreference,
};
pub use virtual_machine::{
    Matcher, VirtualMachine, VirtualMachineInstanceTemplateSpec, VirtualMachineSpec,
};

/// API version of the `VirtualMachine` resource.
pub const VIRTUAL_MACHINE_API_VERSION: &str = "kubevirt.io/v1";

/// Object kind of the `VirtualMachine` resource.
pub const VIRTUAL_MACHINE_KIND: &str = "VirtualMachine";

/// API version of the flavor and preference template resources.
pub const FLAVOR_API_VERSION: &str = "flavor.kubevirt.io/v1alpha1";

/// API version of the `ControllerRevision` resource.
pub const CONTROLLER_REVISION_API_VERSION: &str = "apps/v1";

/// Object kind of the `ControllerRevision` resource.
pub const CONTROLLER_REVISION_KIND: &str = "ControllerRevision";

/// Namespace used when an object does not name one.
pub const DEFAULT_NAMESPACE: &str = "default";
