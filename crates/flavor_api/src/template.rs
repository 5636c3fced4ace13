//! Template objects and the resource kinds the object store serves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ObjectMeta, VirtualMachineFlavorSpec, VirtualMachinePreferenceSpec};

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

/// Envelope shared by all four template resources.
///
/// The object store hands out templates with an untyped spec
/// (`TemplateObject<serde_json::Value>`); the resolver decodes the spec into
/// the domain type it expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateObject<S> {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    pub spec: S,
}

pub type VirtualMachineFlavor = TemplateObject<VirtualMachineFlavorSpec>;
pub type VirtualMachineClusterFlavor = TemplateObject<VirtualMachineFlavorSpec>;
pub type VirtualMachinePreference = TemplateObject<VirtualMachinePreferenceSpec>;
pub type VirtualMachineClusterPreference = TemplateObject<VirtualMachinePreferenceSpec>;

/// Resources the flavor machinery reads from or writes to the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    VirtualMachine,
    VirtualMachineFlavor,
    VirtualMachineClusterFlavor,
    VirtualMachinePreference,
    VirtualMachineClusterPreference,
    ControllerRevision,
}

impl ResourceKind {
    /// The object `kind` carried in the object's type metadata.
    pub fn object_kind(self) -> &'static str {
        match self {
            ResourceKind::VirtualMachine => "VirtualMachine",
            ResourceKind::VirtualMachineFlavor => "VirtualMachineFlavor",
            ResourceKind::VirtualMachineClusterFlavor => "VirtualMachineClusterFlavor",
            ResourceKind::VirtualMachinePreference => "VirtualMachinePreference",
            ResourceKind::VirtualMachineClusterPreference => "VirtualMachineClusterPreference",
            ResourceKind::ControllerRevision => "ControllerRevision",
        }
    }

    /// The plural resource name used in store paths and error messages.
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::VirtualMachine => "virtualmachines",
            ResourceKind::VirtualMachineFlavor => "virtualmachineflavors",
            ResourceKind::VirtualMachineClusterFlavor => "virtualmachineclusterflavors",
            ResourceKind::VirtualMachinePreference => "virtualmachinepreferences",
            ResourceKind::VirtualMachineClusterPreference => "virtualmachineclusterpreferences",
            ResourceKind::ControllerRevision => "controllerrevisions",
        }
    }

    /// Whether objects of this kind live in a namespace.
    pub fn is_namespaced(self) -> bool {
        !matches!(
            self,
            ResourceKind::VirtualMachineClusterFlavor
                | ResourceKind::VirtualMachineClusterPreference
        )
    }

    /// Look up a resource by the object `kind` in its type metadata.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flavor_api::ResourceKind;
    ///
    /// assert_eq!(
    ///     ResourceKind::from_object_kind("VirtualMachineClusterFlavor"),
    ///     Some(ResourceKind::VirtualMachineClusterFlavor)
    /// );
    /// assert_eq!(ResourceKind::from_object_kind("Pod"), None);
    /// ```
    pub fn from_object_kind(kind: &str) -> Option<Self> {
        [
            ResourceKind::VirtualMachine,
            ResourceKind::VirtualMachineFlavor,
            ResourceKind::VirtualMachineClusterFlavor,
            ResourceKind::VirtualMachinePreference,
            ResourceKind::VirtualMachineClusterPreference,
            ResourceKind::ControllerRevision,
        ]
        .into_iter()
        .find(|resource| resource.object_kind() == kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}
