//! The `VirtualMachine` workload and its template references.

use serde::{Deserialize, Serialize};

use crate::{
    ObjectMeta, OwnerReference, VirtualMachineInstanceSpec, VIRTUAL_MACHINE_API_VERSION,
    VIRTUAL_MACHINE_KIND,
};

#[cfg(test)]
#[path = "virtual_machine_tests.rs"]
mod tests;

/// A virtual machine workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: VirtualMachineSpec,
}

fn default_api_version() -> String {
    VIRTUAL_MACHINE_API_VERSION.to_string()
}

fn default_kind() -> String {
    VIRTUAL_MACHINE_KIND.to_string()
}

impl VirtualMachine {
    /// Create a minimal virtual machine in the given namespace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flavor_api::VirtualMachine;
    ///
    /// let vm = VirtualMachine::new("default", "testvm");
    /// assert_eq!(vm.metadata.name, "testvm");
    /// assert!(vm.spec.flavor.is_none());
    /// ```
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ObjectMeta::namespaced(namespace, name),
            spec: VirtualMachineSpec::default(),
        }
    }

    /// A controller owner reference pointing at this virtual machine.
    pub fn controller_ref(&self) -> OwnerReference {
        OwnerReference {
            api_version: VIRTUAL_MACHINE_API_VERSION.to_string(),
            kind: VIRTUAL_MACHINE_KIND.to_string(),
            name: self.metadata.name.clone(),
            uid: self.metadata.uid_or_empty().to_string(),
            controller: Some(true),
            block_owner_deletion: Some(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineSpec {
    /// Reference to the sizing template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<Matcher>,

    /// Reference to the default value template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<Matcher>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<VirtualMachineInstanceTemplateSpec>,
}

/// Template the virtual machine instance is created from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualMachineInstanceTemplateSpec {
    pub metadata: ObjectMeta,
    pub spec: VirtualMachineInstanceSpec,
}

/// Reference from a workload to a flavor or preference.
///
/// `kind` is kept as the raw string found on the wire; it is validated when
/// the matcher is resolved. An empty kind selects the cluster-scoped template.
/// Once `revision_name` is set the matcher is pinned to that snapshot for
/// good.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Matcher {
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_name: Option<String>,
}

impl Matcher {
    /// Create an unpinned matcher.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            revision_name: None,
        }
    }

    /// The revision this matcher is pinned to, if any. An empty name counts as unpinned.
    pub fn pinned_revision(&self) -> Option<&str> {
        self.revision_name.as_deref().filter(|name| !name.is_empty())
    }
}
