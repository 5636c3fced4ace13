//! The entry point controllers use.

use flavor_api::{
    VirtualMachine, VirtualMachineFlavorSpec, VirtualMachineInstanceSpec,
    VirtualMachinePreferenceSpec,
};
use std::sync::Arc;

use crate::{
    matcher::{FlavorDomain, PreferenceDomain},
    resolver::find_spec,
    snapshotter, Conflicts, FieldPath, FlavorResult, ObjectStore, SpecMerger,
};

#[cfg(test)]
#[path = "methods_tests.rs"]
mod tests;

/// Resolves, snapshots and applies flavors and preferences over one object store.
///
/// # Examples
///
/// ```rust
/// use flavor_core::{FlavorMethods, InMemoryStore};
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemoryStore::new());
/// let methods = FlavorMethods::new(store.clone());
/// ```
#[derive(Clone)]
pub struct FlavorMethods {
    store: Arc<dyn ObjectStore>,
    merger: SpecMerger,
}

impl FlavorMethods {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            merger: SpecMerger::new(),
        }
    }

    /// Resolve the flavor spec of `vm`. See [`find_spec`](crate::resolver::find_spec).
    ///
    /// # Errors
    ///
    /// `InvalidKind`, `NotFound` or `Decode`.
    pub async fn find_flavor_spec(
        &self,
        vm: &VirtualMachine,
    ) -> FlavorResult<Option<VirtualMachineFlavorSpec>> {
        find_spec::<FlavorDomain>(self.store.as_ref(), vm).await
    }

    /// Resolve the preference spec of `vm`. See [`find_spec`](crate::resolver::find_spec).
    ///
    /// # Errors
    ///
    /// `InvalidKind`, `NotFound` or `Decode`.
    pub async fn find_preference_spec(
        &self,
        vm: &VirtualMachine,
    ) -> FlavorResult<Option<VirtualMachinePreferenceSpec>> {
        find_spec::<PreferenceDomain>(self.store.as_ref(), vm).await
    }

    /// Snapshot and pin the templates `vm` references.
    ///
    /// See [`store_controller_revisions`](crate::snapshotter::store_controller_revisions).
    ///
    /// # Errors
    ///
    /// `InvalidKind`, `NotFound`, `RevisionContentConflict` or the retryable
    /// `PatchConflict`.
    pub async fn store_controller_revisions(&self, vm: &mut VirtualMachine) -> FlavorResult<()> {
        snapshotter::store_controller_revisions(self.store.as_ref(), vm).await
    }

    /// Apply resolved specs to an instance spec. See [`SpecMerger::apply`].
    pub fn apply_to_vmi(
        &self,
        base_path: &FieldPath,
        flavor: Option<&VirtualMachineFlavorSpec>,
        preference: Option<&VirtualMachinePreferenceSpec>,
        vmi: &mut VirtualMachineInstanceSpec,
    ) -> Conflicts {
        self.merger.apply(base_path, flavor, preference, vmi)
    }
}
