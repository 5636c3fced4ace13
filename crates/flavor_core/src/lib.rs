//! Flavor and preference resolution for virtual machines.
//!
//! A virtual machine references up to two templates through matchers: a
//! flavor (sizing) and a preference (default values). This crate provides
//! the three pieces a controller needs to use them:
//!
//! - **Resolver** ([`resolver::find_spec`]): looks up the spec a matcher
//!   refers to, from the live template or from the revision it is pinned to.
//! - **Snapshotter** ([`snapshotter::store_controller_revisions`]): copies
//!   each template into an immutable, deterministically named
//!   `ControllerRevision` on first use and pins the matcher to it with a
//!   conditional patch.
//! - **Merger** ([`SpecMerger`]): applies the flavor and then the preference
//!   to a virtual machine instance spec without overwriting anything the user
//!   set, returning the [`Conflicts`] it left alone.
//!
//! [`FlavorMethods`] bundles all three over a shared [`ObjectStore`].
//!
//! # Examples
//!
//! ```rust
//! use flavor_api::{
//!     CpuFlavor, ObjectMeta, ResourceKind, TemplateObject, VirtualMachine,
//!     VirtualMachineFlavorSpec, Matcher,
//! };
//! use flavor_core::{FieldPath, FlavorMethods, InMemoryStore};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! store.insert_template(
//!     ResourceKind::VirtualMachineClusterFlavor,
//!     TemplateObject {
//!         api_version: "flavor.kubevirt.io/v1alpha1".to_string(),
//!         kind: "VirtualMachineClusterFlavor".to_string(),
//!         metadata: ObjectMeta::named("small"),
//!         spec: VirtualMachineFlavorSpec {
//!             cpu: CpuFlavor { guest: 2, ..Default::default() },
//!             ..Default::default()
//!         },
//!     },
//! )?;
//!
//! let mut vm = VirtualMachine::new("default", "testvm");
//! vm.spec.flavor = Some(Matcher::new("small", ""));
//! store.insert_virtual_machine(vm.clone());
//!
//! let methods = FlavorMethods::new(store.clone());
//! methods.store_controller_revisions(&mut vm).await?;
//! let flavor = methods.find_flavor_spec(&vm).await?;
//!
//! let mut vmi = vm.spec.template.clone().unwrap_or_default().spec;
//! let conflicts = methods.apply_to_vmi(&FieldPath::default(), flavor.as_ref(), None, &mut vmi);
//! assert!(conflicts.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod annotations;
pub mod errors;
pub mod field_path;
pub mod matcher;
pub mod memory_store;
pub mod merger;
pub mod methods;
pub mod patch;
mod preferences;
pub mod resolver;
pub mod revision;
pub mod snapshotter;
pub mod store;

#[cfg(test)]
mod test_fixtures;

pub use annotations::{add_flavor_name_annotations, add_preference_name_annotations};
pub use errors::{FlavorError, FlavorResult, StoreError, StoreResult};
pub use field_path::{Conflicts, FieldPath, DEFAULT_BASE_PATH};
pub use matcher::{FlavorDomain, PreferenceDomain, TemplateDomain, TemplateScope};
pub use memory_store::{InMemoryStore, StoreCall};
pub use merger::SpecMerger;
pub use methods::FlavorMethods;
pub use patch::{JsonPatch, PatchError, PatchOp, PatchOperation, RevisionNamePatch};
pub use revision::{
    create_flavor_controller_revision, create_preference_controller_revision, revision_name,
};
pub use store::ObjectStore;
