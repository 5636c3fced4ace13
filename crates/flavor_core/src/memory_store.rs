//! An in-process [`ObjectStore`] for tests and offline tooling.
//!
//! Objects are held in ordered maps behind a single mutex, so every call is
//! serialized the way a real store serializes writes to one object. Every
//! call is recorded, which lets tests assert on how many writes an operation
//! performed.

use async_trait::async_trait;
use chrono::Utc;
use flavor_api::{ControllerRevision, ResourceKind, TemplateObject, VirtualMachine, DEFAULT_NAMESPACE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use crate::{patch::JsonPatch, ObjectStore, StoreError, StoreResult};

#[cfg(test)]
#[path = "memory_store_tests.rs"]
mod tests;

/// A call made against an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    GetTemplate { resource: ResourceKind, name: String },
    GetRevision { name: String },
    CreateRevision { name: String },
    PatchVirtualMachine { name: String, patch: JsonPatch },
}

impl StoreCall {
    /// True for calls that write to the store.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            StoreCall::CreateRevision { .. } | StoreCall::PatchVirtualMachine { .. }
        )
    }
}

type ObjectKey = (String, String);

#[derive(Debug, Default)]
struct StoreState {
    templates: BTreeMap<(ResourceKind, String, String), TemplateObject<serde_json::Value>>,
    revisions: BTreeMap<ObjectKey, ControllerRevision>,
    virtual_machines: BTreeMap<ObjectKey, VirtualMachine>,
    calls: Vec<StoreCall>,
}

/// An [`ObjectStore`] backed by process memory.
///
/// # Examples
///
/// ```rust
/// use flavor_api::{ResourceKind, TemplateObject, VirtualMachineFlavorSpec, ObjectMeta};
/// use flavor_core::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// store
///     .insert_template(
///         ResourceKind::VirtualMachineClusterFlavor,
///         TemplateObject {
///             api_version: "flavor.kubevirt.io/v1alpha1".to_string(),
///             kind: "VirtualMachineClusterFlavor".to_string(),
///             metadata: ObjectMeta::named("small"),
///             spec: VirtualMachineFlavorSpec::default(),
///         },
///     )
///     .unwrap();
/// assert!(store.calls().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a template. A missing uid or generation is assigned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` when the spec cannot be serialized.
    pub fn insert_template<S: Serialize>(
        &self,
        resource: ResourceKind,
        template: TemplateObject<S>,
    ) -> StoreResult<()> {
        let spec = serde_json::to_value(&template.spec)
            .map_err(|e| StoreError::Backend(format!("failed to encode template spec: {e}")))?;
        let mut metadata = template.metadata;
        assign_identity(&mut metadata);
        let namespace = template_namespace(resource, metadata.namespace.as_deref());
        let key = (resource, namespace, metadata.name.clone());
        self.state().templates.insert(
            key,
            TemplateObject {
                api_version: template.api_version,
                kind: template.kind,
                metadata,
                spec,
            },
        );
        Ok(())
    }

    /// Seed a virtual machine. A missing uid or generation is assigned.
    pub fn insert_virtual_machine(&self, mut vm: VirtualMachine) {
        assign_identity(&mut vm.metadata);
        let key = object_key(vm.metadata.namespace_or_default(), &vm.metadata.name);
        self.state().virtual_machines.insert(key, vm);
    }

    /// Seed a revision without recording a call.
    pub fn insert_revision(&self, revision: ControllerRevision) {
        let key = object_key(revision.metadata.namespace_or_default(), &revision.metadata.name);
        self.state().revisions.insert(key, revision);
    }

    pub fn virtual_machine(&self, namespace: &str, name: &str) -> Option<VirtualMachine> {
        self.state()
            .virtual_machines
            .get(&object_key(namespace, name))
            .cloned()
    }

    pub fn revision(&self, namespace: &str, name: &str) -> Option<ControllerRevision> {
        self.state().revisions.get(&object_key(namespace, name)).cloned()
    }

    /// Every stored revision, ordered by namespace and name.
    pub fn revisions(&self) -> Vec<ControllerRevision> {
        self.state().revisions.values().cloned().collect()
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state().calls.clone()
    }

    /// The write calls made so far, oldest first.
    pub fn writes(&self) -> Vec<StoreCall> {
        self.state()
            .calls
            .iter()
            .filter(|call| call.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }
}

fn object_key(namespace: &str, name: &str) -> ObjectKey {
    (namespace.to_string(), name.to_string())
}

fn template_namespace(resource: ResourceKind, namespace: Option<&str>) -> String {
    if !resource.is_namespaced() {
        return String::new();
    }
    match namespace {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        _ => DEFAULT_NAMESPACE.to_string(),
    }
}

fn assign_identity(metadata: &mut flavor_api::ObjectMeta) {
    if metadata.uid.is_none() {
        metadata.uid = Some(Uuid::new_v4().to_string());
    }
    if metadata.generation.is_none() {
        metadata.generation = Some(1);
    }
    if metadata.creation_timestamp.is_none() {
        metadata.creation_timestamp = Some(Utc::now());
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get_template(
        &self,
        resource: ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> StoreResult<TemplateObject<serde_json::Value>> {
        let mut state = self.state();
        state.calls.push(StoreCall::GetTemplate {
            resource,
            name: name.to_string(),
        });
        let key = (resource, template_namespace(resource, namespace), name.to_string());
        state
            .templates
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource,
                name: name.to_string(),
            })
    }

    async fn get_revision(&self, namespace: &str, name: &str) -> StoreResult<ControllerRevision> {
        let mut state = self.state();
        state.calls.push(StoreCall::GetRevision {
            name: name.to_string(),
        });
        state
            .revisions
            .get(&object_key(namespace, name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                resource: ResourceKind::ControllerRevision,
                name: name.to_string(),
            })
    }

    async fn create_revision(
        &self,
        mut revision: ControllerRevision,
    ) -> StoreResult<ControllerRevision> {
        let mut state = self.state();
        let name = revision.metadata.name.clone();
        state.calls.push(StoreCall::CreateRevision { name: name.clone() });

        let key = object_key(revision.metadata.namespace_or_default(), &name);
        if state.revisions.contains_key(&key) {
            debug!(revision = %name, "Revision already exists");
            return Err(StoreError::AlreadyExists {
                resource: ResourceKind::ControllerRevision,
                name,
            });
        }

        revision.metadata.uid = Some(Uuid::new_v4().to_string());
        revision.metadata.creation_timestamp = Some(Utc::now());
        state.revisions.insert(key, revision.clone());
        debug!(revision = %name, "Created revision");
        Ok(revision)
    }

    async fn patch_virtual_machine(
        &self,
        namespace: &str,
        name: &str,
        patch: &JsonPatch,
    ) -> StoreResult<VirtualMachine> {
        let mut state = self.state();
        state.calls.push(StoreCall::PatchVirtualMachine {
            name: name.to_string(),
            patch: patch.clone(),
        });

        let key = object_key(namespace, name);
        let current = state
            .virtual_machines
            .get(&key)
            .ok_or_else(|| StoreError::NotFound {
                resource: ResourceKind::VirtualMachine,
                name: name.to_string(),
            })?;

        let mut document = serde_json::to_value(current)
            .map_err(|e| StoreError::Backend(format!("failed to encode virtual machine: {e}")))?;
        patch.apply(&mut document).map_err(|e| {
            if e.is_test_failure() {
                StoreError::PreconditionFailed {
                    resource: ResourceKind::VirtualMachine,
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            } else {
                StoreError::Backend(e.to_string())
            }
        })?;
        let mut updated: VirtualMachine = serde_json::from_value(document)
            .map_err(|e| StoreError::Backend(format!("patched virtual machine is invalid: {e}")))?;

        if updated.spec != current.spec {
            updated.metadata.generation = Some(current.metadata.generation.unwrap_or(0) + 1);
        }
        state.virtual_machines.insert(key, updated.clone());
        debug!(vm = %name, operations = patch.operations().len(), "Patched virtual machine");
        Ok(updated)
    }
}
