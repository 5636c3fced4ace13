//! The object store contract.
//!
//! The resolver and the snapshotter never talk to a transport directly; they
//! go through [`ObjectStore`]. Implementations are expected to own caching,
//! authentication and timeouts. The in-memory implementation in
//! [`crate::memory_store`] backs the tests and the offline tooling.

use async_trait::async_trait;
use flavor_api::{ControllerRevision, ResourceKind, TemplateObject, VirtualMachine};

use crate::{patch::JsonPatch, StoreResult};

/// Access to templates, revisions and virtual machines.
///
/// # Errors
///
/// Every method reports failures as [`StoreError`](crate::StoreError):
/// `NotFound` for missing objects, `AlreadyExists` for duplicate creates,
/// `PreconditionFailed` when a `test` operation of a patch does not hold, and
/// `Backend` for everything else.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch a template with an undecoded spec.
    ///
    /// `namespace` is ignored for cluster-scoped resources.
    async fn get_template(
        &self,
        resource: ResourceKind,
        namespace: Option<&str>,
        name: &str,
    ) -> StoreResult<TemplateObject<serde_json::Value>>;

    /// Fetch a controller revision by name.
    async fn get_revision(&self, namespace: &str, name: &str) -> StoreResult<ControllerRevision>;

    /// Create a controller revision.
    ///
    /// Returns the stored object, with any store-assigned metadata filled in.
    async fn create_revision(&self, revision: ControllerRevision)
        -> StoreResult<ControllerRevision>;

    /// Apply a JSON patch to a virtual machine.
    ///
    /// The patch is applied atomically: if any `test` operation fails,
    /// nothing is written and `PreconditionFailed` is returned.
    async fn patch_virtual_machine(
        &self,
        namespace: &str,
        name: &str,
        patch: &JsonPatch,
    ) -> StoreResult<VirtualMachine>;
}
