//! Snapshotting templates into revisions and pinning matchers to them.
//!
//! The first time a workload uses a template, the template spec is copied
//! into a [`ControllerRevision`] and the workload's matcher is pinned to that
//! revision by name. From then on the resolver reads the revision instead of
//! the live template.
//!
//! Correctness under concurrent callers relies on two store primitives only:
//!
//! 1. Revision names are derived from the template identity, so racing
//!    callers create the same name. An `AlreadyExists` answer is resolved by
//!    comparing payload bytes.
//! 2. The pin patch tests the matcher's observed state before writing. If
//!    another writer got there first the patch fails as a whole and the
//!    caller retries the entire operation.

use flavor_api::{ControllerRevision, VirtualMachine};
use tracing::{debug, info, warn};

use crate::{
    matcher::{FlavorDomain, PreferenceDomain, TemplateDomain},
    patch::RevisionNamePatch,
    resolver::find_template,
    revision::build_revision,
    FlavorError, FlavorResult, ObjectStore, StoreError,
};

#[cfg(test)]
#[path = "snapshotter_tests.rs"]
mod tests;

/// Snapshot the templates a workload references and pin its matchers.
///
/// Both matchers are handled independently; either may be absent or already
/// pinned, in which case that half is a no-op. When anything needs pinning, a
/// single patch covering both matchers is sent. On success `vm` is updated in
/// place with the pinned revision names.
///
/// # Errors
///
/// - `FlavorError::InvalidKind` for an unrecognized matcher kind.
/// - `FlavorError::NotFound` when a referenced template does not exist.
/// - `FlavorError::Decode` when a template cannot be snapshotted, for example
///   because of an unsupported apiVersion. Nothing is written in that case.
/// - `FlavorError::RevisionContentConflict` when a revision with the computed
///   name exists with different content.
/// - `FlavorError::PatchConflict` when the workload changed concurrently. The
///   whole call can be retried.
pub async fn store_controller_revisions(
    store: &dyn ObjectStore,
    vm: &mut VirtualMachine,
) -> FlavorResult<()> {
    // Both kinds are checked before anything is written.
    check_kind::<FlavorDomain>(vm)?;
    check_kind::<PreferenceDomain>(vm)?;

    // Every revision is built before the first write, so a template that
    // cannot be snapshotted leaves the store untouched.
    let flavor_revision = prepare_revision::<FlavorDomain>(store, vm).await?;
    let preference_revision = prepare_revision::<PreferenceDomain>(store, vm).await?;

    let mut patch = RevisionNamePatch::new();
    let flavor_revision = stage_pin::<FlavorDomain>(store, vm, flavor_revision, &mut patch).await?;
    let preference_revision =
        stage_pin::<PreferenceDomain>(store, vm, preference_revision, &mut patch).await?;

    if patch.is_empty() {
        debug!(vm = %vm.metadata.name, "No matchers to pin");
        return Ok(());
    }

    let namespace = vm.metadata.namespace_or_default().to_string();
    store
        .patch_virtual_machine(&namespace, &vm.metadata.name, &patch.to_json_patch())
        .await?;

    if let Some(name) = flavor_revision {
        pin_in_place::<FlavorDomain>(vm, &name);
    }
    if let Some(name) = preference_revision {
        pin_in_place::<PreferenceDomain>(vm, &name);
    }
    Ok(())
}

fn check_kind<D: TemplateDomain>(vm: &VirtualMachine) -> FlavorResult<()> {
    match D::matcher(&vm.spec) {
        Some(matcher) => D::scope(&matcher.kind).map(|_| ()),
        None => Ok(()),
    }
}

/// Build the revision for domain `D`, or `None` when there is nothing to do.
async fn prepare_revision<D: TemplateDomain>(
    store: &dyn ObjectStore,
    vm: &VirtualMachine,
) -> FlavorResult<Option<ControllerRevision>> {
    let Some(matcher) = D::matcher(&vm.spec) else {
        return Ok(None);
    };
    let scope = D::scope(&matcher.kind)?;
    if let Some(revision_name) = matcher.pinned_revision() {
        debug!(
            vm = %vm.metadata.name,
            matcher = D::MATCHER,
            revision = revision_name,
            "Matcher already pinned"
        );
        return Ok(None);
    }

    let namespace = vm.metadata.namespace_or_default();
    let template = find_template::<D>(store, scope, namespace, &matcher.name).await?;
    build_revision::<D>(vm, &template).map(Some)
}

/// Store `revision` and add the pin of domain `D` to `patch`.
///
/// Returns the revision name the matcher should be pinned to.
async fn stage_pin<D: TemplateDomain>(
    store: &dyn ObjectStore,
    vm: &VirtualMachine,
    revision: Option<ControllerRevision>,
    patch: &mut RevisionNamePatch,
) -> FlavorResult<Option<String>> {
    let (Some(revision), Some(matcher)) = (revision, D::matcher(&vm.spec)) else {
        return Ok(None);
    };
    let stored = ensure_revision(store, revision).await?;
    patch.pin(D::SPEC_FIELD, matcher, &stored.metadata.name);
    Ok(Some(stored.metadata.name))
}

/// Create `revision`, accepting an existing revision with identical data.
async fn ensure_revision(
    store: &dyn ObjectStore,
    revision: ControllerRevision,
) -> FlavorResult<ControllerRevision> {
    let name = revision.metadata.name.clone();
    let namespace = revision.metadata.namespace_or_default().to_string();
    let data = revision.data.clone();

    match store.create_revision(revision).await {
        Ok(created) => {
            info!(revision = %name, namespace = %namespace, "Created ControllerRevision");
            Ok(created)
        }
        Err(StoreError::AlreadyExists { .. }) => {
            let existing = store.get_revision(&namespace, &name).await?;
            if existing.data == data {
                warn!(
                    revision = %name,
                    "ControllerRevision already exists with identical data, reusing it"
                );
                Ok(existing)
            } else {
                Err(FlavorError::RevisionContentConflict { name })
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn pin_in_place<D: TemplateDomain>(vm: &mut VirtualMachine, revision_name: &str) {
    let vm_name = vm.metadata.name.clone();
    if let Some(matcher) = D::matcher_mut(&mut vm.spec) {
        matcher.revision_name = Some(revision_name.to_string());
        info!(vm = %vm_name, matcher = D::MATCHER, revision = revision_name, "Pinned matcher");
    }
}
