//! Building and decoding template revisions.
//!
//! A revision is named from the workload and the template identity, and its
//! payload is the template spec serialized together with the flavor API
//! version. Templates at any other API version are refused. Equal payloads
//! are byte-for-byte equal, which is what lets concurrent writers detect that
//! they produced the same snapshot.

use flavor_api::{
    ControllerRevision, ObjectMeta, SpecRevision, TemplateObject, VirtualMachine,
    FLAVOR_API_VERSION,
};
use serde_json::Value;

use crate::{
    matcher::{FlavorDomain, PreferenceDomain, TemplateDomain},
    FlavorError, FlavorResult,
};

#[cfg(test)]
#[path = "revision_tests.rs"]
mod tests;

/// The deterministic name of a revision.
///
/// The name only depends on its inputs, so it can be recomputed offline to
/// find the revision a workload was pinned to.
///
/// # Examples
///
/// ```rust
/// use flavor_core::revision_name;
///
/// assert_eq!(
///     revision_name("testvm", "small", "5a3f-uid", 2),
///     "testvm-small-5a3f-uid-2"
/// );
/// ```
pub fn revision_name(
    vm_name: &str,
    template_name: &str,
    template_uid: &str,
    template_generation: i64,
) -> String {
    format!("{vm_name}-{template_name}-{template_uid}-{template_generation}")
}

/// Build the revision snapshotting a sizing template for `vm`.
///
/// # Errors
///
/// Returns `FlavorError::Decode` if the template spec is not a valid sizing
/// spec or the template carries an apiVersion other than
/// `flavor.kubevirt.io/v1alpha1`.
pub fn create_flavor_controller_revision(
    vm: &VirtualMachine,
    template: &TemplateObject<Value>,
) -> FlavorResult<ControllerRevision> {
    build_revision::<FlavorDomain>(vm, template)
}

/// Build the revision snapshotting a preference template for `vm`.
///
/// # Errors
///
/// Returns `FlavorError::Decode` if the template spec is not a valid
/// preference spec or carries an unsupported apiVersion.
pub fn create_preference_controller_revision(
    vm: &VirtualMachine,
    template: &TemplateObject<Value>,
) -> FlavorResult<ControllerRevision> {
    build_revision::<PreferenceDomain>(vm, template)
}

pub(crate) fn build_revision<D: TemplateDomain>(
    vm: &VirtualMachine,
    template: &TemplateObject<Value>,
) -> FlavorResult<ControllerRevision> {
    if !template.api_version.is_empty() && template.api_version != FLAVOR_API_VERSION {
        return Err(FlavorError::Decode {
            context: format!("{} {}", template.kind, template.metadata.name),
            reason: format!("unexpected apiVersion {}", template.api_version),
        });
    }
    let spec = decode_spec::<D>(&template.spec, "template spec")?;
    let payload = SpecRevision {
        api_version: FLAVOR_API_VERSION.to_string(),
        spec: serde_json::to_value(&spec).map_err(|e| FlavorError::decode("template spec", e))?,
    };
    let data = serde_json::to_vec(&payload).map_err(|e| FlavorError::decode("revision data", e))?;

    let name = revision_name(
        &vm.metadata.name,
        &template.metadata.name,
        template.metadata.uid_or_empty(),
        template.metadata.generation.unwrap_or_default(),
    );
    let mut metadata = ObjectMeta::namespaced(vm.metadata.namespace_or_default(), name);
    metadata.owner_references.push(vm.controller_ref());

    Ok(ControllerRevision::new(metadata, data))
}

/// Decode the spec carried by a revision.
pub(crate) fn decode_revision<D: TemplateDomain>(
    revision: &ControllerRevision,
) -> FlavorResult<D::Spec> {
    let context = format!("ControllerRevision {}", revision.metadata.name);
    let payload: SpecRevision =
        serde_json::from_slice(&revision.data).map_err(|e| FlavorError::decode(&context, e))?;
    if payload.api_version != FLAVOR_API_VERSION {
        return Err(FlavorError::Decode {
            context,
            reason: format!("unexpected apiVersion {}", payload.api_version),
        });
    }
    decode_spec::<D>(&payload.spec, &context)
}

pub(crate) fn decode_spec<D: TemplateDomain>(spec: &Value, context: &str) -> FlavorResult<D::Spec> {
    serde_json::from_value(spec.clone()).map_err(|e| FlavorError::decode(context, e))
}
