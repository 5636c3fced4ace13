//! Resolving a workload's matchers to template specs.

use flavor_api::{TemplateObject, VirtualMachine};
use serde_json::Value;
use tracing::debug;

use crate::{
    matcher::{TemplateDomain, TemplateScope},
    revision::{decode_revision, decode_spec},
    FlavorResult, ObjectStore,
};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Resolve the spec a workload's matcher for domain `D` refers to.
///
/// - No matcher: `Ok(None)`, without touching the store.
/// - Pinned matcher: the spec is read from the named revision, never from
///   the live template, so later edits or deletion of the template do not
///   affect the workload.
/// - Otherwise: the live template is read from the workload's namespace or
///   the cluster, depending on the matcher kind.
///
/// # Errors
///
/// - `FlavorError::InvalidKind` when the matcher kind is not valid for `D`,
///   whether or not the matcher is pinned.
/// - `FlavorError::NotFound` when the template or revision does not exist.
/// - `FlavorError::Decode` when the stored payload is not a valid spec.
pub async fn find_spec<D: TemplateDomain>(
    store: &dyn ObjectStore,
    vm: &VirtualMachine,
) -> FlavorResult<Option<D::Spec>> {
    let Some(matcher) = D::matcher(&vm.spec) else {
        return Ok(None);
    };
    let scope = D::scope(&matcher.kind)?;
    let namespace = vm.metadata.namespace_or_default();

    if let Some(revision_name) = matcher.pinned_revision() {
        debug!(
            matcher = D::MATCHER,
            revision = revision_name,
            "Resolving spec from pinned revision"
        );
        let revision = store.get_revision(namespace, revision_name).await?;
        return decode_revision::<D>(&revision).map(Some);
    }

    let template = find_template::<D>(store, scope, namespace, &matcher.name).await?;
    let context = format!("{} {}", template.kind, template.metadata.name);
    decode_spec::<D>(&template.spec, &context).map(Some)
}

/// Read the live template for `name` in the given scope.
pub(crate) async fn find_template<D: TemplateDomain>(
    store: &dyn ObjectStore,
    scope: TemplateScope,
    namespace: &str,
    name: &str,
) -> FlavorResult<TemplateObject<Value>> {
    let resource = D::resource(scope);
    let namespace = match scope {
        TemplateScope::Namespaced => Some(namespace),
        TemplateScope::ClusterScoped => None,
    };
    debug!(resource = %resource, name = name, "Resolving live template");
    Ok(store.get_template(resource, namespace, name).await?)
}
