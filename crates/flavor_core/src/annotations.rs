//! Name annotations recording which templates a workload uses.

use flavor_api::{ObjectMeta, VirtualMachine};

use crate::matcher::{FlavorDomain, PreferenceDomain, TemplateDomain, TemplateScope};

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod tests;

pub const FLAVOR_ANNOTATION: &str = "kubevirt.io/flavor-name";
pub const CLUSTER_FLAVOR_ANNOTATION: &str = "kubevirt.io/cluster-flavor-name";
pub const PREFERENCE_ANNOTATION: &str = "kubevirt.io/preference-name";
pub const CLUSTER_PREFERENCE_ANNOTATION: &str = "kubevirt.io/cluster-preference-name";

/// Record the flavor name of `vm` on `target`.
///
/// Writes exactly one of [`FLAVOR_ANNOTATION`] or
/// [`CLUSTER_FLAVOR_ANNOTATION`], depending on the matcher kind. Nothing is
/// written when the workload has no flavor or the kind is not recognized.
///
/// # Examples
///
/// ```rust
/// use flavor_api::{Matcher, ObjectMeta, VirtualMachine};
/// use flavor_core::annotations::{add_flavor_name_annotations, CLUSTER_FLAVOR_ANNOTATION};
///
/// let mut vm = VirtualMachine::new("default", "testvm");
/// vm.spec.flavor = Some(Matcher::new("small", ""));
/// let mut meta = ObjectMeta::default();
///
/// add_flavor_name_annotations(&vm, &mut meta);
/// assert_eq!(meta.annotations[CLUSTER_FLAVOR_ANNOTATION], "small");
/// ```
pub fn add_flavor_name_annotations(vm: &VirtualMachine, target: &mut ObjectMeta) {
    add_name_annotation::<FlavorDomain>(vm, target, FLAVOR_ANNOTATION, CLUSTER_FLAVOR_ANNOTATION);
}

/// Record the preference name of `vm` on `target`.
///
/// Same rules as [`add_flavor_name_annotations`], with the preference keys.
pub fn add_preference_name_annotations(vm: &VirtualMachine, target: &mut ObjectMeta) {
    add_name_annotation::<PreferenceDomain>(
        vm,
        target,
        PREFERENCE_ANNOTATION,
        CLUSTER_PREFERENCE_ANNOTATION,
    );
}

fn add_name_annotation<D: TemplateDomain>(
    vm: &VirtualMachine,
    target: &mut ObjectMeta,
    namespaced_key: &str,
    cluster_key: &str,
) {
    let Some(matcher) = D::matcher(&vm.spec) else {
        return;
    };
    let key = match D::scope(&matcher.kind) {
        Ok(TemplateScope::Namespaced) => namespaced_key,
        Ok(TemplateScope::ClusterScoped) => cluster_key,
        Err(_) => return,
    };
    target
        .annotations
        .insert(key.to_string(), matcher.name.clone());
}
