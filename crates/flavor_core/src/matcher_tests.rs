//! Tests for matcher kind parsing.

use super::*;

/// Verify an empty kind selects the cluster-scoped template in both domains.
#[test]
fn test_empty_kind_defaults_to_cluster_scoped() {
    assert_eq!(FlavorDomain::scope(""), Ok(TemplateScope::ClusterScoped));
    assert_eq!(PreferenceDomain::scope(""), Ok(TemplateScope::ClusterScoped));
}

/// Verify singular and plural kinds are accepted for each scope.
#[test]
fn test_singular_and_plural_kinds() {
    assert_eq!(
        FlavorDomain::scope("virtualmachineflavor"),
        Ok(TemplateScope::Namespaced)
    );
    assert_eq!(
        FlavorDomain::scope("virtualmachineflavors"),
        Ok(TemplateScope::Namespaced)
    );
    assert_eq!(
        FlavorDomain::scope("virtualmachineclusterflavors"),
        Ok(TemplateScope::ClusterScoped)
    );
    assert_eq!(
        PreferenceDomain::scope("virtualmachinepreference"),
        Ok(TemplateScope::Namespaced)
    );
    assert_eq!(
        PreferenceDomain::scope("virtualmachineclusterpreference"),
        Ok(TemplateScope::ClusterScoped)
    );
}

/// Verify kinds are matched case-insensitively.
#[test]
fn test_kind_is_case_insensitive() {
    assert_eq!(
        FlavorDomain::scope("VirtualMachineClusterFlavor"),
        Ok(TemplateScope::ClusterScoped)
    );
    assert_eq!(
        PreferenceDomain::scope("VirtualMachinePreference"),
        Ok(TemplateScope::Namespaced)
    );
}

/// Verify a kind from the other domain is rejected with the offending value.
#[test]
fn test_kind_from_other_domain_is_invalid() {
    let error = FlavorDomain::scope("virtualmachinepreference").unwrap_err();

    assert_eq!(
        error.to_string(),
        "got unexpected kind in FlavorMatcher: virtualmachinepreference"
    );
}

/// Verify an unknown kind keeps its original spelling in the error.
#[test]
fn test_unknown_kind_is_invalid() {
    let error = PreferenceDomain::scope("FooBar").unwrap_err();

    assert_eq!(
        error,
        FlavorError::InvalidKind {
            matcher: "PreferenceMatcher".to_string(),
            kind: "FooBar".to_string(),
        }
    );
}

/// Verify each scope maps to the matching store resource.
#[test]
fn test_resource_for_scope() {
    assert_eq!(
        FlavorDomain::resource(TemplateScope::Namespaced),
        ResourceKind::VirtualMachineFlavor
    );
    assert_eq!(
        FlavorDomain::resource(TemplateScope::ClusterScoped),
        ResourceKind::VirtualMachineClusterFlavor
    );
    assert_eq!(
        PreferenceDomain::resource(TemplateScope::Namespaced),
        ResourceKind::VirtualMachinePreference
    );
    assert_eq!(
        PreferenceDomain::resource(TemplateScope::ClusterScoped),
        ResourceKind::VirtualMachineClusterPreference
    );
}
