//! Matcher kind parsing and the two template domains.
//!
//! A [`Matcher`] carries its kind as the raw string found on the workload.
//! That string is parsed exactly once into a [`TemplateScope`]; everything
//! downstream matches on the enum.
//!
//! The sizing (flavor) and default-value (preference) domains behave the same
//! way apart from their spec type, their kind names and the place their
//! matcher lives on the workload. [`TemplateDomain`] captures those
//! differences so the resolver and the snapshotter are written once.

use flavor_api::{
    Matcher, ResourceKind, VirtualMachineFlavorSpec, VirtualMachinePreferenceSpec,
    VirtualMachineSpec,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use crate::{FlavorError, FlavorResult};

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;

/// Where a template lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateScope {
    /// In the workload's namespace.
    Namespaced,
    /// Cluster wide. The default when a matcher names no kind.
    ClusterScoped,
}

/// One of the two template domains.
pub trait TemplateDomain {
    /// The decoded template specification.
    type Spec: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync;

    /// Matcher type name used in error messages.
    const MATCHER: &'static str;

    /// Field of the workload spec holding the matcher, as used in patch paths.
    const SPEC_FIELD: &'static str;

    /// Accepted kind strings for the namespaced template (compared case-insensitively).
    const NAMESPACED_KINDS: &'static [&'static str];

    /// Accepted kind strings for the cluster-scoped template (compared case-insensitively).
    /// The empty string is always accepted as cluster scoped.
    const CLUSTER_KINDS: &'static [&'static str];

    /// Store resource holding templates of the given scope.
    fn resource(scope: TemplateScope) -> ResourceKind;

    fn matcher(spec: &VirtualMachineSpec) -> Option<&Matcher>;

    fn matcher_mut(spec: &mut VirtualMachineSpec) -> Option<&mut Matcher>;

    /// Parse a raw matcher kind into a scope.
    ///
    /// # Errors
    ///
    /// Returns `FlavorError::InvalidKind` naming the offending value when the
    /// kind is not one of the domain's accepted kinds.
    fn scope(kind: &str) -> FlavorResult<TemplateScope> {
        let normalized = kind.to_lowercase();
        if normalized.is_empty() || Self::CLUSTER_KINDS.contains(&normalized.as_str()) {
            Ok(TemplateScope::ClusterScoped)
        } else if Self::NAMESPACED_KINDS.contains(&normalized.as_str()) {
            Ok(TemplateScope::Namespaced)
        } else {
            Err(FlavorError::InvalidKind {
                matcher: Self::MATCHER.to_string(),
                kind: kind.to_string(),
            })
        }
    }
}

/// The sizing template domain.
#[derive(Debug, Clone, Copy)]
pub struct FlavorDomain;

impl TemplateDomain for FlavorDomain {
    type Spec = VirtualMachineFlavorSpec;

    const MATCHER: &'static str = "FlavorMatcher";
    const SPEC_FIELD: &'static str = "flavor";
    const NAMESPACED_KINDS: &'static [&'static str] =
        &["virtualmachineflavor", "virtualmachineflavors"];
    const CLUSTER_KINDS: &'static [&'static str] =
        &["virtualmachineclusterflavor", "virtualmachineclusterflavors"];

    fn resource(scope: TemplateScope) -> ResourceKind {
        match scope {
            TemplateScope::Namespaced => ResourceKind::VirtualMachineFlavor,
            TemplateScope::ClusterScoped => ResourceKind::VirtualMachineClusterFlavor,
        }
    }

    fn matcher(spec: &VirtualMachineSpec) -> Option<&Matcher> {
        spec.flavor.as_ref()
    }

    fn matcher_mut(spec: &mut VirtualMachineSpec) -> Option<&mut Matcher> {
        spec.flavor.as_mut()
    }
}

/// The default-value template domain.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceDomain;

impl TemplateDomain for PreferenceDomain {
    type Spec = VirtualMachinePreferenceSpec;

    const MATCHER: &'static str = "PreferenceMatcher";
    const SPEC_FIELD: &'static str = "preference";
    const NAMESPACED_KINDS: &'static [&'static str] =
        &["virtualmachinepreference", "virtualmachinepreferences"];
    const CLUSTER_KINDS: &'static [&'static str] = &[
        "virtualmachineclusterpreference",
        "virtualmachineclusterpreferences",
    ];

    fn resource(scope: TemplateScope) -> ResourceKind {
        match scope {
            TemplateScope::Namespaced => ResourceKind::VirtualMachinePreference,
            TemplateScope::ClusterScoped => ResourceKind::VirtualMachineClusterPreference,
        }
    }

    fn matcher(spec: &VirtualMachineSpec) -> Option<&Matcher> {
        spec.preference.as_ref()
    }

    fn matcher_mut(spec: &mut VirtualMachineSpec) -> Option<&mut Matcher> {
        spec.preference.as_mut()
    }
}
