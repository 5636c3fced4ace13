//! Tests for flavor error types.

use super::*;

/// Verify the invalid kind message names the matcher and the offending kind.
#[test]
fn test_invalid_kind_message() {
    let error = FlavorError::InvalidKind {
        matcher: "FlavorMatcher".to_string(),
        kind: "bar".to_string(),
    };

    assert_eq!(error.to_string(), "got unexpected kind in FlavorMatcher: bar");
}

/// Verify store not-found errors are propagated as flavor not-found errors.
#[test]
fn test_store_not_found_maps_to_not_found() {
    let error: FlavorError = StoreError::NotFound {
        resource: ResourceKind::VirtualMachineClusterFlavor,
        name: "non-existing-flavor".to_string(),
    }
    .into();

    assert!(error.is_not_found());
    assert_eq!(
        error.to_string(),
        "virtualmachineclusterflavors \"non-existing-flavor\" not found"
    );
}

/// Verify a failed precondition becomes a retryable patch conflict.
#[test]
fn test_precondition_failed_maps_to_patch_conflict() {
    let error: FlavorError = StoreError::PreconditionFailed {
        resource: ResourceKind::VirtualMachine,
        name: "testvm".to_string(),
        reason: "test failed at /spec/flavor/revisionName".to_string(),
    }
    .into();

    assert!(matches!(error, FlavorError::PatchConflict { ref name, .. } if name == "testvm"));
    assert!(error.is_retryable());
}

/// Verify other store failures are wrapped and not retryable.
#[test]
fn test_other_store_errors_are_wrapped() {
    let error: FlavorError = StoreError::AlreadyExists {
        resource: ResourceKind::ControllerRevision,
        name: "rev".to_string(),
    }
    .into();

    assert!(matches!(error, FlavorError::Store(_)));
    assert!(!error.is_retryable());
    assert!(!error.is_not_found());
}

/// Verify the content conflict message names the revision.
#[test]
fn test_revision_content_conflict_message() {
    let error = FlavorError::RevisionContentConflict {
        name: "testvm-flavor-uid-1".to_string(),
    };

    assert!(error
        .to_string()
        .contains("found existing ControllerRevision with unexpected data"));
    assert!(!error.is_retryable());
}
