//! Error types for resolving, snapshotting and pinning templates.
//!
//! Two layers of errors exist:
//!
//! - [`StoreError`] is what an [`ObjectStore`](crate::ObjectStore) returns. It
//!   describes the outcome of a single store call.
//! - [`FlavorError`] is what the resolver and the snapshotter return. It keeps
//!   the four kinds callers must tell apart (`InvalidKind`, `NotFound`,
//!   `RevisionContentConflict`, `PatchConflict`) as distinct variants.

use flavor_api::ResourceKind;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors returned by the flavor machinery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlavorError {
    /// A matcher names a kind that is not valid for its template domain.
    ///
    /// This is a caller or configuration bug and is never retried.
    #[error("got unexpected kind in {matcher}: {kind}")]
    InvalidKind { matcher: String, kind: String },

    /// A referenced template or revision does not exist.
    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: ResourceKind, name: String },

    /// A revision with the computed name already exists but holds different data.
    ///
    /// Revision names are derived from the template identity and generation,
    /// so a collision with divergent content means the naming invariant is
    /// broken or the revision was tampered with. Never retried.
    #[error("found existing ControllerRevision with unexpected data: {name}")]
    RevisionContentConflict { name: String },

    /// The optimistic-concurrency precondition of the pin patch failed.
    ///
    /// The workload changed between read and write. Retry the whole
    /// `store_controller_revisions` call.
    #[error("conflict while pinning revisions on {name}: {reason}")]
    PatchConflict { name: String, reason: String },

    /// A payload could not be encoded or decoded.
    #[error("failed to decode {context}: {reason}")]
    Decode { context: String, reason: String },

    /// Any other failure reported by the object store.
    #[error("object store request failed: {0}")]
    Store(StoreError),
}

impl FlavorError {
    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FlavorError::NotFound { .. })
    }

    /// True when re-running the failed operation may succeed.
    ///
    /// Only a failed pin precondition qualifies; every other error is either
    /// permanent or needs outside intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlavorError::PatchConflict { .. })
    }

    pub(crate) fn decode(context: impl Into<String>, error: impl std::fmt::Display) -> Self {
        FlavorError::Decode {
            context: context.into(),
            reason: error.to_string(),
        }
    }
}

/// Result type alias for flavor operations.
pub type FlavorResult<T> = Result<T, FlavorError>;

/// Errors returned by an object store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: ResourceKind, name: String },

    #[error("{resource} \"{name}\" already exists")]
    AlreadyExists { resource: ResourceKind, name: String },

    /// A `test` operation of a patch did not hold; nothing was written.
    #[error("precondition failed for {resource} \"{name}\": {reason}")]
    PreconditionFailed {
        resource: ResourceKind,
        name: String,
        reason: String,
    },

    /// Transport, encoding or any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Result type alias for object store calls.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for FlavorError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { resource, name } => FlavorError::NotFound { resource, name },
            StoreError::PreconditionFailed { name, reason, .. } => {
                FlavorError::PatchConflict { name, reason }
            }
            other => FlavorError::Store(other),
        }
    }
}
