//! JSON patch documents and the revision pin patch.
//!
//! Only the three operations the pin patch needs are modelled: `test`, `add`
//! and `replace`. A `test` against a path that does not exist compares equal
//! to `null`, which is how "this matcher is not pinned yet" is expressed.

use flavor_api::Matcher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;

/// A JSON patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Test,
    Add,
    Replace,
}

/// One operation of a JSON patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default)]
    pub value: Value,
}

impl PatchOperation {
    pub fn test(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Test,
            path: path.into(),
            value,
        }
    }

    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value,
        }
    }

    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value,
        }
    }
}

/// Errors raised while applying a patch document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    /// A `test` operation did not hold.
    #[error("test failed at {path}: expected {expected}, found {actual}")]
    TestFailed {
        path: String,
        expected: Value,
        actual: Value,
    },

    /// The target (or, for `add`, its parent) does not exist.
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    /// The path is not a valid JSON pointer for the document.
    #[error("invalid path: {path}")]
    InvalidPath { path: String },
}

impl PatchError {
    /// True when the failure is a precondition, not a malformed document.
    pub fn is_test_failure(&self) -> bool {
        matches!(self, PatchError::TestFailed { .. })
    }
}

/// An ordered JSON patch document.
///
/// Serializes as the bare operation array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatch(Vec<PatchOperation>);

impl JsonPatch {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply every operation to `document`, all or nothing.
    ///
    /// Operations run in order against a working copy; `document` is only
    /// replaced when every operation succeeded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flavor_core::patch::{JsonPatch, PatchOperation};
    /// use serde_json::json;
    ///
    /// let mut document = json!({"spec": {"flavor": {"name": "small"}}});
    /// let patch = JsonPatch::new(vec![
    ///     PatchOperation::test("/spec/flavor/revisionName", json!(null)),
    ///     PatchOperation::add("/spec/flavor/revisionName", json!("vm-small-uid-1")),
    /// ]);
    ///
    /// patch.apply(&mut document).unwrap();
    /// assert_eq!(document["spec"]["flavor"]["revisionName"], "vm-small-uid-1");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PatchError::TestFailed` when a `test` operation does not hold,
    /// and `PathNotFound` / `InvalidPath` for paths that cannot be resolved.
    pub fn apply(&self, document: &mut Value) -> Result<(), PatchError> {
        let mut working = document.clone();
        for operation in &self.0 {
            apply_operation(&mut working, operation)?;
        }
        *document = working;
        Ok(())
    }
}

fn apply_operation(document: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    let tokens = parse_pointer(&operation.path)?;
    match operation.op {
        PatchOp::Test => {
            let actual = lookup(document, &tokens).cloned().unwrap_or(Value::Null);
            if actual != operation.value {
                return Err(PatchError::TestFailed {
                    path: operation.path.clone(),
                    expected: operation.value.clone(),
                    actual,
                });
            }
            Ok(())
        }
        PatchOp::Add => {
            let Some((last, parent_tokens)) = tokens.split_last() else {
                *document = operation.value.clone();
                return Ok(());
            };
            let parent = lookup_mut(document, parent_tokens).ok_or_else(|| {
                PatchError::PathNotFound {
                    path: operation.path.clone(),
                }
            })?;
            match parent {
                Value::Object(map) => {
                    map.insert(last.clone(), operation.value.clone());
                    Ok(())
                }
                Value::Array(items) => {
                    let index = if last == "-" {
                        items.len()
                    } else {
                        array_index(last, items.len() + 1, &operation.path)?
                    };
                    items.insert(index, operation.value.clone());
                    Ok(())
                }
                _ => Err(PatchError::InvalidPath {
                    path: operation.path.clone(),
                }),
            }
        }
        PatchOp::Replace => {
            let target = lookup_mut(document, &tokens).ok_or_else(|| PatchError::PathNotFound {
                path: operation.path.clone(),
            })?;
            *target = operation.value.clone();
            Ok(())
        }
    }
}

fn parse_pointer(path: &str) -> Result<Vec<String>, PatchError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = path.strip_prefix('/') else {
        return Err(PatchError::InvalidPath {
            path: path.to_string(),
        });
    };
    Ok(rest
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn array_index(token: &str, len: usize, path: &str) -> Result<usize, PatchError> {
    match token.parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        _ => Err(PatchError::InvalidPath {
            path: path.to_string(),
        }),
    }
}

fn lookup<'a>(document: &'a Value, tokens: &[String]) -> Option<&'a Value> {
    tokens.iter().try_fold(document, |current, token| match current {
        Value::Object(map) => map.get(token),
        Value::Array(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn lookup_mut<'a>(document: &'a mut Value, tokens: &[String]) -> Option<&'a mut Value> {
    tokens
        .iter()
        .try_fold(document, |current, token| match current {
            Value::Object(map) => map.get_mut(token),
            Value::Array(items) => token.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        })
}

/// The patch pinning one or both matchers of a virtual machine to revisions.
///
/// Kept as two parts so the optimistic-concurrency gate is explicit:
/// preconditions assert the matcher still looks the way it did when it was
/// read, mutations set the revision name. When rendered into a
/// [`JsonPatch`] every precondition precedes every mutation, so one failed
/// test leaves the object untouched for both domains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevisionNamePatch {
    preconditions: Vec<PatchOperation>,
    mutations: Vec<PatchOperation>,
}

impl RevisionNamePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the matcher stored at `/spec/<field>` to `revision_name`.
    ///
    /// `observed` is the matcher as it was read; the preconditions assert the
    /// stored matcher still has the same name and revision name.
    pub fn pin(&mut self, field: &str, observed: &Matcher, revision_name: &str) {
        let base = format!("/spec/{field}");
        self.preconditions.push(PatchOperation::test(
            format!("{base}/name"),
            Value::String(observed.name.clone()),
        ));
        self.preconditions.push(PatchOperation::test(
            format!("{base}/revisionName"),
            observed
                .revision_name
                .clone()
                .map_or(Value::Null, Value::String),
        ));
        self.mutations.push(PatchOperation::add(
            format!("{base}/revisionName"),
            Value::String(revision_name.to_string()),
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn preconditions(&self) -> &[PatchOperation] {
        &self.preconditions
    }

    pub fn mutations(&self) -> &[PatchOperation] {
        &self.mutations
    }

    /// Render as a single JSON patch with every `test` first.
    pub fn to_json_patch(&self) -> JsonPatch {
        JsonPatch::new(
            self.preconditions
                .iter()
                .chain(self.mutations.iter())
                .cloned()
                .collect(),
        )
    }
}
