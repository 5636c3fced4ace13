//! Dotted field paths and the conflict list the merger returns.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "field_path_tests.rs"]
mod tests;

/// The default prefix under which a workload's instance spec lives.
pub const DEFAULT_BASE_PATH: &str = "spec.template.spec";

/// A dotted path into a specification, such as `spec.template.spec.domain.cpu`.
///
/// # Examples
///
/// ```rust
/// use flavor_core::FieldPath;
///
/// let cpu = FieldPath::new("spec.template.spec").child("domain").child("cpu");
/// assert_eq!(cpu.to_string(), "spec.template.spec.domain.cpu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    /// A path one level below this one.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field paths the merger declined to overwrite, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conflicts(Vec<FieldPath>);

impl Conflicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: FieldPath) {
        self.0.push(path);
    }

    pub fn extend(&mut self, other: Conflicts) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.iter()
    }

    /// True if `path` is among the conflicts.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p.as_str() == path)
    }
}

impl fmt::Display for Conflicts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<&str> = self.0.iter().map(FieldPath::as_str).collect();
        f.write_str(&paths.join(", "))
    }
}

impl IntoIterator for Conflicts {
    type Item = FieldPath;
    type IntoIter = std::vec::IntoIter<FieldPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
