//! Resource quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource quantity such as `512M`, `2Gi` or `1`.
///
/// Quantities are carried verbatim. Nothing in this workspace does arithmetic
/// on them; they are only copied from templates into the target spec and
/// compared for equality.
///
/// # Examples
///
/// ```rust
/// use flavor_api::Quantity;
///
/// let memory = Quantity::new("512M");
/// assert_eq!(memory.as_str(), "512M");
/// assert_eq!(memory.to_string(), "512M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl Quantity {
    /// Create a quantity from its textual form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The textual form of the quantity.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
