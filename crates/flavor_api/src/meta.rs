//! Object metadata shared by every resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::DEFAULT_NAMESPACE;

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;

/// Standard object metadata.
///
/// Only the fields the flavor machinery reads or writes are modelled.
/// Annotations are kept in a `BTreeMap` so serialization order is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Object name, unique within its namespace (or cluster, for cluster-scoped objects).
    pub name: String,

    /// Namespace of namespaced objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Unique identifier assigned by the object store on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Sequence number of spec changes, incremented by the object store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,

    /// Creation time assigned by the object store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Objects that own this object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
}

impl ObjectMeta {
    /// Create metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create metadata carrying a name and a namespace.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    /// The namespace of the object, falling back to `default` when unset or empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flavor_api::ObjectMeta;
    ///
    /// assert_eq!(ObjectMeta::named("vm").namespace_or_default(), "default");
    /// assert_eq!(ObjectMeta::namespaced("prod", "vm").namespace_or_default(), "prod");
    /// ```
    pub fn namespace_or_default(&self) -> &str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => DEFAULT_NAMESPACE,
        }
    }

    /// The object's uid, or an empty string when the store has not assigned one.
    pub fn uid_or_empty(&self) -> &str {
        self.uid.as_deref().unwrap_or_default()
    }
}

/// Reference from an owned object to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: String,

    /// Set when the owner is the managing controller of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<bool>,

    /// Set when the owner cannot be deleted before this object is removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
}
