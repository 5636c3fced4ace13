//! Immutable template snapshots.

use serde::{Deserialize, Serialize};

use crate::{ObjectMeta, CONTROLLER_REVISION_API_VERSION, CONTROLLER_REVISION_KIND};

#[cfg(test)]
#[path = "revision_tests.rs"]
mod tests;

/// An immutable snapshot of a template specification.
///
/// `data` holds the serialized [`SpecRevision`] exactly as it was produced
/// when the revision was created. Two revisions are the same snapshot if and
/// only if their `data` bytes are equal. On the wire the bytes are carried as
/// a base64 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerRevision {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,

    #[serde(default)]
    pub revision: i64,
}

fn default_api_version() -> String {
    CONTROLLER_REVISION_API_VERSION.to_string()
}

fn default_kind() -> String {
    CONTROLLER_REVISION_KIND.to_string()
}

impl ControllerRevision {
    /// Create a first-generation revision carrying the given payload.
    pub fn new(metadata: ObjectMeta, data: Vec<u8>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata,
            data,
            revision: 0,
        }
    }
}

/// The payload stored in a revision: the template spec plus the API version it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRevision {
    pub api_version: String,
    pub spec: serde_json::Value,
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
