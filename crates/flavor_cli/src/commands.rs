//! Command modules for flavorctl.
//!
//! Every command works offline: the objects it needs are read from JSON
//! files and loaded into an [`InMemoryStore`], which then plays the role of
//! the cluster.
//!
//! - `annotations_cmd`: Print the name annotations a workload's instance gets
//! - `apply_cmd`: Resolve and merge templates into a workload's instance spec
//! - `pin_cmd`: Snapshot templates into revisions and pin the workload to them
//! - `revision_cmd`: Compute a revision name

use std::fs;
use std::path::{Path, PathBuf};

use flavor_api::{ControllerRevision, ResourceKind, TemplateObject};
use flavor_core::InMemoryStore;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::Error;

pub mod annotations_cmd;
pub mod apply_cmd;
pub mod pin_cmd;
pub mod revision_cmd;

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Read and decode a JSON file.
///
/// # Errors
///
/// `Error::LoadFile` if the file cannot be read, `Error::ParseJsonFile` if it
/// does not hold a `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    debug!("Reading {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::ParseJsonFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a store holding the given template and revision files.
///
/// The resource a template belongs to is taken from its `kind`.
///
/// # Errors
///
/// `Error::InvalidArguments` for a template whose kind is not one of the four
/// template kinds or that lacks `metadata.uid` or `metadata.generation`, plus
/// any error of [`read_json`].
pub fn load_store(templates: &[PathBuf], revisions: &[PathBuf]) -> Result<InMemoryStore, Error> {
    let store = InMemoryStore::new();

    for path in templates {
        let template: TemplateObject<Value> = read_json(path)?;
        let resource = template_resource(&template.kind).ok_or_else(|| {
            Error::InvalidArguments(format!(
                "{:?} is not a flavor or preference (kind {:?})",
                path, template.kind
            ))
        })?;
        // Revision names are built from uid and generation.
        if template.metadata.uid.as_deref().unwrap_or_default().is_empty()
            || template.metadata.generation.is_none()
        {
            return Err(Error::InvalidArguments(format!(
                "{:?} must set metadata.uid and metadata.generation",
                path
            )));
        }
        debug!(resource = %resource, name = %template.metadata.name, "Loaded template");
        store
            .insert_template(resource, template)
            .map_err(flavor_core::FlavorError::from)?;
    }

    for path in revisions {
        let revision: ControllerRevision = read_json(path)?;
        debug!(name = %revision.metadata.name, "Loaded revision");
        store.insert_revision(revision);
    }

    Ok(store)
}

fn template_resource(kind: &str) -> Option<ResourceKind> {
    ResourceKind::from_object_kind(kind).filter(|resource| {
        !matches!(
            resource,
            ResourceKind::VirtualMachine | ResourceKind::ControllerRevision
        )
    })
}

/// Render a value as pretty-printed JSON.
pub fn render<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(Error::Render)
}
