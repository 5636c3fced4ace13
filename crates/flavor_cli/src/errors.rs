use std::io;
use std::path::PathBuf;

use flavor_core::FlavorError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the flavorctl application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or saving the configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments or input objects were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to read an input file.
    #[error("Failed to load file {path:?}: {source}")]
    LoadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file does not contain the expected JSON object.
    #[error("Failed to parse JSON file {path:?}: {source}")]
    ParseJsonFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to render output as JSON.
    #[error("Failed to render output: {0}")]
    Render(serde_json::Error),

    /// Resolving, snapshotting or pinning failed.
    #[error(transparent)]
    Flavor(#[from] FlavorError),

    /// The merger left pre-set fields untouched and the conflict policy is `reject`.
    #[error("Conflicts with pre-set fields: {0}")]
    Conflicts(String),
}
