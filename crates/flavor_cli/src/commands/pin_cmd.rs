//! Snapshot a workload's templates into revisions and pin the workload.
//!
//! ```bash
//! flavorctl pin --vm vm.json --template small.json
//! ```
//!
//! Prints the pinned workload together with every revision the run created,
//! so the output can be fed back into `apply --revision`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use flavor_api::{ControllerRevision, VirtualMachine};
use flavor_core::FlavorMethods;
use serde::Serialize;
use tracing::{info, instrument};

use super::{load_store, read_json};
use crate::errors::Error;

#[cfg(test)]
#[path = "pin_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct PinArgs {
    /// JSON file holding the virtual machine
    #[arg(long)]
    pub vm: PathBuf,

    /// JSON file holding a flavor or preference (repeatable)
    #[arg(long = "template")]
    pub templates: Vec<PathBuf>,

    /// JSON file holding an existing ControllerRevision (repeatable)
    #[arg(long = "revision")]
    pub revisions: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinOutput {
    pub virtual_machine: VirtualMachine,
    pub revisions: Vec<ControllerRevision>,
}

/// # Errors
///
/// Loading errors and every error of
/// [`FlavorMethods::store_controller_revisions`].
#[instrument(fields(vm = ?args.vm))]
pub async fn execute(args: &PinArgs) -> Result<PinOutput, Error> {
    let vm: VirtualMachine = read_json(&args.vm)?;
    let namespace = vm.metadata.namespace_or_default().to_string();
    let name = vm.metadata.name.clone();
    let store = Arc::new(load_store(&args.templates, &args.revisions)?);
    store.insert_virtual_machine(vm);

    // Work on the stored copy so the output carries store-assigned metadata.
    let mut vm = store.virtual_machine(&namespace, &name).ok_or_else(|| {
        Error::InvalidArguments(format!("{:?} holds no virtual machine", args.vm))
    })?;
    let methods = FlavorMethods::new(store.clone());
    methods.store_controller_revisions(&mut vm).await?;

    let revisions = store.revisions();
    info!(revisions = revisions.len(), "Pinned virtual machine");

    Ok(PinOutput {
        virtual_machine: store.virtual_machine(&namespace, &name).unwrap_or(vm),
        revisions,
    })
}
