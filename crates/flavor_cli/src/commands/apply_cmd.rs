//! Resolve a workload's flavor and preference and merge them into its
//! instance template.
//!
//! ```bash
//! flavorctl apply --vm vm.json --template small.json --template linux.json
//! ```
//!
//! Pinned matchers are resolved from the revisions passed with `--revision`;
//! unpinned ones from the templates passed with `--template`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use flavor_api::VirtualMachine;
use flavor_core::{
    add_flavor_name_annotations, add_preference_name_annotations, Conflicts, FieldPath,
    FlavorMethods,
};
use tracing::{info, instrument, warn};

use super::{load_store, read_json};
use crate::config::{AppConfig, ConflictPolicy};
use crate::errors::Error;

#[cfg(test)]
#[path = "apply_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// JSON file holding the virtual machine
    #[arg(long)]
    pub vm: PathBuf,

    /// JSON file holding a flavor or preference (repeatable)
    #[arg(long = "template")]
    pub templates: Vec<PathBuf>,

    /// JSON file holding a ControllerRevision (repeatable)
    #[arg(long = "revision")]
    pub revisions: Vec<PathBuf>,
}

/// The defaulted workload and the fields the merge left alone.
#[derive(Debug)]
pub struct ApplyOutcome {
    pub virtual_machine: VirtualMachine,
    pub conflicts: Conflicts,
}

/// Merge the workload's flavor and preference into its instance template.
///
/// The instance template also receives the name annotations of both
/// matchers.
///
/// # Errors
///
/// Loading and resolution errors, and `Error::Conflicts` when the merge
/// reports conflicts under [`ConflictPolicy::Reject`].
#[instrument(skip(config), fields(vm = ?args.vm))]
pub async fn execute(args: &ApplyArgs, config: &AppConfig) -> Result<ApplyOutcome, Error> {
    let mut vm: VirtualMachine = read_json(&args.vm)?;
    let store = load_store(&args.templates, &args.revisions)?;
    let methods = FlavorMethods::new(Arc::new(store));

    let flavor = methods.find_flavor_spec(&vm).await?;
    let preference = methods.find_preference_spec(&vm).await?;

    let mut template = vm.spec.template.take().unwrap_or_default();
    let conflicts = methods.apply_to_vmi(
        &FieldPath::new(config.base_path.as_str()),
        flavor.as_ref(),
        preference.as_ref(),
        &mut template.spec,
    );
    add_flavor_name_annotations(&vm, &mut template.metadata);
    add_preference_name_annotations(&vm, &mut template.metadata);
    vm.spec.template = Some(template);

    if !conflicts.is_empty() {
        match config.conflict_policy {
            ConflictPolicy::Reject => return Err(Error::Conflicts(conflicts.to_string())),
            ConflictPolicy::Warn => {
                warn!(conflicts = %conflicts, "Applied with conflicts");
            }
        }
    }

    info!(
        flavor = flavor.is_some(),
        preference = preference.is_some(),
        "Applied templates"
    );
    Ok(ApplyOutcome {
        virtual_machine: vm,
        conflicts,
    })
}
