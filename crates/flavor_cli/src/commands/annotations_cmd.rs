//! Print the name annotations a workload's instance receives.
//!
//! ```bash
//! flavorctl annotations --vm vm.json
//! # {
//! #   "kubevirt.io/cluster-flavor-name": "small"
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use flavor_api::{ObjectMeta, VirtualMachine};
use flavor_core::{add_flavor_name_annotations, add_preference_name_annotations};

use super::read_json;
use crate::errors::Error;

#[cfg(test)]
#[path = "annotations_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct AnnotationsArgs {
    /// JSON file holding the virtual machine
    #[arg(long)]
    pub vm: PathBuf,
}

pub fn execute(args: &AnnotationsArgs) -> Result<BTreeMap<String, String>, Error> {
    let vm: VirtualMachine = read_json(&args.vm)?;
    Ok(annotations_for(&vm))
}

fn annotations_for(vm: &VirtualMachine) -> BTreeMap<String, String> {
    let mut metadata = ObjectMeta::default();
    add_flavor_name_annotations(vm, &mut metadata);
    add_preference_name_annotations(vm, &mut metadata);
    metadata.annotations
}
