//! Compute the name a revision gets for a workload and template.
//!
//! ```bash
//! flavorctl revision-name --vm testvm --template small --uid 1234 --generation 2
//! # testvm-small-1234-2
//! ```

use clap::Args;

#[cfg(test)]
#[path = "revision_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct RevisionNameArgs {
    /// Name of the virtual machine
    #[arg(long)]
    pub vm: String,

    /// Name of the flavor or preference
    #[arg(long)]
    pub template: String,

    /// UID of the flavor or preference
    #[arg(long)]
    pub uid: String,

    /// Generation of the flavor or preference
    #[arg(long)]
    pub generation: i64,
}

pub fn execute(args: &RevisionNameArgs) -> String {
    flavor_core::revision_name(&args.vm, &args.template, &args.uid, args.generation)
}
