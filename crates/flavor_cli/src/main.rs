use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use flavor_cli::commands::{
    annotations_cmd::{self, AnnotationsArgs},
    apply_cmd::{self, ApplyArgs},
    pin_cmd::{self, PinArgs},
    render,
    revision_cmd::{self, RevisionNameArgs},
};
use flavor_cli::config::{get_config_path, AppConfig};
use flavor_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// flavorctl: Resolve, pin and apply virtual machine flavors and preferences
#[derive(Parser)]
#[command(name = "flavorctl")]
#[command(about = "Resolve, pin and apply virtual machine flavors and preferences", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./flavorctl.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the name annotations a virtual machine's instance receives
    Annotations(AnnotationsArgs),

    /// Merge a virtual machine's flavor and preference into its instance template
    Apply(ApplyArgs),

    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Snapshot templates into revisions and pin the virtual machine to them
    Pin(PinArgs),

    /// Compute the name of a revision
    RevisionName(RevisionNameArgs),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(2);
        }
    };

    // Initialize logging; FLAVORCTL_LOG wins over the configured level.
    let filter = EnvFilter::try_from_env("FLAVORCTL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli.command, &config).await {
        error!("Error: {e}");
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<(), Error> {
    match command {
        Commands::Annotations(args) => {
            let annotations = annotations_cmd::execute(&args)?;
            println!("{}", render(&annotations)?);
        }
        Commands::Apply(args) => {
            let outcome = apply_cmd::execute(&args, config).await?;
            for path in outcome.conflicts.iter() {
                eprintln!("{} {path} was left untouched", "Conflict:".yellow());
            }
            println!("{}", render(&outcome.virtual_machine)?);
        }
        Commands::Init { path } => {
            let path = get_config_path(path.as_deref());
            AppConfig::default().save(&path)?;
            println!("{} {}", "Created".green(), path.display());
        }
        Commands::Pin(args) => {
            let output = pin_cmd::execute(&args).await?;
            println!("{}", render(&output)?);
        }
        Commands::RevisionName(args) => {
            println!("{}", revision_cmd::execute(&args));
        }
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "flavorctl version {}",
                option_env!("FLAVORCTL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
    Ok(())
}
