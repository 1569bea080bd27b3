//! duck CLI
//!
//! Analyze a creature, propose a capture strategy, or print the engine configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duck")]
#[command(about = "Primordial duck capture assessment", long_about = None)]
#[command(version = duck_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the scenario's creature as a capture target
    Analyze {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,

        /// Configuration preset (default, cautious, aggressive)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Propose a capture strategy for the scenario's creature and drone
    Propose {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,

        /// RNG seed; defaults to the scenario's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration preset (default, cautious, aggressive)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the effective configuration as YAML
    Config {
        /// Configuration preset (default, cautious, aggressive)
        #[arg(long)]
        profile: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Analyze { scenario, profile } => duck_cli::run_analyze(&scenario, profile.as_deref())?,
        Commands::Propose { scenario, seed, profile } => {
            duck_cli::run_propose(&scenario, seed, profile.as_deref())?
        }
        Commands::Config { profile } => duck_cli::run_config(profile.as_deref())?,
    };
    println!("{}", output);

    Ok(())
}
