//! Command-line host for the PF2e lock-picking engine.
//!
//! Plays the part of the tabletop host: reads the actor from a JSON character
//! sheet, picks silent or visible dice, and prints every published report.

mod actor;
mod commands;
mod sink;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::pick::PickArgs;

#[derive(Parser)]
#[command(
    name = "lockpick",
    about = "Pick a Lock: background lock-picking rolls for Pathfinder 2e",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll the attempts to pick a lock and print the transcript
    Pick(PickArgs),

    /// Roll an inline @Check until success, critical success or critical failure
    Request {
        /// Inline check, e.g. "@Check[type:thievery|dc:40]"
        tag: String,

        /// Character sheet (JSON) of the actor making the check
        #[arg(short, long)]
        actor: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the standard lock qualities
    Presets,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pick(args) => commands::pick::run(&args),
        Commands::Request {
            tag,
            actor,
            seed,
            json,
        } => commands::request::run(&tag, &actor, seed, json),
        Commands::Presets => commands::presets::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
