// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — converts a dataset into labelled features
//   2. `inspect` — shows one example's chunks and labels
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "qa-features",
    version = "0.1.0",
    about = "Convert extractive Q&A datasets into tokenized, span-labelled training features."
)]
pub struct Cli {
    /// The subcommand to run (prepare or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => Self::run_prepare(args),
            Commands::Inspect(args) => Self::run_inspect(args),
        }
    }

    /// Handles the `prepare` subcommand.
    fn run_prepare(args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        tracing::info!("Preparing features from: {}", args.dataset);

        // Convert CLI args → application config (separates presentation from domain)
        let output   = args.output.clone();
        let use_case = PrepareUseCase::new(args.try_into()?);
        let written  = use_case.execute()?;

        println!("Wrote {} features to {}", written, output);
        Ok(())
    }

    /// Handles the `inspect` subcommand.
    fn run_inspect(args: InspectArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let use_case = InspectUseCase::new(args.into());
        use_case.execute()
    }
}
