#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the care map enrichment pipeline.
//!
//! Each subcommand is one stage of the facility analysis pipeline:
//! resolve MSAs for a facility CSV, fetch and aggregate ZIP
//! demographics, score a demographics batch, or analyze competitor
//! market share. Stages communicate through plain CSV files.

mod csv_util;
mod demographics;
mod market;
mod resolve;

use clap::{Parser, Subcommand};
use thiserror::Error;

/// Errors from pipeline commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input column is missing.
    #[error("Input is missing required column '{name}'")]
    MissingColumn {
        /// The column that was expected.
        name: String,
    },
}

#[derive(Parser)]
#[command(name = "care_map_cli", about = "Facility data enrichment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve MSAs for a facility CSV (zip, city/state, or address
    /// columns) and append `msa_name`/`msa_code`/`msa_source` columns
    Resolve {
        /// Input facility CSV
        #[arg(long)]
        input: String,
        /// Output CSV with appended MSA columns
        #[arg(long)]
        output: String,
    },
    /// Fetch ACS demographics for every ZIP in a CSV and write the raw
    /// columns (one row per ZIP)
    FetchDemographics {
        /// Input CSV with a `zip` column
        #[arg(long)]
        input: String,
        /// Output raw demographics CSV
        #[arg(long)]
        output: String,
        /// ACS vintage year
        #[arg(long, default_value_t = care_map_demographics::acs::DEFAULT_YEAR)]
        year: u16,
        /// Census API key (optional; raises the daily request limit)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Aggregate and score a raw demographics CSV; writes composite
    /// scores, categories, and component scores
    Score {
        /// Input raw demographics CSV (from `fetch-demographics`)
        #[arg(long)]
        input: String,
        /// Output scored CSV
        #[arg(long)]
        output: String,
    },
    /// Analyze competitor market share from an interactions CSV
    /// (`zip`, `competitor` columns)
    Market {
        /// Input interactions CSV
        #[arg(long)]
        input: String,
        /// Output per-competitor share CSV
        #[arg(long)]
        shares: String,
        /// Output per-ZIP concentration CSV
        #[arg(long)]
        concentration: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { input, output } => resolve::run(&input, &output).await,
        Commands::FetchDemographics {
            input,
            output,
            year,
            api_key,
        } => demographics::fetch(&input, &output, year, api_key.as_deref()).await,
        Commands::Score { input, output } => demographics::score(&input, &output),
        Commands::Market {
            input,
            shares,
            concentration,
        } => market::run(&input, &shares, &concentration),
    }
}
