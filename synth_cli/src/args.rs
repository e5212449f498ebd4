//! Command-line arguments for the synthetic snapshot CLI.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use strum_macros::{Display, EnumString};
use synth_common::batch::DEFAULT_WORKERS;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Aligned summary table.
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array of snapshots.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Generate deterministic synthetic market snapshots", long_about = None)]
pub struct Args {
    /// Ticker symbols, separated by spaces or commas (case-insensitive)
    pub tickers: Vec<String>,

    /// File with ticker symbols separated by commas, spaces or new lines
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the 30-day price history (table/csv)
    #[arg(long)]
    pub history: bool,

    /// Attach yearly and 30-day derived series (json)
    #[arg(long)]
    pub derived: bool,

    /// Order output by market-cap rank
    #[arg(long)]
    pub rank: bool,

    /// Generate as of this instant (RFC 3339 or YYYY-MM-DD) instead of now
    #[arg(long)]
    pub as_of: Option<String>,

    /// Worker threads used for generation
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}
