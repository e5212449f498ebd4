//! Synth CLI — generates deterministic synthetic market snapshots for a list of
//! tickers and prints them as a table, CSV or JSON.
//!
//! Usage example:
//! ```bash
//! synth AAPL msft,nvda --format json --derived
//! synth --path ./tickers.txt --rank --as-of 2026-10-19T12:00:00Z
//! ```
//!
//! The ticker file should contain symbols separated by commas, spaces, or new
//! lines. Logging goes to stderr; set `RUST_LOG=debug` for per-ticker detail.
#![warn(missing_docs)]
mod args;
mod printer;

use crate::args::Args;
use crate::printer::{PrintOptions, Printer};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::Parser;
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use synth_common::batch::BatchGenerator;
use synth_common::clock::{Clock, SystemClock};
use synth_common::tickers::{Ticker, TickerParser};
use synth_common::{Result, SynthError};

fn main() -> Result<(), SynthError> {
    init_logger();
    let args = Args::parse();

    let tickers = collect_tickers(&args)?;
    if tickers.is_empty() {
        warn!("No tickers given; pass symbols as arguments or use --path");
        return Ok(());
    }
    info!("Tickers: {:?}", tickers.iter().map(Ticker::as_str).collect::<Vec<_>>());

    let now = match args.as_of.as_deref() {
        Some(raw) => parse_as_of(raw)?,
        None => SystemClock.now(),
    };
    info!("Generating {} snapshot(s) as of {} with {} worker(s)", tickers.len(), now, args.workers);

    let snapshots = BatchGenerator::new(args.workers).generate_all(&tickers, now)?;

    let printer = Printer::new(PrintOptions {
        format: args.format,
        history: args.history,
        derived: args.derived,
        rank: args.rank,
        current_year: now.year(),
    });
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = printer.write(&mut out, &snapshots) {
        error!("Failed to write {} output: {}", args.format, e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Tickers from positional arguments followed by the ones in `--path`.
fn collect_tickers(args: &Args) -> Result<Vec<Ticker>, SynthError> {
    let mut tickers = Ticker::parse_list(&args.tickers.join(" "))?;

    if let Some(raw) = &args.path {
        let file_path = normalize_path(raw);
        if !is_file_exist(&file_path) {
            return Err(SynthError::Format(format!(
                "ticker file not found: {}",
                file_path.display()
            )));
        }
        let file = File::open(&file_path)?;
        let from_file = Ticker::parse_from_file(BufReader::new(file))?;
        info!("Read {} ticker(s) from {}", from_file.len(), file_path.display());
        tickers.extend(from_file);
    }
    Ok(tickers)
}

/// RFC 3339 instant, or a bare `YYYY-MM-DD` meaning midnight UTC.
fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, SynthError> {
    let trimmed = raw.trim();
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
            Err(_) => Err(SynthError::Timestamp(rfc_err)),
        },
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
