//!
//! Deterministic synthetic market data for company dashboards.
//!
//! This crate aggregates:
//! - `seed` / `prng` — FNV-1a seeds and the Mulberry32 stream they drive.
//! - `rounding` — the rounding rules every generated number goes through.
//! - `clock` — injected time source (`SystemClock`, `FixedClock`).
//! - `model` — `SyntheticPriceData` and its parts.
//! - `generator` — ticker → snapshot, the core of the crate.
//! - `series` — yearly and 30-day series derived from a snapshot.
//! - `cache` — ticker-keyed memo of snapshots.
//! - `batch` — worker pool for many tickers.
//! - `ranking` — market-cap ranks.
//! - `format` — USD/compact/percent renderings.
//! - `tickers` — ticker symbols and list parsing.
//! - `error` / `result` — `SynthError` and the `Result` alias.
#![warn(missing_docs)]

pub mod batch;
pub mod cache;
pub mod clock;
pub mod error;
pub mod format;
pub mod generator;
pub mod model;
pub mod prng;
pub mod ranking;
pub mod result;
pub mod rounding;
pub mod seed;
pub mod series;
pub mod tickers;

pub use error::SynthError;
pub use result::Result;
pub use generator::{generate, generate_at, SyntheticSeriesGenerator};
pub use model::SyntheticPriceData;
pub use tickers::Ticker;
