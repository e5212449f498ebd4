//! Error types shared by the generator library and the command line front end.
//!
//! The generator itself is total; `SynthError` covers everything around it:
//! reading ticker lists, parsing timestamps, JSON encoding, the batch worker
//! channels and the snapshot cache lock.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum SynthError {
    /// I/O error originating from the standard library (files, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a ticker list into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Invalid `--as-of` style timestamp.
    #[error("Timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for SynthError {
    fn from(err: PoisonError<T>) -> Self {
        SynthError::MutexLock(err.to_string())
    }
}
