//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `SynthError`, so functions can simply return `Result<T>`.
use crate::error::SynthError;

/// Workspace-wide `Result` alias with `SynthError` as the default error.
pub type Result<T, E = SynthError> = std::result::Result<T, E>;
