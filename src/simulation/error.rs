//! Error types for configuration loading.
//!
//! Race results are never errors: a race nobody wins ends in
//! [`RaceOutcome::PopulationLost`](super::outcome::RaceOutcome::PopulationLost).

use thiserror::Error;

/// Errors raised while reading or writing a parameter file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid parameter JSON.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
