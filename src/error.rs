// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Everything that can go wrong while setting up or running a simulation.
///
/// Configuration problems are reported before any simulation work starts.
/// Nothing here is transient, so callers never retry.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid distribution table '{table}': {details}")]
    InvalidDistribution { table: String, details: String },

    #[error("invalid policy parameters: {details}")]
    InvalidPolicy { details: String },

    #[error("invalid simulation config: {details}")]
    InvalidConfig { details: String },

    #[error("failed to parse config file {path}: {details}")]
    ConfigParse { path: PathBuf, details: String },

    #[error("cannot sample from an empty distribution table")]
    Sampling,

    #[error("not enough data for {context}: need at least {needed}, got {got}")]
    InsufficientData {
        context: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("statistics failure in {context}: {details}")]
    Statistics {
        context: &'static str,
        details: String,
    },

    #[error("IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV failure at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SimError {
    /// True for errors raised while validating inputs, before any run starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidDistribution { .. }
                | Self::InvalidPolicy { .. }
                | Self::InvalidConfig { .. }
                | Self::ConfigParse { .. }
        )
    }

    pub(crate) fn invalid_distribution(table: &str, details: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            table: table.to_string(),
            details: details.into(),
        }
    }

    pub(crate) fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }
}
