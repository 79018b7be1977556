// src/error.rs

use thiserror::Error;

/// Everything that can stop an estimate from being produced.
///
/// The core only ever raises `InvalidConfiguration` and `Cancelled`;
/// the remaining variants come from the host-side import/export helpers.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("simulation cancelled")]
    Cancelled,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario file error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
