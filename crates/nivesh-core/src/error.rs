//! Error types for Nivesh

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing input supplied by the caller
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unexpected failure inside an aggregation; no partial results survive
    #[error("Computation error: {0}")]
    Computation(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, Error>;
