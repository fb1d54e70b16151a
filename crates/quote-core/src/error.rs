use std::io;

use thiserror::Error;

/// Failure reported by a [`crate::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure raised by a [`crate::QuotationSubmitter`] before a response was received.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Transport(String),
}
