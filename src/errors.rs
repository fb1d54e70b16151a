use std::path::PathBuf;

use quote_config::ConfigError;
use quote_core::StorageError;
use thiserror::Error;

/// Failures surfaced by `quote_cli` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("cannot read `{path}`: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    InvalidArguments(String),
    #[error("step {step} ({title}) has {count} error(s)")]
    StepInvalid {
        step: u8,
        title: String,
        count: usize,
    },
    #[error("the quotation request could not be submitted")]
    SubmissionFailed,
    #[error("wizard cancelled")]
    Cancelled,
}
