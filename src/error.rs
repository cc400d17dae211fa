//! Error taxonomy for submission intake and storage.
//!
//! Provider failures never reach these types: the enrichment client absorbs
//! them and reports an unavailable result instead.
use std::path::PathBuf;
use thiserror::Error;

/// Backing-file failures. Read errors must be shown, never papered over with
/// an empty table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read submissions from {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
    #[error("write submissions to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

/// Failures that stop a submission from being saved.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("review cannot be empty")]
    EmptyReview,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// A single failed provider attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<ureq::Error> for ProviderError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => ProviderError::Status(code),
            ureq::Error::Timeout(_) => ProviderError::Timeout,
            ureq::Error::Json(err) => ProviderError::Malformed(err.to_string()),
            other => ProviderError::Transport(other.to_string()),
        }
    }
}
