//! Core error types for the LeadHub dashboard.
//!
//! This module defines the root error type. Per-module errors (ingestion,
//! remote boundary, mutation coordination) are declared next to the code
//! that raises them and wrapped here via `#[from]`.

use thiserror::Error;

use crate::leads::{IngestError, RemoteError};
use crate::view::MutationError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the lead synchronization layer.
///
/// Nothing in this layer is globally fatal: a malformed record is skipped,
/// a failed poll cycle is retried on the next interval, and a rejected
/// mutation is rolled back. The worst user-visible outcome is a stale or
/// reverted display.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Remote source operation failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Lead ingestion failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Status mutation failed: {0}")]
    Mutation(#[from] MutationError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

// === From implementations for common error types ===

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
