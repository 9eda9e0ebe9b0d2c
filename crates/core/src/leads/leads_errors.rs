use thiserror::Error;

use super::leads_model::LeadSource;

/// Errors raised while normalizing raw channel payloads.
///
/// A malformed record is skipped by the batch path; it never fails the
/// whole batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("malformed {channel} record: field '{field}' {detail}")]
    MalformedRecord {
        channel: LeadSource,
        field: &'static str,
        detail: String,
    },
}

impl IngestError {
    pub(crate) fn missing(source: LeadSource, field: &'static str) -> Self {
        IngestError::MalformedRecord {
            channel: source,
            field,
            detail: "is missing".to_string(),
        }
    }

    pub(crate) fn invalid(source: LeadSource, field: &'static str, detail: impl Into<String>) -> Self {
        IngestError::MalformedRecord {
            channel: source,
            field,
            detail: detail.into(),
        }
    }
}

/// Failure signaled by the remote source boundary.
///
/// The boundary reports a single binary outcome per call; the core treats
/// every failure as retryable and does not inspect a richer taxonomy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("remote source unavailable: {0}")]
    Unavailable(String),
}
