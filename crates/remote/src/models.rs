//! Wire models for the dashboard REST API.

use serde::Deserialize;

use leadhub_core::stats::SourceStats;
use leadhub_core::{LeadSource, RemoteError};

/// Envelope every endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, collapsing `success: false` and a missing
    /// body into the boundary's single failure outcome.
    pub fn into_data(self) -> Result<T, RemoteError> {
        if !self.success {
            return Err(RemoteError::Unavailable(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| RemoteError::Unavailable("response carried no data".to_string()))
    }
}

/// Per-source bucket as the aggregation endpoint reports it.
///
/// The feed keys buckets by `_id` and uses its own counter names; this is
/// converted to the domain shape before the core ever sees it.
#[derive(Debug, Clone, Deserialize)]
pub struct StatBucketWire {
    #[serde(rename = "_id")]
    pub source: String,
    pub count: u64,
    #[serde(rename = "newLeads", default)]
    pub new_leads: u64,
    #[serde(rename = "converted", default)]
    pub converted: u64,
}

impl StatBucketWire {
    /// Converts to the domain bucket; `None` for a source this build does
    /// not recognize.
    pub fn into_domain(self) -> Option<SourceStats> {
        let source = LeadSource::parse(&self.source)?;
        Some(SourceStats {
            source,
            count: self.count,
            new_count: self.new_leads,
            converted_count: self.converted,
        })
    }
}
