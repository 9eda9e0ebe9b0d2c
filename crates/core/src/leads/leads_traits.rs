use async_trait::async_trait;

use super::ingest::RawLeadRecord;
use super::leads_errors::RemoteError;
use super::leads_model::{LeadSource, LeadStatus, LeadsFilter, NewWebsiteLead};
use crate::stats::SourceStats;

/// Boundary to the remote lead source.
///
/// Consumed, never implemented, by the core: the `leadhub-remote` crate
/// provides the HTTP-backed implementation, tests provide in-memory ones.
/// The boundary owns its own timeout policy; the core sees a timeout as an
/// ordinary [`RemoteError`].
#[async_trait]
pub trait LeadRemote: Send + Sync {
    /// Unified collection across all sources, filterable server-side.
    async fn fetch_leads(&self, filter: &LeadsFilter) -> Result<Vec<RawLeadRecord>, RemoteError>;

    /// One of the four fixed per-source collections.
    async fn fetch_leads_by_source(
        &self,
        source: LeadSource,
    ) -> Result<Vec<RawLeadRecord>, RemoteError>;

    /// Single-record lookup.
    async fn fetch_lead(&self, id: &str) -> Result<RawLeadRecord, RemoteError>;

    /// Pre-aggregated per-source stats feed.
    async fn fetch_stats(&self) -> Result<Vec<SourceStats>, RemoteError>;

    /// Single-record partial update of the triage status.
    async fn update_status(&self, id: &str, status: LeadStatus) -> Result<(), RemoteError>;

    /// Website intake pass-through; returns the created record.
    async fn create_website_lead(
        &self,
        payload: &NewWebsiteLead,
    ) -> Result<RawLeadRecord, RemoteError>;
}
