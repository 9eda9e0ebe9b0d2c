//! Leads module - canonical lead shape, ingestion, and filtering.

pub mod filter;
pub mod ingest;
mod leads_errors;
mod leads_model;
mod leads_traits;

// Re-export the public interface
pub use ingest::{normalize, normalize_batch, IngestWarning, NormalizedBatch, NormalizedRecord};
pub use ingest::{
    GoogleAdsPayload, InstagramAdsPayload, MetaAdsPayload, RawLeadRecord, WebsiteLeadPayload,
};
pub use leads_model::{Lead, LeadSource, LeadStatus, LeadsFilter, NewWebsiteLead};
pub use leads_traits::LeadRemote;

// Re-export error types for convenience
pub use leads_errors::{IngestError, RemoteError};
