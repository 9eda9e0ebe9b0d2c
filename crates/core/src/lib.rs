//! LeadHub Core - lead synchronization and aggregation layer.
//!
//! This crate contains the state-management core behind the LeadHub
//! dashboard: normalization of the four intake channels into one canonical
//! lead shape, client-side filtering, rollup statistics with a daily trend,
//! periodic refresh scheduling, optimistic status mutation with rollback,
//! and CSV export. It is transport-agnostic and defines the [`LeadRemote`]
//! trait that is implemented by the `leadhub-remote` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod export;
pub mod leads;
pub mod stats;
pub mod utils;
pub mod view;

// Re-export common types from the leads and view modules
pub use leads::*;
pub use view::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
