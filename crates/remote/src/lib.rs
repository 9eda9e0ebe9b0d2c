//! LeadHub Remote - HTTP implementation of the remote source boundary.
//!
//! Implements [`leadhub_core::LeadRemote`] against the dashboard's REST
//! API. This crate owns everything the core deliberately does not: URL
//! construction, query-string encoding, the response envelope, and the
//! request timeout policy. Every transport failure, non-success status,
//! and `success: false` envelope collapses into the single retryable
//! [`leadhub_core::RemoteError`] the core expects.

pub mod client;
pub mod models;

pub use client::{HttpLeadRemote, RemoteConfig};
