//! Domain event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::leads::{LeadSource, LeadStatus};

/// Events emitted by the sync layer as work lands or fails.
///
/// These are facts, not commands: presentation adapters translate them
/// into toasts, badges, or log lines as they see fit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeadEvent {
    /// A refresh cycle landed and replaced the view snapshot.
    LeadsRefreshed {
        /// Per-source page, or `None` for the unified view
        source: Option<LeadSource>,
        lead_count: usize,
        skipped_count: usize,
        synced_at: DateTime<Utc>,
    },

    /// A refresh cycle failed; the previous snapshot stays on display.
    RefreshFailed { message: String },

    /// Upstream delivered an unrecognized status; the lead was kept with
    /// status coerced to `new`.
    UnknownStatusCoerced { lead_id: String, raw_status: String },

    /// A status mutation was confirmed by the remote source.
    StatusCommitted { lead_id: String, status: LeadStatus },

    /// A status mutation was declined or lost; the local value was rolled
    /// back. Emitted exactly once per failed submission.
    StatusUpdateFailed { lead_id: String, message: String },
}

impl LeadEvent {
    /// Creates a LeadsRefreshed event.
    pub fn leads_refreshed(
        source: Option<LeadSource>,
        lead_count: usize,
        skipped_count: usize,
        synced_at: DateTime<Utc>,
    ) -> Self {
        Self::LeadsRefreshed {
            source,
            lead_count,
            skipped_count,
            synced_at,
        }
    }

    /// Creates a RefreshFailed event.
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }

    /// Creates an UnknownStatusCoerced event.
    pub fn unknown_status_coerced(lead_id: impl Into<String>, raw_status: impl Into<String>) -> Self {
        Self::UnknownStatusCoerced {
            lead_id: lead_id.into(),
            raw_status: raw_status.into(),
        }
    }

    /// Creates a StatusCommitted event.
    pub fn status_committed(lead_id: impl Into<String>, status: LeadStatus) -> Self {
        Self::StatusCommitted {
            lead_id: lead_id.into(),
            status,
        }
    }

    /// Creates a StatusUpdateFailed event.
    pub fn status_update_failed(lead_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StatusUpdateFailed {
            lead_id: lead_id.into(),
            message: message.into(),
        }
    }
}
