//! Lead domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Intake channel a lead arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Website,
    Facebook,
    Instagram,
    Google,
}

impl LeadSource {
    /// Canonical ordering used for per-source breakdowns and displays.
    pub const ALL: [LeadSource; 4] = [
        LeadSource::Website,
        LeadSource::Facebook,
        LeadSource::Instagram,
        LeadSource::Google,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Facebook => "facebook",
            LeadSource::Instagram => "instagram",
            LeadSource::Google => "google",
        }
    }

    pub fn parse(s: &str) -> Option<LeadSource> {
        match s.to_ascii_lowercase().as_str() {
            "website" => Some(LeadSource::Website),
            "facebook" => Some(LeadSource::Facebook),
            "instagram" => Some(LeadSource::Instagram),
            "google" => Some(LeadSource::Google),
            _ => None,
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage status of a lead.
///
/// Always one of the five enumerated values on a canonical lead, never
/// absent. Upstream may introduce statuses this build does not know; the
/// normalizer coerces those to `New` rather than rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Rejected,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<LeadStatus> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "qualified" => Some(LeadStatus::Qualified),
            "converted" => Some(LeadStatus::Converted),
            "rejected" => Some(LeadStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical lead record used internally after ingestion.
///
/// `id` is an opaque server-assigned identifier, stable across refreshes
/// and unique within any collection snapshot. Every field except `status`
/// is read-only from this layer's point of view; leads are never deleted
/// locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub source: LeadSource,
    pub campaign: Option<String>,
    pub location: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

/// Filter specification applied to a lead collection.
///
/// `None` on any field means "no constraint on this field", never "match
/// nothing". For `limit`, `None` is the explicit no-limit sentinel;
/// `Some(0)` yields an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadsFilter {
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl LeadsFilter {
    /// Filter that only bounds the result-set size.
    pub fn limited(limit: usize) -> Self {
        LeadsFilter {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// True when every field is unconstrained.
    pub fn is_unconstrained(&self) -> bool {
        self == &LeadsFilter::default()
    }
}

/// Payload for the website intake pass-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWebsiteLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub page: Option<String>,
}
