//! Statistics domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::leads::LeadSource;

/// Per-source counters as supplied by the remote aggregation feed.
///
/// The tallies are independent: a lead that moved through intermediate
/// statuses may be counted in neither `new_count` nor `converted_count`,
/// so no cross-check between the three fields is performed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStats {
    pub source: LeadSource,
    pub count: u64,
    pub new_count: u64,
    pub converted_count: u64,
}

impl SourceStats {
    pub fn zero(source: LeadSource) -> Self {
        SourceStats {
            source,
            count: 0,
            new_count: 0,
            converted_count: 0,
        }
    }
}

/// One calendar day of the trailing lead trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short display label, e.g. "5 Jun"
    pub date_label: String,
    pub lead_count: u64,
}

/// Rollup derived from the stats feed plus a recent-leads window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatsSummary {
    pub total_leads: u64,
    pub total_new: u64,
    pub total_converted: u64,
    /// Percentage rounded to one decimal; 0.0 when there are no leads
    pub conversion_rate_percent: f64,
    /// Always one entry per source in canonical order, zero-filled for
    /// channels that produced nothing
    pub per_source: Vec<SourceStats>,
    /// Oldest first, one point per day, today is the last point
    pub trend: Vec<TrendPoint>,
}
