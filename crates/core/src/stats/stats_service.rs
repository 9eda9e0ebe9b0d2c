//! Derivation of rollup counters and the daily lead trend.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use super::stats_model::{LeadStatsSummary, SourceStats, TrendPoint};
use crate::leads::{Lead, LeadSource};
use crate::utils::time_utils::{display_date_from_utc, display_date_today, get_days_between};

/// Derives the dashboard rollup from the raw stats feed and a
/// recent-leads window.
///
/// `today` anchors the trend window; the caller passes it explicitly so
/// the derivation itself reads no clock. Trend buckets are keyed by
/// calendar-date equality in `tz`, not elapsed-time math.
pub fn aggregate(
    buckets: &[SourceStats],
    recent_leads: &[Lead],
    window_days: u32,
    today: NaiveDate,
    tz: Tz,
) -> LeadStatsSummary {
    let total_leads: u64 = buckets.iter().map(|b| b.count).sum();
    let total_new: u64 = buckets.iter().map(|b| b.new_count).sum();
    let total_converted: u64 = buckets.iter().map(|b| b.converted_count).sum();

    // Never divides by zero; an empty feed reports a defined 0.0
    let conversion_rate_percent = if total_leads > 0 {
        round1(total_converted as f64 * 100.0 / total_leads as f64)
    } else {
        0.0
    };

    LeadStatsSummary {
        total_leads,
        total_new,
        total_converted,
        conversion_rate_percent,
        per_source: per_source_breakdown(buckets),
        trend: build_trend(recent_leads, window_days, today, tz),
    }
}

/// Convenience wrapper anchoring the trend at today in `tz`.
pub fn aggregate_now(
    buckets: &[SourceStats],
    recent_leads: &[Lead],
    window_days: u32,
    tz: Tz,
) -> LeadStatsSummary {
    aggregate(buckets, recent_leads, window_days, display_date_today(tz), tz)
}

/// Folds the feed into one entry per source in canonical order.
///
/// A channel missing from the feed still appears with zero counts, so the
/// presentation layer never needs per-source null checks. A duplicated
/// bucket sums rather than shadowing.
fn per_source_breakdown(buckets: &[SourceStats]) -> Vec<SourceStats> {
    LeadSource::ALL
        .iter()
        .map(|&source| {
            buckets
                .iter()
                .filter(|b| b.source == source)
                .fold(SourceStats::zero(source), |acc, b| SourceStats {
                    source,
                    count: acc.count + b.count,
                    new_count: acc.new_count + b.new_count,
                    converted_count: acc.converted_count + b.converted_count,
                })
        })
        .collect()
}

fn build_trend(
    recent_leads: &[Lead],
    window_days: u32,
    today: NaiveDate,
    tz: Tz,
) -> Vec<TrendPoint> {
    if window_days == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for lead in recent_leads {
        *counts
            .entry(display_date_from_utc(lead.created_at, tz))
            .or_insert(0) += 1;
    }

    let start = today - Duration::days(i64::from(window_days) - 1);
    get_days_between(start, today)
        .into_iter()
        .map(|date| TrendPoint {
            date,
            date_label: date.format("%-d %b").to_string(),
            lead_count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
