//! Unit tests for the stats aggregator.

use super::*;
use crate::leads::{Lead, LeadSource, LeadStatus};
use crate::utils::time_utils::DEFAULT_DISPLAY_TZ;
use chrono::{NaiveDate, TimeZone, Utc};

fn bucket(source: LeadSource, count: u64, new_count: u64, converted_count: u64) -> SourceStats {
    SourceStats {
        source,
        count,
        new_count,
        converted_count,
    }
}

fn lead_on(id: &str, y: i32, m: u32, d: u32) -> Lead {
    Lead {
        id: id.to_string(),
        display_name: format!("Lead {}", id),
        email: format!("{}@example.com", id),
        phone: None,
        source: LeadSource::Website,
        campaign: None,
        location: None,
        status: LeadStatus::New,
        // 04:30 UTC is 10:00 in Asia/Kolkata, safely the same calendar day
        created_at: Utc.with_ymd_and_hms(y, m, d, 4, 30, 0).unwrap(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_rollup_worked_example() {
    let buckets = vec![
        bucket(LeadSource::Website, 10, 4, 2),
        bucket(LeadSource::Google, 5, 1, 1),
    ];
    let summary = aggregate(&buckets, &[], 7, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);

    assert_eq!(summary.total_leads, 15);
    assert_eq!(summary.total_new, 5);
    assert_eq!(summary.total_converted, 3);
    assert_eq!(summary.conversion_rate_percent, 20.0);
}

#[test]
fn test_empty_feed_has_defined_conversion_rate() {
    let summary = aggregate(&[], &[], 7, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);
    assert_eq!(summary.total_leads, 0);
    assert_eq!(summary.conversion_rate_percent, 0.0);
}

#[test]
fn test_conversion_rate_rounds_to_one_decimal() {
    let buckets = vec![bucket(LeadSource::Website, 3, 0, 1)];
    let summary = aggregate(&buckets, &[], 7, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);
    assert_eq!(summary.conversion_rate_percent, 33.3);
}

#[test]
fn test_missing_sources_are_zero_filled_in_order() {
    let buckets = vec![bucket(LeadSource::Instagram, 7, 2, 1)];
    let summary = aggregate(&buckets, &[], 7, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);

    let sources: Vec<LeadSource> = summary.per_source.iter().map(|s| s.source).collect();
    assert_eq!(sources, LeadSource::ALL.to_vec());
    assert_eq!(summary.per_source[0], SourceStats::zero(LeadSource::Website));
    assert_eq!(summary.per_source[2].count, 7);
}

#[test]
fn test_duplicate_buckets_sum() {
    let buckets = vec![
        bucket(LeadSource::Google, 3, 1, 0),
        bucket(LeadSource::Google, 2, 0, 1),
    ];
    let summary = aggregate(&buckets, &[], 7, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);
    assert_eq!(summary.per_source[3].count, 5);
    assert_eq!(summary.per_source[3].new_count, 1);
    assert_eq!(summary.per_source[3].converted_count, 1);
}

#[test]
fn test_trend_covers_window_ending_today() {
    let today = date(2025, 6, 10);
    let leads = vec![
        lead_on("a", 2025, 6, 10),
        lead_on("b", 2025, 6, 10),
        lead_on("c", 2025, 6, 8),
        // Outside the 7-day window, must not be counted
        lead_on("d", 2025, 6, 1),
    ];
    let summary = aggregate(&[], &leads, 7, today, DEFAULT_DISPLAY_TZ);

    assert_eq!(summary.trend.len(), 7);
    assert_eq!(summary.trend.first().unwrap().date, date(2025, 6, 4));
    assert_eq!(summary.trend.last().unwrap().date, today);

    // Dates are distinct and ascending
    for pair in summary.trend.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }

    let counts: Vec<u64> = summary.trend.iter().map(|p| p.lead_count).collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 1, 0, 2]);
}

#[test]
fn test_trend_buckets_by_display_calendar_day() {
    let today = date(2025, 6, 10);
    // 22:00 UTC on June 9 is already June 10 in Asia/Kolkata
    let late = Lead {
        created_at: Utc.with_ymd_and_hms(2025, 6, 9, 22, 0, 0).unwrap(),
        ..lead_on("x", 2025, 6, 9)
    };
    let summary = aggregate(&[], &[late], 7, today, DEFAULT_DISPLAY_TZ);
    assert_eq!(summary.trend.last().unwrap().lead_count, 1);
    assert_eq!(summary.trend[5].lead_count, 0);
}

#[test]
fn test_trend_labels_use_short_month() {
    let summary = aggregate(&[], &[], 1, date(2025, 6, 5), DEFAULT_DISPLAY_TZ);
    assert_eq!(summary.trend[0].date_label, "5 Jun");
}

#[test]
fn test_zero_window_yields_empty_trend() {
    let summary = aggregate(&[], &[], 0, date(2025, 6, 10), DEFAULT_DISPLAY_TZ);
    assert!(summary.trend.is_empty());
}
