use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for display dates.
/// This is the canonical timezone used to convert UTC instants to the
/// calendar days shown on the dashboard. The deployment this layer serves
/// operates in India, so Asia/Kolkata is the default.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Converts a UTC instant to a calendar day in the given timezone.
///
/// This is the single source of truth for bucketing instants into days.
/// Trend buckets compare dates produced here, never elapsed-time spans, so
/// daylight-saving transitions cannot shift a lead into a neighboring day.
pub fn display_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's calendar day in the given display timezone.
pub fn display_date_today(tz: Tz) -> NaiveDate {
    display_date_from_utc(Utc::now(), tz)
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        if let Some(next) = current.succ_opt() {
            current = next;
        } else {
            // Should not happen for typical date ranges
            break;
        }
    }
    days
}
