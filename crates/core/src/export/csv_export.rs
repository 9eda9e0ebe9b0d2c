//! CSV serialization of a lead collection.
//!
//! Pure: rows come out in the input's order and no clock is read. The
//! date stamp in the suggested filename is an explicit input.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::errors::{Error, Result};
use crate::leads::Lead;
use crate::utils::time_utils::display_date_from_utc;

/// Fixed column set of the exchange file.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Name", "Email", "Phone", "Source", "Campaign", "Status", "Date",
];

/// Renders leads as a delimited table, one data row per lead in input
/// order.
///
/// Absent `phone`/`campaign` render as empty strings. Field values
/// containing the delimiter or a line break are quoted per RFC 4180 by
/// the writer, so an embedded comma can never shift column alignment.
pub fn serialize_leads(leads: &[Lead], tz: Tz) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for lead in leads {
        let date = display_date_from_utc(lead.created_at, tz)
            .format("%Y-%m-%d")
            .to_string();
        writer.write_record([
            lead.display_name.as_str(),
            lead.email.as_str(),
            lead.phone.as_deref().unwrap_or(""),
            lead.source.as_str(),
            lead.campaign.as_deref().unwrap_or(""),
            lead.status.as_str(),
            date.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Suggested artifact name, e.g. `leads-2025-06-01.csv`. The date is an
/// explicit input, never an implicit clock read.
pub fn export_filename(date: NaiveDate) -> String {
    format!("leads-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{LeadSource, LeadStatus};
    use crate::utils::time_utils::DEFAULT_DISPLAY_TZ;
    use chrono::{TimeZone, Utc};

    fn lead(name: &str, email: &str, status: LeadStatus) -> Lead {
        Lead {
            id: format!("id-{}", email),
            display_name: name.to_string(),
            email: email.to_string(),
            phone: None,
            source: LeadSource::Website,
            campaign: None,
            location: None,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_header_and_row_per_lead_in_order() {
        let leads = vec![
            lead("A, Inc", "a@x.com", LeadStatus::New),
            lead("B", "b@x.com", LeadStatus::Converted),
        ];
        let csv = serialize_leads(&leads, DEFAULT_DISPLAY_TZ).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Email,Phone,Source,Campaign,Status,Date");
        // The embedded comma is quoted, keeping columns aligned
        assert_eq!(lines[1], "\"A, Inc\",a@x.com,,website,,new,2025-06-01");
        assert_eq!(lines[2], "B,b@x.com,,website,,converted,2025-06-01");
    }

    #[test]
    fn test_embedded_newline_is_quoted() {
        let mut tricky = lead("Line\nBreak", "n@x.com", LeadStatus::New);
        tricky.campaign = Some("Summer \"25\"".to_string());
        let csv = serialize_leads(&[tricky], DEFAULT_DISPLAY_TZ).unwrap();

        assert!(csv.contains("\"Line\nBreak\""));
        assert!(csv.contains("\"Summer \"\"25\"\"\""));
    }

    #[test]
    fn test_optional_fields_render_empty() {
        let mut with_phone = lead("C", "c@x.com", LeadStatus::Contacted);
        with_phone.phone = Some("+91-98100-00000".to_string());
        with_phone.campaign = Some("Search Brand".to_string());
        let csv = serialize_leads(&[with_phone], DEFAULT_DISPLAY_TZ).unwrap();
        assert!(csv.contains("+91-98100-00000"));
        assert!(csv.contains("Search Brand"));

        let bare = lead("D", "d@x.com", LeadStatus::New);
        let csv = serialize_leads(&[bare], DEFAULT_DISPLAY_TZ).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains(",,website,,"));
    }

    #[test]
    fn test_empty_collection_is_header_only() {
        let csv = serialize_leads(&[], DEFAULT_DISPLAY_TZ).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_date_column_uses_display_timezone() {
        // 22:00 UTC is already the next day in Asia/Kolkata
        let mut late = lead("E", "e@x.com", LeadStatus::New);
        late.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap();
        let csv = serialize_leads(&[late], DEFAULT_DISPLAY_TZ).unwrap();
        assert!(csv.contains("2025-06-02"));
    }

    #[test]
    fn test_export_filename_stamps_given_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(export_filename(date), "leads-2025-06-01.csv");
    }
}
