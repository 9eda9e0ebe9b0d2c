//! Ingestion of raw channel payloads into the canonical lead shape.
//!
//! Each of the four intake channels delivers its own payload vocabulary.
//! The unified feed tags every record with its `source`, which selects the
//! per-channel conversion below. Normalization is pure: identical input
//! always yields identical output, and no clock is read.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use super::leads_errors::IngestError;
use super::leads_model::{Lead, LeadSource, LeadStatus};

/// Raw lead record as delivered by the remote source, tagged by channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RawLeadRecord {
    Website(WebsiteLeadPayload),
    Facebook(MetaAdsPayload),
    Instagram(InstagramAdsPayload),
    Google(GoogleAdsPayload),
}

impl RawLeadRecord {
    pub fn source(&self) -> LeadSource {
        match self {
            RawLeadRecord::Website(_) => LeadSource::Website,
            RawLeadRecord::Facebook(_) => LeadSource::Facebook,
            RawLeadRecord::Instagram(_) => LeadSource::Instagram,
            RawLeadRecord::Google(_) => LeadSource::Google,
        }
    }
}

/// Direct form submission from the website.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteLeadPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub page: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// Meta (Facebook) lead-ads record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaAdsPayload {
    pub leadgen_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub campaign_name: Option<String>,
    pub adset_name: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub created_time: Option<String>,
}

/// Instagram story/reel-ads record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramAdsPayload {
    pub leadgen_id: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub campaign_name: Option<String>,
    pub placement: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub created_time: Option<String>,
}

/// Google Ads lead form record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsPayload {
    pub lead_id: Option<String>,
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub campaign: Option<String>,
    pub ad_group: Option<String>,
    pub geo_location: Option<String>,
    pub status: Option<String>,
    pub creation_time: Option<String>,
}

/// Warning raised while normalizing a record that was still usable.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestWarning {
    /// Upstream delivered a status outside the known five; the lead was
    /// kept with status coerced to `new`.
    UnknownStatus { lead_id: String, raw_status: String },
}

/// A canonical lead plus any warnings produced while converting it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub lead: Lead,
    pub warnings: Vec<IngestWarning>,
}

/// Outcome of normalizing a whole fetched collection.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub leads: Vec<Lead>,
    pub warnings: Vec<IngestWarning>,
    pub skipped: Vec<IngestError>,
}

/// Converts one raw record into exactly one canonical lead.
///
/// Fails with [`IngestError::MalformedRecord`] when a required field
/// (`id`, `status`, creation timestamp) is absent or of the wrong kind.
/// Unknown statuses coerce to `new` with an [`IngestWarning`]. Extra
/// fields upstream may add are dropped at decode time.
pub fn normalize(raw: &RawLeadRecord) -> Result<NormalizedRecord, IngestError> {
    match raw {
        RawLeadRecord::Website(p) => normalize_website(p),
        RawLeadRecord::Facebook(p) => normalize_facebook(p),
        RawLeadRecord::Instagram(p) => normalize_instagram(p),
        RawLeadRecord::Google(p) => normalize_google(p),
    }
}

/// Normalizes a fetched collection, isolating per-record failures.
///
/// Malformed records are logged and skipped; one bad record never discards
/// the batch. Relative ordering of surviving leads is preserved.
pub fn normalize_batch(raws: &[RawLeadRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for raw in raws {
        match normalize(raw) {
            Ok(record) => {
                batch.leads.push(record.lead);
                batch.warnings.extend(record.warnings);
            }
            Err(err) => {
                warn!("Skipping lead record: {}", err);
                batch.skipped.push(err);
            }
        }
    }
    batch
}

fn normalize_website(p: &WebsiteLeadPayload) -> Result<NormalizedRecord, IngestError> {
    let source = LeadSource::Website;
    let id = required(source, "id", &p.id)?;
    let created_at = parse_created_at(source, "createdAt", &p.created_at)?;
    let (status, warnings) = parse_status(source, &id, &p.status)?;

    Ok(NormalizedRecord {
        lead: Lead {
            id,
            display_name: p.name.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
            phone: p.phone.clone(),
            source,
            campaign: None,
            location: None,
            status,
            created_at,
        },
        warnings,
    })
}

fn normalize_facebook(p: &MetaAdsPayload) -> Result<NormalizedRecord, IngestError> {
    let source = LeadSource::Facebook;
    let id = required(source, "leadgen_id", &p.leadgen_id)?;
    let created_at = parse_created_at(source, "created_time", &p.created_time)?;
    let (status, warnings) = parse_status(source, &id, &p.status)?;

    Ok(NormalizedRecord {
        lead: Lead {
            id,
            display_name: p.full_name.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
            phone: p.phone_number.clone(),
            source,
            campaign: p.campaign_name.clone(),
            location: p.city.clone(),
            status,
            created_at,
        },
        warnings,
    })
}

fn normalize_instagram(p: &InstagramAdsPayload) -> Result<NormalizedRecord, IngestError> {
    let source = LeadSource::Instagram;
    let id = required(source, "leadgen_id", &p.leadgen_id)?;
    let created_at = parse_created_at(source, "created_time", &p.created_time)?;
    let (status, warnings) = parse_status(source, &id, &p.status)?;

    // Story/reel leads often carry only the handle, not a full name
    let display_name = p
        .full_name
        .clone()
        .or_else(|| p.username.clone())
        .unwrap_or_default();

    Ok(NormalizedRecord {
        lead: Lead {
            id,
            display_name,
            email: p.email.clone().unwrap_or_default(),
            phone: p.phone_number.clone(),
            source,
            campaign: p.campaign_name.clone(),
            location: p.city.clone(),
            status,
            created_at,
        },
        warnings,
    })
}

fn normalize_google(p: &GoogleAdsPayload) -> Result<NormalizedRecord, IngestError> {
    let source = LeadSource::Google;
    let id = required(source, "leadId", &p.lead_id)?;
    let created_at = parse_created_at(source, "creationTime", &p.creation_time)?;
    let (status, warnings) = parse_status(source, &id, &p.status)?;

    Ok(NormalizedRecord {
        lead: Lead {
            id,
            display_name: p.full_name.clone().unwrap_or_default(),
            email: p.email_address.clone().unwrap_or_default(),
            phone: p.phone_number.clone(),
            source,
            campaign: p.campaign.clone(),
            location: p.geo_location.clone(),
            status,
            created_at,
        },
        warnings,
    })
}

fn required(
    source: LeadSource,
    field: &'static str,
    value: &Option<String>,
) -> Result<String, IngestError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        Some(_) => Err(IngestError::invalid(source, field, "is empty")),
        None => Err(IngestError::missing(source, field)),
    }
}

fn parse_created_at(
    source: LeadSource,
    field: &'static str,
    value: &Option<String>,
) -> Result<DateTime<Utc>, IngestError> {
    let raw = value
        .as_deref()
        .ok_or_else(|| IngestError::missing(source, field))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| IngestError::invalid(source, field, "is not an RFC 3339 timestamp"))
}

fn parse_status(
    source: LeadSource,
    lead_id: &str,
    value: &Option<String>,
) -> Result<(LeadStatus, Vec<IngestWarning>), IngestError> {
    let raw = value
        .as_deref()
        .ok_or_else(|| IngestError::missing(source, "status"))?;
    match LeadStatus::parse(raw) {
        Some(status) => Ok((status, Vec::new())),
        None => Ok((
            LeadStatus::New,
            vec![IngestWarning::UnknownStatus {
                lead_id: lead_id.to_string(),
                raw_status: raw.to_string(),
            }],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn website_payload() -> WebsiteLeadPayload {
        WebsiteLeadPayload {
            id: Some("6650f1".to_string()),
            name: Some("Asha Verma".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("+91-98100-00000".to_string()),
            message: Some("Interested in a demo".to_string()),
            page: Some("/pricing".to_string()),
            status: Some("new".to_string()),
            created_at: Some("2025-06-01T09:30:00Z".to_string()),
        }
    }

    #[test]
    fn test_website_record_normalizes() {
        let record = normalize(&RawLeadRecord::Website(website_payload())).unwrap();
        assert!(record.warnings.is_empty());
        assert_eq!(record.lead.id, "6650f1");
        assert_eq!(record.lead.display_name, "Asha Verma");
        assert_eq!(record.lead.source, LeadSource::Website);
        assert_eq!(record.lead.status, LeadStatus::New);
        assert_eq!(record.lead.campaign, None);
    }

    #[test]
    fn test_meta_record_maps_campaign_and_city() {
        let raw = RawLeadRecord::Facebook(MetaAdsPayload {
            leadgen_id: Some("fb-889".to_string()),
            full_name: Some("Rohit Shah".to_string()),
            email: Some("rohit@example.com".to_string()),
            phone_number: None,
            campaign_name: Some("Diwali Sale".to_string()),
            adset_name: Some("Lookalike 2%".to_string()),
            city: Some("Mumbai".to_string()),
            status: Some("contacted".to_string()),
            created_time: Some("2025-06-02T12:00:00+05:30".to_string()),
        });
        let lead = normalize(&raw).unwrap().lead;
        assert_eq!(lead.campaign.as_deref(), Some("Diwali Sale"));
        assert_eq!(lead.location.as_deref(), Some("Mumbai"));
        assert_eq!(lead.status, LeadStatus::Contacted);
        // +05:30 offset lands at 06:30 UTC
        assert_eq!(lead.created_at.to_rfc3339(), "2025-06-02T06:30:00+00:00");
    }

    #[test]
    fn test_instagram_falls_back_to_username() {
        let raw = RawLeadRecord::Instagram(InstagramAdsPayload {
            leadgen_id: Some("ig-12".to_string()),
            username: Some("@asha.design".to_string()),
            full_name: None,
            status: Some("new".to_string()),
            created_time: Some("2025-06-03T08:00:00Z".to_string()),
            ..Default::default()
        });
        let lead = normalize(&raw).unwrap().lead;
        assert_eq!(lead.display_name, "@asha.design");
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let mut payload = website_payload();
        payload.id = None;
        let err = normalize(&RawLeadRecord::Website(payload)).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedRecord { field: "id", .. }
        ));
    }

    #[test]
    fn test_wrong_kind_timestamp_is_malformed() {
        let mut payload = website_payload();
        payload.created_at = Some("yesterday".to_string());
        let err = normalize(&RawLeadRecord::Website(payload)).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedRecord {
                field: "createdAt",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_status_coerces_with_warning() {
        let mut payload = website_payload();
        payload.status = Some("nurturing".to_string());
        let record = normalize(&RawLeadRecord::Website(payload)).unwrap();
        assert_eq!(record.lead.status, LeadStatus::New);
        assert_eq!(
            record.warnings,
            vec![IngestWarning::UnknownStatus {
                lead_id: "6650f1".to_string(),
                raw_status: "nurturing".to_string(),
            }]
        );
    }

    #[test]
    fn test_absent_status_is_malformed_not_coerced() {
        let mut payload = website_payload();
        payload.status = None;
        let err = normalize(&RawLeadRecord::Website(payload)).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MalformedRecord {
                field: "status",
                ..
            }
        ));
    }

    #[test]
    fn test_batch_isolates_malformed_records() {
        let good = RawLeadRecord::Website(website_payload());
        let mut bad_payload = website_payload();
        bad_payload.id = None;
        let bad = RawLeadRecord::Website(bad_payload);

        let batch = normalize_batch(&[good.clone(), bad, good]);
        assert_eq!(batch.leads.len(), 2);
        assert_eq!(batch.skipped.len(), 1);
    }

    #[test]
    fn test_unknown_extra_fields_are_dropped() {
        let json = r#"{
            "source": "website",
            "id": "w-1",
            "name": "A",
            "email": "a@x.com",
            "status": "new",
            "createdAt": "2025-06-01T00:00:00Z",
            "utmTags": {"medium": "organic"},
            "score": 42
        }"#;
        let raw: RawLeadRecord = serde_json::from_str(json).unwrap();
        let lead = normalize(&raw).unwrap().lead;
        assert_eq!(lead.id, "w-1");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = normalize(&RawLeadRecord::Website(website_payload()))
            .unwrap()
            .lead;

        // Re-encode the canonical lead as its raw shape and run it through
        // the normalizer again: the output must be byte-identical.
        let round_trip = RawLeadRecord::Website(WebsiteLeadPayload {
            id: Some(first.id.clone()),
            name: Some(first.display_name.clone()),
            email: Some(first.email.clone()),
            phone: first.phone.clone(),
            message: None,
            page: None,
            status: Some(first.status.as_str().to_string()),
            created_at: Some(first.created_at.to_rfc3339()),
        });
        let second = normalize(&round_trip).unwrap().lead;

        let a = serde_json::to_vec(&first).unwrap();
        let b = serde_json::to_vec(&second).unwrap();
        assert_eq!(a, b);
    }
}
