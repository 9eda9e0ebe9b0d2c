//! Reqwest-backed client for the dashboard REST API.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

use leadhub_core::ingest::{
    GoogleAdsPayload, InstagramAdsPayload, MetaAdsPayload, RawLeadRecord, WebsiteLeadPayload,
};
use leadhub_core::stats::SourceStats;
use leadhub_core::{LeadRemote, LeadSource, LeadStatus, LeadsFilter, NewWebsiteLead, RemoteError};

use crate::models::{ApiEnvelope, StatBucketWire};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the HTTP boundary.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: Url,
    /// Per-request timeout; a timeout surfaces to the core as an ordinary
    /// retryable failure
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| RemoteError::Unavailable(format!("invalid base URL: {}", e)))?;
        // Url::join replaces the last path segment unless the base ends
        // with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of the remote source boundary.
pub struct HttpLeadRemote {
    client: Client,
    config: RemoteConfig,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

impl HttpLeadRemote {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| RemoteError::Unavailable(format!("failed to build URL for {}: {}", path, e)))
    }

    fn leads_url(&self, filter: &LeadsFilter) -> Result<Url, RemoteError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(source) = filter.source {
            params.push(("source", source.as_str().to_string()));
        }
        if let Some(status) = filter.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(from) = filter.from {
            params.push(("from", from.to_rfc3339()));
        }
        if let Some(to) = filter.to {
            params.push(("to", to.to_rfc3339()));
        }
        if let Some(limit) = filter.limit {
            params.push(("limit", limit.to_string()));
        }

        let mut url = self.endpoint("leads")?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    fn source_path(source: LeadSource) -> &'static str {
        match source {
            LeadSource::Website => "website-leads",
            // The ads manager calls the Facebook channel "Meta"
            LeadSource::Facebook => "meta-leads",
            LeadSource::Instagram => "instagram-leads",
            LeadSource::Google => "google-leads",
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RemoteError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RemoteError> {
        if !response.status().is_success() {
            return Err(RemoteError::Unavailable(format!(
                "server returned {}",
                response.status()
            )));
        }
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RemoteError::Unavailable(format!("invalid response body: {}", e)))?;
        envelope.into_data()
    }

    /// Decodes an envelope whose payload the caller does not need.
    async fn expect_success(response: reqwest::Response) -> Result<(), RemoteError> {
        if !response.status().is_success() {
            return Err(RemoteError::Unavailable(format!(
                "server returned {}",
                response.status()
            )));
        }
        let envelope: ApiEnvelope<IgnoredAny> = response
            .json()
            .await
            .map_err(|e| RemoteError::Unavailable(format!("invalid response body: {}", e)))?;
        if envelope.success {
            Ok(())
        } else {
            Err(RemoteError::Unavailable(
                envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

#[async_trait]
impl LeadRemote for HttpLeadRemote {
    async fn fetch_leads(&self, filter: &LeadsFilter) -> Result<Vec<RawLeadRecord>, RemoteError> {
        self.get_json(self.leads_url(filter)?).await
    }

    async fn fetch_leads_by_source(
        &self,
        source: LeadSource,
    ) -> Result<Vec<RawLeadRecord>, RemoteError> {
        let url = self.endpoint(Self::source_path(source))?;
        // Per-source endpoints return the channel's own payload shape
        // without a discriminator; wrap them in the right variant here.
        let records = match source {
            LeadSource::Website => {
                let payloads: Vec<WebsiteLeadPayload> = self.get_json(url).await?;
                payloads.into_iter().map(RawLeadRecord::Website).collect()
            }
            LeadSource::Facebook => {
                let payloads: Vec<MetaAdsPayload> = self.get_json(url).await?;
                payloads.into_iter().map(RawLeadRecord::Facebook).collect()
            }
            LeadSource::Instagram => {
                let payloads: Vec<InstagramAdsPayload> = self.get_json(url).await?;
                payloads.into_iter().map(RawLeadRecord::Instagram).collect()
            }
            LeadSource::Google => {
                let payloads: Vec<GoogleAdsPayload> = self.get_json(url).await?;
                payloads.into_iter().map(RawLeadRecord::Google).collect()
            }
        };
        Ok(records)
    }

    async fn fetch_lead(&self, id: &str) -> Result<RawLeadRecord, RemoteError> {
        self.get_json(self.endpoint(&format!("leads/{}", id))?).await
    }

    async fn fetch_stats(&self) -> Result<Vec<SourceStats>, RemoteError> {
        let url = self.endpoint("leads/stats")?;
        let buckets: Vec<StatBucketWire> = self.get_json(url).await?;
        Ok(buckets
            .into_iter()
            .filter_map(|wire| {
                let source = wire.source.clone();
                let domain = wire.into_domain();
                if domain.is_none() {
                    warn!("Dropping stats bucket for unrecognized source '{}'", source);
                }
                domain
            })
            .collect())
    }

    async fn update_status(&self, id: &str, status: LeadStatus) -> Result<(), RemoteError> {
        let url = self.endpoint(&format!("leads/{}/status", id))?;
        debug!("PATCH {}", url);
        let response = self
            .client
            .patch(url)
            .json(&StatusBody {
                status: status.as_str(),
            })
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        Self::expect_success(response).await
    }

    async fn create_website_lead(
        &self,
        payload: &NewWebsiteLead,
    ) -> Result<RawLeadRecord, RemoteError> {
        let url = self.endpoint("website-leads")?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;
        let created: WebsiteLeadPayload = Self::decode(response).await?;
        Ok(RawLeadRecord::Website(created))
    }
}
