//! Page-level orchestration: refresh cycles, optimistic status mutation,
//! dashboard aggregation, and export hookup.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use futures::future::try_join;
use log::{debug, error, warn};
use tokio::sync::RwLock;

use super::view_errors::MutationError;
use super::view_model::LeadViewState;
use crate::constants::DEFAULT_DASHBOARD_LEAD_LIMIT;
use crate::errors::Result;
use crate::events::{LeadEvent, LeadEventSink};
use crate::export;
use crate::leads::ingest::{normalize, normalize_batch, IngestWarning, RawLeadRecord};
use crate::leads::{filter, Lead, LeadRemote, LeadSource, LeadStatus, LeadsFilter, NewWebsiteLead};
use crate::stats::{self, LeadStatsSummary};
use crate::utils::time_utils::DEFAULT_DISPLAY_TZ;

/// What a view is currently polling: the unified collection under a
/// filter, or one of the four per-source pages.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshTarget {
    Unified(LeadsFilter),
    PerSource(LeadSource),
}

/// Synchronization service owning one page's [`LeadViewState`].
///
/// All suspension points sit inside [`LeadRemote`] calls; everything else
/// (normalization, filtering, aggregation, export) is synchronous over the
/// owned state.
pub struct LeadViewService {
    remote: Arc<dyn LeadRemote>,
    events: Arc<dyn LeadEventSink>,
    state: Arc<RwLock<LeadViewState>>,
    target: RwLock<RefreshTarget>,
    display_tz: Tz,
}

impl LeadViewService {
    pub fn new(remote: Arc<dyn LeadRemote>, events: Arc<dyn LeadEventSink>) -> Self {
        Self::with_display_tz(remote, events, DEFAULT_DISPLAY_TZ)
    }

    pub fn with_display_tz(
        remote: Arc<dyn LeadRemote>,
        events: Arc<dyn LeadEventSink>,
        display_tz: Tz,
    ) -> Self {
        Self {
            remote,
            events,
            state: Arc::new(RwLock::new(LeadViewState::default())),
            target: RwLock::new(RefreshTarget::Unified(LeadsFilter::default())),
            display_tz,
        }
    }

    /// Shared handle to the underlying view state.
    pub fn state(&self) -> Arc<RwLock<LeadViewState>> {
        self.state.clone()
    }

    /// Owned copy of the current view state.
    pub async fn snapshot(&self) -> LeadViewState {
        self.state.read().await.clone()
    }

    /// Fetches the unified collection under `filter` and replaces the
    /// snapshot. The filter becomes the view's polling target.
    pub async fn refresh(&self, filter: &LeadsFilter) -> Result<()> {
        *self.target.write().await = RefreshTarget::Unified(filter.clone());
        self.refresh_current().await
    }

    /// Fetches one per-source collection and replaces the snapshot. The
    /// source becomes the view's polling target.
    pub async fn refresh_source(&self, source: LeadSource) -> Result<()> {
        *self.target.write().await = RefreshTarget::PerSource(source);
        self.refresh_current().await
    }

    /// Runs one refresh cycle against the view's current target.
    ///
    /// This is the task the [`super::RefreshScheduler`] drives. A failed
    /// cycle leaves the previous snapshot on display and never stops
    /// future cycles.
    pub async fn refresh_current(&self) -> Result<()> {
        let target = self.target.read().await.clone();
        self.state.write().await.loading = true;

        let fetched = match &target {
            RefreshTarget::Unified(f) => self.remote.fetch_leads(f).await,
            RefreshTarget::PerSource(s) => self.remote.fetch_leads_by_source(*s).await,
        };

        match fetched {
            Ok(raw) => {
                let source = match target {
                    RefreshTarget::PerSource(s) => Some(s),
                    RefreshTarget::Unified(_) => None,
                };
                self.apply_fetched(raw, source).await;
                Ok(())
            }
            Err(err) => {
                error!("Refresh cycle failed: {}", err);
                self.state.write().await.loading = false;
                self.events.emit(LeadEvent::refresh_failed(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// One dashboard cycle: the stats feed and a bounded lead window are
    /// fetched concurrently, the snapshot is replaced, and the rollup is
    /// derived from both.
    pub async fn refresh_dashboard(&self, window_days: u32) -> Result<LeadStatsSummary> {
        let filter = LeadsFilter::limited(DEFAULT_DASHBOARD_LEAD_LIMIT);
        *self.target.write().await = RefreshTarget::Unified(filter.clone());
        self.state.write().await.loading = true;

        match try_join(self.remote.fetch_stats(), self.remote.fetch_leads(&filter)).await {
            Ok((buckets, raw)) => {
                self.apply_fetched(raw, None).await;
                let state = self.state.read().await;
                Ok(stats::aggregate_now(
                    &buckets,
                    &state.leads,
                    window_days,
                    self.display_tz,
                ))
            }
            Err(err) => {
                error!("Dashboard refresh failed: {}", err);
                self.state.write().await.loading = false;
                self.events.emit(LeadEvent::refresh_failed(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Single-record lookup, normalized but not written into the snapshot.
    pub async fn lead_by_id(&self, id: &str) -> Result<Lead> {
        let raw = self.remote.fetch_lead(id).await?;
        let record = normalize(&raw)?;
        for warning in &record.warnings {
            self.emit_warning(warning);
        }
        Ok(record.lead)
    }

    /// Website intake pass-through; returns the created lead.
    pub async fn create_website_lead(&self, payload: &NewWebsiteLead) -> Result<Lead> {
        let raw = self.remote.create_website_lead(payload).await?;
        let record = normalize(&raw)?;
        for warning in &record.warnings {
            self.emit_warning(warning);
        }
        Ok(record.lead)
    }

    /// Optimistically applies a status change and reconciles with the
    /// remote outcome.
    ///
    /// Per lead id a submission moves `Idle -> Pending -> Committed |
    /// RolledBack`; at most one mutation per record may be in flight, and
    /// there is no cancellation. The pre-mutation status is captured
    /// before the optimistic write so rollback is exact.
    pub async fn submit_status(&self, id: &str, new_status: LeadStatus) -> Result<()> {
        let previous = {
            let mut state = self.state.write().await;
            if state.pending_mutations.contains(id) {
                return Err(MutationError::AlreadyPending(id.to_string()).into());
            }
            let lead = state
                .lead_mut(id)
                .ok_or_else(|| MutationError::UnknownLead(id.to_string()))?;
            let previous = lead.status;
            lead.status = new_status;
            state.pending_mutations.insert(id.to_string());
            previous
        };

        match self.remote.update_status(id, new_status).await {
            Ok(()) => {
                self.state.write().await.pending_mutations.remove(id);
                self.events.emit(LeadEvent::status_committed(id, new_status));
                // Pick up server-side side effects (recomputed stats, the
                // authoritative record) on a best-effort basis
                if let Err(err) = self.refresh_current().await {
                    debug!("Post-commit refresh failed: {}", err);
                }
                Ok(())
            }
            Err(err) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(lead) = state.lead_mut(id) {
                        // A refresh that landed meanwhile is authoritative;
                        // only undo our own optimistic write
                        if lead.status == new_status {
                            lead.status = previous;
                        }
                    }
                    state.pending_mutations.remove(id);
                }
                error!("Status update for lead {} failed: {}", id, err);
                self.events
                    .emit(LeadEvent::status_update_failed(id, err.to_string()));
                Err(MutationError::Rejected {
                    id: id.to_string(),
                    cause: err.to_string(),
                }
                .into())
            }
        }
    }

    /// Applies a filter to the current snapshot without re-fetching.
    pub async fn filtered(&self, spec: &LeadsFilter) -> Vec<Lead> {
        let state = self.state.read().await;
        filter::apply(&state.leads, spec)
    }

    /// Serializes the current filtered view to CSV.
    pub async fn export_csv(&self, spec: &LeadsFilter) -> Result<String> {
        let leads = self.filtered(spec).await;
        export::serialize_leads(&leads, self.display_tz)
    }

    async fn apply_fetched(&self, raw: Vec<RawLeadRecord>, source: Option<LeadSource>) {
        let batch = normalize_batch(&raw);
        for warning in &batch.warnings {
            self.emit_warning(warning);
        }

        let lead_count = batch.leads.len();
        let synced_at = Utc::now();
        self.state.write().await.apply_snapshot(batch.leads, synced_at);

        debug!(
            "Refreshed {} leads ({} skipped) for {}",
            lead_count,
            batch.skipped.len(),
            source.map_or("all sources".to_string(), |s| s.to_string()),
        );
        self.events.emit(LeadEvent::leads_refreshed(
            source,
            lead_count,
            batch.skipped.len(),
            synced_at,
        ));
    }

    fn emit_warning(&self, warning: &IngestWarning) {
        match warning {
            IngestWarning::UnknownStatus {
                lead_id,
                raw_status,
            } => {
                warn!(
                    "Lead {} arrived with unknown status '{}', kept as 'new'",
                    lead_id, raw_status
                );
                self.events.emit(LeadEvent::unknown_status_coerced(
                    lead_id.as_str(),
                    raw_status.as_str(),
                ));
            }
        }
    }
}
