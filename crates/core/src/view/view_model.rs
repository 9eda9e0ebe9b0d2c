//! Per-page view state.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::leads::Lead;

/// State owned by one page-level consumer.
///
/// Exactly one instance exists per distinct page; pages never share
/// mutable state, so a polling cycle or mutation on one page cannot race
/// another page's.
#[derive(Debug, Clone, Default)]
pub struct LeadViewState {
    /// Current snapshot, in the order the remote source returned it
    pub leads: Vec<Lead>,
    pub loading: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Lead ids with a status mutation currently in flight
    pub pending_mutations: HashSet<String>,
}

impl LeadViewState {
    pub fn lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub(crate) fn lead_mut(&mut self, id: &str) -> Option<&mut Lead> {
        self.leads.iter_mut().find(|l| l.id == id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_mutations.contains(id)
    }

    /// Replaces the snapshot with freshly fetched leads.
    pub fn apply_snapshot(&mut self, leads: Vec<Lead>, synced_at: DateTime<Utc>) {
        self.leads = leads;
        self.last_synced_at = Some(synced_at);
        self.loading = false;
    }
}
