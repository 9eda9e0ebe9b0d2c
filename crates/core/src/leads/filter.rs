//! Client-side filter engine over an in-memory lead collection.
//!
//! Pure and deterministic: no I/O, no clock reads. Filtering is stable
//! (original relative ordering is preserved, never re-sorted) and the
//! limit truncation runs last, after every field predicate, so a limit of
//! N returns the first N matching leads in original order.

use super::leads_model::{Lead, LeadsFilter};

/// Applies a filter specification to a lead collection.
pub fn apply(leads: &[Lead], spec: &LeadsFilter) -> Vec<Lead> {
    let mut result: Vec<Lead> = leads
        .iter()
        .filter(|lead| matches(lead, spec))
        .cloned()
        .collect();
    // Some(0) means an empty result; "no limit" is None, never zero
    if let Some(limit) = spec.limit {
        result.truncate(limit);
    }
    result
}

fn matches(lead: &Lead, spec: &LeadsFilter) -> bool {
    if let Some(source) = spec.source {
        if lead.source != source {
            return false;
        }
    }
    if let Some(status) = spec.status {
        if lead.status != status {
            return false;
        }
    }
    // Date bounds are inclusive on both ends
    if let Some(from) = spec.from {
        if lead.created_at < from {
            return false;
        }
    }
    if let Some(to) = spec.to {
        if lead.created_at > to {
            return false;
        }
    }
    true
}
