//! Event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::LeadEvent;

/// Trait for receiving lead events.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no I/O)
/// - Implementations should queue events for async processing
/// - Failure to emit must not affect the sync layer (best-effort)
pub trait LeadEventSink: Send + Sync {
    /// Emit a single event.
    fn emit(&self, event: LeadEvent);
}

/// No-op implementation for contexts that don't surface notices.
#[derive(Clone, Default)]
pub struct NoOpLeadEventSink;

impl LeadEventSink for NoOpLeadEventSink {
    fn emit(&self, _event: LeadEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Collecting sink for tests.
#[derive(Clone, Default)]
pub struct MockLeadEventSink {
    events: Arc<Mutex<Vec<LeadEvent>>>,
}

impl MockLeadEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<LeadEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Counts collected events matching a predicate.
    pub fn count_matching(&self, predicate: impl Fn(&LeadEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl LeadEventSink for MockLeadEventSink {
    fn emit(&self, event: LeadEvent) {
        self.events.lock().unwrap().push(event);
    }
}
