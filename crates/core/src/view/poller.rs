//! Periodic refresh scheduling.
//!
//! The original dashboard refreshed itself from an implicit recurring
//! timer tied to the rendering lifecycle. Here that is an explicit
//! start/stop object owned by the page alongside its view state, with
//! tick coalescing so two refresh cycles never run against the same view
//! state at once.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

/// Drives periodic, cancellable refresh cycles for one view.
pub struct RefreshScheduler {
    current: Mutex<Option<Run>>,
}

struct Run {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Begins an immediate execution of `task`, then re-invokes it every
    /// `interval` until [`RefreshScheduler::stop`] is called.
    ///
    /// If a previous invocation has not settled when the next tick
    /// elapses, that tick is skipped rather than overlapping two
    /// in-flight fetches against the same view state. Calling `start` on
    /// a running scheduler replaces the previous schedule.
    pub fn start<F, Fut>(&self, interval: Duration, task: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let loop_stop = stop.clone();
        let in_flight = Arc::new(AtomicBool::new(false));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if loop_stop.load(Ordering::Acquire) {
                    break;
                }
                if in_flight.swap(true, Ordering::AcqRel) {
                    debug!("Previous refresh cycle still in flight, skipping tick");
                    continue;
                }
                let done = in_flight.clone();
                let cycle = task();
                // Each cycle runs as its own task so stopping the ticker
                // never aborts an in-flight cycle
                tokio::spawn(async move {
                    cycle.await;
                    done.store(false, Ordering::Release);
                });
            }
        });

        let previous = self.current.lock().unwrap().replace(Run { stop, handle });
        if let Some(run) = previous {
            run.stop.store(true, Ordering::Release);
            run.handle.abort();
        }
    }

    /// Stops the schedule. Idempotent and synchronous: once this returns,
    /// no further invocation will start. An in-flight invocation is not
    /// aborted; its result is still applied.
    pub fn stop(&self) {
        if let Some(run) = self.current.lock().unwrap().take() {
            run.stop.store(true, Ordering::Release);
            run.handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
