//! Per-field debounce timers.
//!
//! Pure debounce, not throttle: every interaction aborts the field's
//! outstanding timer and starts a fresh one, so the job runs once per
//! quiet period, with the last event's identity. Different fields' timers
//! never interact.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;
use tokio::task::JoinHandle;

/// A scheduled validation, stamped with the generation it was created in.
/// An abort can land after the task's sleep has already resolved; the
/// generation lets such a task recognize it was superseded.
#[derive(Debug)]
struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

type PendingMap = HashMap<String, PendingTimer>;

/// Owner of all pending timers for one activation. Dropping the scheduler
/// aborts everything still outstanding.
#[derive(Debug)]
pub struct DebounceScheduler {
    timeout: Duration,
    next_generation: AtomicU64,
    pending: Arc<Mutex<PendingMap>>,
}

impl DebounceScheduler {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            next_generation: AtomicU64::new(0),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Schedule `job` to run after the quiet period, superseding any timer
    /// already pending for this field. Must be called inside a tokio
    /// runtime.
    pub fn schedule<F>(&self, field: &str, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };

        if let Some(previous) = pending.remove(field) {
            trace!("superseding pending timer for {field:?}");
            previous.handle.abort();
        }

        let map = Arc::clone(&self.pending);
        let key = field.to_string();
        let timeout = self.timeout;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            // The entry under our key may belong to a newer timer by now:
            // an abort is ineffective once the sleep has resolved and the
            // task is mid-poll. Only the task whose generation still
            // matches may remove the entry and run.
            {
                let Ok(mut pending) = map.lock() else {
                    return;
                };
                match pending.get(&key) {
                    Some(entry) if entry.generation == generation => {
                        pending.remove(&key);
                    }
                    _ => {
                        trace!("superseded timer for {key:?} skipped");
                        return;
                    }
                }
            }
            job();
        });
        pending.insert(
            field.to_string(),
            PendingTimer { generation, handle },
        );
    }

    /// Abort the pending timer for one field, if any.
    pub fn cancel(&self, field: &str) -> bool {
        match self.pending.lock() {
            Ok(mut pending) => match pending.remove(field) {
                Some(timer) => {
                    timer.handle.abort();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Abort every pending timer. A cancelled timer never fires: even one
    /// caught past its sleep finds its entry gone and skips its job.
    pub fn cancel_all(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            for (field, timer) in pending.drain() {
                trace!("cancelling pending timer for {field:?}");
                timer.handle.abort();
            }
        }
    }

    /// Number of timers currently outstanding.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
