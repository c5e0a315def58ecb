//! Refetch on change notifications for the controller's merchant.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{RefreshDecision, StoreController};
use crate::bus::Subscribable;
use crate::error::Result;
use crate::model::{change_topic, Model, ModelChange, ModelStore};
use crate::store::StoreRecord;

/// Counters of one realtime subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealtimeStats {
    /// Notifications seen on the merchant's topic.
    pub received: u64,
    /// Refetches that completed.
    pub refreshes: u64,
    /// Notifications the refresh policy held back.
    pub skipped: u64,
    /// Refetches that failed.
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    received: AtomicU64,
    refreshes: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> RealtimeStats {
        RealtimeStats {
            received: self.received.load(Ordering::SeqCst),
            refreshes: self.refreshes.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

/// A running subscription. Dropping it stops the subscription.
pub struct RealtimeHandle {
    topic: String,
    task: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl RealtimeHandle {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn stats(&self) -> RealtimeStats {
        self.counters.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop listening and wait for the task to wind down.
    pub async fn stop(mut self) -> RealtimeStats {
        if let Some(task) = self.task.take() {
            task.abort();
            // Cancellation is the expected outcome here.
            let _ = task.await;
        }
        let stats = self.counters.snapshot();
        info!(topic = %self.topic, ?stats, "realtime stopped");
        stats
    }
}

impl Drop for RealtimeHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for RealtimeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeHandle")
            .field("topic", &self.topic)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<S: ModelStore + 'static> StoreController<S> {
    /// Subscribe to changes of the merchant's store record.
    ///
    /// Each notification is passed through the refresh policy, which either
    /// refetches (replacing the in-memory store) or defers. Must be called
    /// from within a tokio runtime.
    pub fn start_realtime<B>(&self, bus: &B) -> Result<RealtimeHandle>
    where
        B: Subscribable + ?Sized,
    {
        let merchant_id = self.inner.session.require_merchant()?;
        let topic = change_topic(StoreRecord::COLLECTION, merchant_id);
        let mut subscription = bus.subscribe(&topic)?;

        let counters = Arc::new(Counters::default());
        let controller = self.clone();
        let task_counters = Arc::clone(&counters);

        let task = tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                task_counters.received.fetch_add(1, Ordering::SeqCst);
                // Synthetic events carry no payload.
                let version = event.decode::<ModelChange>().ok().map(|change| change.version);
                debug!(
                    topic = %subscription.topic(),
                    event_type = %event.event_type,
                    ?version,
                    "change notification"
                );

                let dirty = controller.is_dirty();
                match controller.inner.policy.on_remote_change(dirty) {
                    RefreshDecision::Refetch => match controller.fetch().await {
                        Ok(_) => {
                            task_counters.refreshes.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(e) => {
                            task_counters.failed.fetch_add(1, Ordering::SeqCst);
                            warn!(error = %e, "refetch after change notification failed");
                        }
                    },
                    RefreshDecision::Defer => {
                        task_counters.skipped.fetch_add(1, Ordering::SeqCst);
                        match controller.lock("realtime") {
                            Ok(mut state) => state.remote_change_pending = true,
                            Err(e) => warn!(error = %e, "could not record remote change"),
                        }
                        debug!("keeping unsaved edits, remote change pending");
                    }
                }
            }
            debug!("change notifications closed");
        });

        info!(topic = %topic, "realtime started");
        Ok(RealtimeHandle {
            topic,
            task: Some(task),
            counters,
        })
    }
}
