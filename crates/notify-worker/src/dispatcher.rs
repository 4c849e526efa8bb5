//! The layered notification dedup dispatcher.

use std::collections::HashSet;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use database::{notification_record, Database};
use futures::{Stream, StreamExt};
use indexmap::IndexMap;
use sorucoz_core::{NotificationDisplay, Notifier, NotifierError, PushPayload};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::DispatcherConfig;

/// Errors that can occur during notification dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Error from the notification backend.
    #[error("notifier error: {0}")]
    Notifier(#[from] NotifierError),

    /// The push message stream ended unexpectedly.
    #[error("push message stream ended")]
    StreamEnded,
}

/// The dedup layer that rejected a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressStage {
    /// Rejected at the dispatch entrypoint: the same identity was delivered
    /// again within the handler lock window.
    HandlerLock,
    /// Another invocation for the identity is still mid-flight.
    InFlight,
    /// The in-memory shown cache holds an unexpired entry.
    MemoryCache,
    /// The durable store holds an unexpired record.
    DurableStore,
}

/// Result of dispatching a single push payload.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Notification rendered; dedup records written.
    Shown {
        id: String,
        tag: Option<String>,
        handle: String,
    },
    /// Rejected by a dedup layer; nothing rendered, nothing written.
    Suppressed { id: String, stage: SuppressStage },
    /// Payload skipped before dedup (e.g. an unrenderable type).
    Skipped { reason: String },
    /// Error occurred while rendering.
    Error(DispatchError),
}

/// A dispatcher that decides, at most once per identity and TTL window,
/// whether a push payload becomes a visible system notification.
///
/// The in-memory maps live on this struct and die with the worker process;
/// a restart clears stale locks, which is acceptable. The durable store is
/// what coordinates separate contexts on the same device.
pub struct NotificationDispatcher<N: Notifier> {
    notifier: N,
    db: Database,
    config: DispatcherConfig,
    /// Entry timestamps per identity. Insertion order is time order, so
    /// expired entries sit at the front for pruning.
    handler_seen: Mutex<IndexMap<String, Instant>>,
    /// Identities currently mid-flight.
    processing: Mutex<HashSet<String>>,
    /// Identities shown by this worker, with render instants.
    shown_cache: Mutex<IndexMap<String, Instant>>,
}

impl<N: Notifier> NotificationDispatcher<N> {
    /// Create a new dispatcher.
    pub fn new(notifier: N, db: Database, config: DispatcherConfig) -> Self {
        Self {
            notifier,
            db,
            config,
            handler_seen: Mutex::new(IndexMap::new()),
            processing: Mutex::new(HashSet::new()),
            shown_cache: Mutex::new(IndexMap::new()),
        }
    }

    /// Create a dispatcher with default configuration.
    pub fn with_defaults(notifier: N, db: Database) -> Self {
        Self::new(notifier, db, DispatcherConfig::default())
    }

    /// Get a reference to the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Get the configuration.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Process a single push payload and return what happened to it.
    ///
    /// Never returns an error for store trouble: the durable layers degrade
    /// so that storage problems cannot silence notifications.
    pub async fn dispatch(&self, payload: PushPayload) -> DispatchOutcome {
        let display = match payload.display() {
            Some(display) => display,
            None => {
                debug!("Skipping payload with no display fields: {}", payload.kind());
                return DispatchOutcome::Skipped {
                    reason: format!("unrenderable payload type: {}", payload.kind()),
                };
            }
        };

        let now_ms = unix_ms();
        let id = payload.identity(now_ms);

        // Layer 1: handler lock. Rejects repeat deliveries of the same
        // identity at the entrypoint, before any other work happens.
        {
            let mut seen = self.handler_seen.lock().await;
            prune_older_than(&mut seen, self.config.handler_lock_window);
            if seen.contains_key(&id) {
                debug!("Suppressed {} at handler lock", id);
                return DispatchOutcome::Suppressed {
                    id,
                    stage: SuppressStage::HandlerLock,
                };
            }
            seen.insert(id.clone(), Instant::now());
        }

        // Layer 2: processing lock. Closes the race window while the
        // durable check below is awaited.
        {
            let mut processing = self.processing.lock().await;
            if !processing.insert(id.clone()) {
                debug!("Suppressed {}: already being processed", id);
                return DispatchOutcome::Suppressed {
                    id,
                    stage: SuppressStage::InFlight,
                };
            }
        }

        let outcome = self.check_and_show(&id, &display, now_ms).await;

        // Release the processing lock even when showing failed.
        self.processing.lock().await.remove(&id);

        outcome
    }

    /// Layers 3-5: memory cache, durable check, stale-close and show.
    async fn check_and_show(
        &self,
        id: &str,
        display: &NotificationDisplay,
        now_ms: u64,
    ) -> DispatchOutcome {
        let ttl = self.config.record_ttl;

        // Layer 3: in-memory shown cache. After pruning, presence means an
        // unexpired entry.
        {
            let mut cache = self.shown_cache.lock().await;
            prune_older_than(&mut cache, ttl);
            if cache.contains_key(id) {
                debug!("Suppressed {} by memory cache", id);
                return DispatchOutcome::Suppressed {
                    id: id.to_string(),
                    stage: SuppressStage::MemoryCache,
                };
            }
        }

        // Layer 4: durable store, the authoritative cross-context gate. A
        // read error degrades to "assume not a duplicate" so storage trouble
        // never silences notifications.
        match notification_record::find_record(self.db.pool(), id).await {
            Ok(Some(record)) => {
                let age_ms = now_ms.saturating_sub(record.shown_at.max(0) as u64);
                if age_ms < ttl.as_millis() as u64 {
                    debug!("Suppressed {} by durable store (age {}ms)", id, age_ms);
                    return DispatchOutcome::Suppressed {
                        id: id.to_string(),
                        stage: SuppressStage::DurableStore,
                    };
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Dedup store read failed for {}, proceeding: {}", id, e),
        }

        // Close stale notifications sharing the grouping tag before showing,
        // so only the newest notification per tag is ever visible. One close
        // failure neither aborts the remaining closes nor blocks the show.
        if let Some(ref tag) = display.tag {
            match self.notifier.visible_with_tag(tag).await {
                Ok(handles) => {
                    for handle in handles {
                        if let Err(e) = self.notifier.close(&handle).await {
                            warn!("Failed to close stale notification {}: {}", handle, e);
                        }
                    }
                }
                Err(e) => warn!("Failed to list stale notifications for tag {}: {}", tag, e),
            }
        }

        let handle = match self.notifier.show(display.clone()).await {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to render notification {}: {}", id, e);
                return DispatchOutcome::Error(DispatchError::Notifier(e));
            }
        };

        let display_tag = &display.tag;
        info!("Rendered notification {} (tag: {:?})", id, display_tag);

        // Record in both stores. A durable write error is logged, not
        // retried: the memory cache still holds the line within this
        // worker's lifetime.
        self.shown_cache
            .lock()
            .await
            .insert(id.to_string(), Instant::now());
        if let Err(e) =
            notification_record::mark_shown(self.db.pool(), id, display.tag.as_deref(), now_ms as i64)
                .await
        {
            warn!("Dedup store write failed for {}: {}", id, e);
        }

        // Opportunistic sweep of expired durable records.
        let cutoff = now_ms.saturating_sub(ttl.as_millis() as u64);
        match notification_record::delete_expired(self.db.pool(), cutoff as i64).await {
            Ok(0) => {}
            Ok(swept) => debug!("Swept {} expired dedup records", swept),
            Err(e) => warn!("Dedup store sweep failed: {}", e),
        }

        DispatchOutcome::Shown {
            id: id.to_string(),
            tag: display.tag.clone(),
            handle,
        }
    }

    /// Run the dispatcher over a stream of push payloads until the stream
    /// ends.
    ///
    /// This method consumes self and runs indefinitely.
    pub async fn run<S>(self, stream: S) -> Result<(), DispatchError>
    where
        S: Stream<Item = PushPayload> + Send,
    {
        info!(
            "Starting notification dispatcher with notifier: {}",
            self.notifier.name()
        );

        tokio::pin!(stream);

        while let Some(payload) = stream.next().await {
            self.log_outcome(self.dispatch(payload).await);
        }

        warn!("Push message stream ended");
        Err(DispatchError::StreamEnded)
    }

    /// Run the dispatcher with graceful shutdown support.
    ///
    /// This method runs until either:
    /// - The provided shutdown signal completes
    /// - The push message stream ends
    pub async fn run_with_shutdown<S, F>(self, stream: S, shutdown_signal: F) -> Result<(), DispatchError>
    where
        S: Stream<Item = PushPayload> + Send,
        F: std::future::Future<Output = ()> + Send,
    {
        info!(
            "Starting notification dispatcher with notifier: {} (graceful shutdown enabled)",
            self.notifier.name()
        );

        tokio::pin!(stream);
        tokio::pin!(shutdown_signal);

        loop {
            tokio::select! {
                biased;

                // Check for shutdown signal first
                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping notification dispatcher");
                    return Ok(());
                }

                // Then handle payloads
                payload = stream.next() => {
                    match payload {
                        Some(payload) => self.log_outcome(self.dispatch(payload).await),
                        None => {
                            warn!("Push message stream ended");
                            return Err(DispatchError::StreamEnded);
                        }
                    }
                }
            }
        }
    }

    /// Run the dispatcher until Ctrl+C is pressed.
    ///
    /// This is a convenience wrapper around [`run_with_shutdown`] with the
    /// default Ctrl+C signal handler.
    ///
    /// [`run_with_shutdown`]: NotificationDispatcher::run_with_shutdown
    #[cfg(feature = "signal")]
    pub async fn run_until_stopped<S>(self, stream: S) -> Result<(), DispatchError>
    where
        S: Stream<Item = PushPayload> + Send,
    {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
        };
        self.run_with_shutdown(stream, shutdown).await
    }

    fn log_outcome(&self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Shown { id, tag, .. } => {
                debug!("Shown {} (tag: {:?})", id, tag);
            }
            DispatchOutcome::Suppressed { id, stage } => {
                debug!("Suppressed {} at {:?}", id, stage);
            }
            DispatchOutcome::Skipped { reason } => {
                debug!("Skipped: {}", reason);
            }
            DispatchOutcome::Error(e) => {
                // Log but continue processing
                warn!("Error dispatching notification: {}", e);
            }
        }
    }
}

/// Current time as unix milliseconds.
fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Drop entries older than `max_age` from the front of a time-ordered map.
fn prune_older_than(entries: &mut IndexMap<String, Instant>, max_age: Duration) {
    while let Some((_, instant)) = entries.get_index(0) {
        if instant.elapsed() >= max_age {
            entries.shift_remove_index(0);
        } else {
            break;
        }
    }
}
