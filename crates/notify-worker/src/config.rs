//! Configuration for the notification dispatcher.

use std::time::Duration;

/// Default window for rejecting repeat deliveries at the entrypoint (500ms).
const DEFAULT_HANDLER_LOCK_WINDOW: Duration = Duration::from_millis(500);

/// Default TTL for dedup records (10 seconds).
const DEFAULT_RECORD_TTL: Duration = Duration::from_secs(10);

/// Configuration for the notification dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// How long a second invocation for the same identity is rejected at
    /// the dispatch entrypoint. Covers the delivery layer invoking the
    /// handler more than once for one message. Default: 500ms.
    pub handler_lock_window: Duration,

    /// How long a shown identity stays deduplicated before it may be shown
    /// again. Default: 10 seconds.
    pub record_ttl: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            handler_lock_window: DEFAULT_HANDLER_LOCK_WINDOW,
            record_ttl: DEFAULT_RECORD_TTL,
        }
    }
}

impl DispatcherConfig {
    /// Create a config with a custom record TTL.
    pub fn with_record_ttl(record_ttl: Duration) -> Self {
        Self {
            record_ttl,
            ..Default::default()
        }
    }
}
