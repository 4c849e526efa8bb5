//! In-memory recording notifier.

use async_trait::async_trait;
use sorucoz_core::{NotificationDisplay, Notifier, NotifierError};
use tokio::sync::Mutex;

/// A notification that was rendered through a [`RecordingNotifier`].
#[derive(Debug, Clone)]
pub struct ShownNotification {
    /// Handle returned from `show`.
    pub handle: String,
    /// The rendered content.
    pub display: NotificationDisplay,
}

#[derive(Debug, Default)]
struct State {
    next_handle: u64,
    visible: Vec<ShownNotification>,
    shown_total: usize,
    closed: Vec<String>,
    fail_show: bool,
    fail_close: bool,
    fail_list: bool,
}

/// A notifier that records every show/close in memory.
///
/// Stands in for the OS notification surface in tests. Failure injection
/// flags let tests drive the error-degradation paths of the dispatcher.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    state: Mutex<State>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `show` call fail.
    pub async fn set_fail_show(&self, fail: bool) {
        self.state.lock().await.fail_show = fail;
    }

    /// Make every subsequent `close` call fail.
    pub async fn set_fail_close(&self, fail: bool) {
        self.state.lock().await.fail_close = fail;
    }

    /// Make every subsequent `visible_with_tag` call fail.
    pub async fn set_fail_list(&self, fail: bool) {
        self.state.lock().await.fail_list = fail;
    }

    /// Currently visible notifications, in show order.
    pub async fn visible(&self) -> Vec<ShownNotification> {
        self.state.lock().await.visible.clone()
    }

    /// Total number of notifications ever shown.
    pub async fn shown_total(&self) -> usize {
        self.state.lock().await.shown_total
    }

    /// Handles that have been closed, in close order.
    pub async fn closed(&self) -> Vec<String> {
        self.state.lock().await.closed.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn show(&self, notification: NotificationDisplay) -> Result<String, NotifierError> {
        let mut state = self.state.lock().await;
        if state.fail_show {
            return Err(NotifierError::Render("injected render failure".to_string()));
        }

        state.next_handle += 1;
        let handle = format!("n{}", state.next_handle);
        state.visible.push(ShownNotification {
            handle: handle.clone(),
            display: notification,
        });
        state.shown_total += 1;
        Ok(handle)
    }

    async fn visible_with_tag(&self, tag: &str) -> Result<Vec<String>, NotifierError> {
        let state = self.state.lock().await;
        if state.fail_list {
            return Err(NotifierError::Backend("injected list failure".to_string()));
        }

        Ok(state
            .visible
            .iter()
            .filter(|n| n.display.tag.as_deref() == Some(tag))
            .map(|n| n.handle.clone())
            .collect())
    }

    async fn close(&self, handle: &str) -> Result<(), NotifierError> {
        let mut state = self.state.lock().await;
        if state.fail_close {
            return Err(NotifierError::Close {
                handle: handle.to_string(),
                reason: "injected close failure".to_string(),
            });
        }

        state.visible.retain(|n| n.handle != handle);
        state.closed.push(handle.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingNotifier"
    }
}
