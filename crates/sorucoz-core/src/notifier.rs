//! The notification rendering seam.

use async_trait::async_trait;

use crate::error::NotifierError;
use crate::payload::NotificationDisplay;

/// Renders and closes visible system notifications.
///
/// Implementations wrap whatever the host platform exposes; the worker only
/// ever talks to this trait. Object-safe, usable as `Box<dyn Notifier>`.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render a notification.
    ///
    /// Returns a handle identifying the visible notification, for later
    /// closing.
    async fn show(&self, notification: NotificationDisplay) -> Result<String, NotifierError>;

    /// Handles of currently visible notifications carrying the given tag.
    async fn visible_with_tag(&self, tag: &str) -> Result<Vec<String>, NotifierError>;

    /// Close a visible notification by handle.
    ///
    /// Closing a handle that is no longer visible is not an error.
    async fn close(&self, handle: &str) -> Result<(), NotifierError>;

    /// Get a human-readable name for this notifier implementation.
    fn name(&self) -> &str;
}
