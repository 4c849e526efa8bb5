//! Core error types.

use thiserror::Error;

/// Errors that can occur in question analysis backends.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure reaching the completion endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered but the reply was unusable.
    #[error("analysis failed: {0}")]
    ProcessingFailed(String),
}

/// Errors that can occur in notification rendering backends.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Rendering the notification failed.
    #[error("failed to render notification: {0}")]
    Render(String),

    /// Closing a visible notification failed.
    #[error("failed to close notification {handle}: {reason}")]
    Close { handle: String, reason: String },

    /// The backend itself is unavailable.
    #[error("notification backend error: {0}")]
    Backend(String),
}
