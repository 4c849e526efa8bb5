//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A durable dedup record: a notification identity that has been shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationRecord {
    /// Dedup identity derived from the push payload.
    pub id: String,
    /// Grouping tag the notification was shown under, if any.
    pub tag: Option<String>,
    /// Unix milliseconds when the notification was rendered.
    pub shown_at: i64,
}

/// A photographed question submitted by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    /// Question UUID.
    pub id: String,
    /// Submitting user id.
    pub user_id: String,
    /// Uploaded image URL.
    pub image_url: String,
    /// Canonical subject label; the grouping key for retrieval.
    pub subject: String,
    /// Worked solution text, once solved.
    pub solution_steps: Option<String>,
    /// Short final answer, when one was given.
    pub solution_answer: Option<String>,
    /// Submission timestamp (RFC 3339).
    pub created_at: String,
}
