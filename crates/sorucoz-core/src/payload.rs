//! Push payload types and their identity, grouping and routing derivations.

use serde::{Deserialize, Serialize};

/// A push message delivered to the background worker, tagged by `type`.
///
/// Display fields ride along on every concrete variant; the identity and
/// grouping fields vary per type. Tags this client does not recognize
/// collapse into [`PushPayload::Unknown`] instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushPayload {
    /// A coach-to-student chat message.
    CoachMessage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conversation_id: Option<String>,
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },

    /// A reply on a support ticket.
    SupportReply {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ticket_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },

    /// A submitted question has been solved.
    QuestionSolved {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<String>,
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },

    /// A platform-wide announcement.
    Announcement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        announcement_id: Option<String>,
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },

    /// Catch-all for message types this client does not know. Carries no
    /// display fields, so it can never be rendered.
    #[serde(other)]
    Unknown,
}

/// The renderable form of a payload, handed to a [`crate::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDisplay {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Icon URL, when the payload supplied one.
    pub icon: Option<String>,
    /// Grouping tag; visible notifications sharing it collapse to one.
    pub tag: Option<String>,
    /// In-app URL to open on click.
    pub target_url: String,
}

impl PushPayload {
    /// Short type name, for logs and composite identities.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CoachMessage { .. } => "coach_message",
            Self::SupportReply { .. } => "support_reply",
            Self::QuestionSolved { .. } => "question_solved",
            Self::Announcement { .. } => "announcement",
            Self::Unknown => "unknown",
        }
    }

    /// Derive the dedup identity for this payload.
    ///
    /// Prefers the explicit message id, falls back to a composite of type
    /// and thread id, and finally to type plus the supplied timestamp for
    /// payloads with nothing stable to key on.
    pub fn identity(&self, now_ms: u64) -> String {
        match self {
            Self::CoachMessage {
                message_id: Some(id),
                ..
            } => id.clone(),
            Self::CoachMessage {
                conversation_id: Some(conversation_id),
                ..
            } => format!("coach_message:{conversation_id}"),
            Self::SupportReply {
                message_id: Some(id),
                ..
            } => id.clone(),
            Self::SupportReply {
                ticket_id: Some(ticket_id),
                ..
            } => format!("support_reply:{ticket_id}"),
            Self::QuestionSolved {
                question_id: Some(question_id),
                ..
            } => format!("question_solved:{question_id}"),
            Self::Announcement {
                announcement_id: Some(announcement_id),
                ..
            } => format!("announcement:{announcement_id}"),
            _ => format!("{}:{}", self.kind(), now_ms),
        }
    }

    /// The grouping tag used to collapse visible notifications.
    ///
    /// Coarser than the dedup identity: many message ids share one
    /// conversation tag. `None` means the payload is not groupable.
    pub fn group_tag(&self) -> Option<String> {
        match self {
            Self::CoachMessage {
                conversation_id: Some(conversation_id),
                ..
            } => Some(format!("conv-{conversation_id}")),
            Self::SupportReply {
                ticket_id: Some(ticket_id),
                ..
            } => Some(format!("ticket-{ticket_id}")),
            Self::QuestionSolved {
                question_id: Some(question_id),
                ..
            } => Some(format!("question-{question_id}")),
            Self::Announcement { .. } => Some("announcements".to_string()),
            _ => None,
        }
    }

    /// The in-app URL a click on this notification should open.
    ///
    /// Falls back to the landing route when the type is unrecognized or the
    /// routing field is absent.
    pub fn click_route(&self) -> String {
        match self {
            Self::CoachMessage {
                conversation_id: Some(conversation_id),
                ..
            } => format!("/mesajlar/{conversation_id}"),
            Self::SupportReply {
                ticket_id: Some(ticket_id),
                ..
            } => format!("/destek/{ticket_id}"),
            Self::QuestionSolved {
                question_id: Some(question_id),
                ..
            } => format!("/sorularim/{question_id}"),
            Self::Announcement { .. } => "/duyurular".to_string(),
            _ => "/".to_string(),
        }
    }

    /// Build the renderable form, or `None` for payloads without display
    /// fields.
    pub fn display(&self) -> Option<NotificationDisplay> {
        let (title, body, icon) = match self {
            Self::CoachMessage {
                title, body, icon, ..
            }
            | Self::SupportReply {
                title, body, icon, ..
            }
            | Self::QuestionSolved {
                title, body, icon, ..
            }
            | Self::Announcement {
                title, body, icon, ..
            } => (title, body, icon),
            Self::Unknown => return None,
        };

        Some(NotificationDisplay {
            title: title.clone(),
            body: body.clone(),
            icon: icon.clone(),
            tag: self.group_tag(),
            target_url: self.click_route(),
        })
    }
}
