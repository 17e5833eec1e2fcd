use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::risk::RiskTier;

/// A single chat message. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author_id: String,
    pub text: String,
    pub is_from_user: bool,
    pub tier: Option<RiskTier>,
    pub created_at: jiff::Timestamp,
}

impl ChatMessage {
    /// A message typed by the subject, carrying its classified tier.
    pub fn from_user(
        author_id: impl Into<String>,
        text: impl Into<String>,
        tier: RiskTier,
        created_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author_id.into(),
            text: text.into(),
            is_from_user: true,
            tier: Some(tier),
            created_at,
        }
    }

    /// A canned support reply stored in the subject's conversation.
    pub fn reply(
        subject_id: impl Into<String>,
        text: impl Into<String>,
        created_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: subject_id.into(),
            text: text.into(),
            is_from_user: false,
            tier: None,
            created_at,
        }
    }
}
