//! Message entity: one turn in the conversation.

use crate::conversation::grounding::GroundingMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a message, assigned at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A message in a conversation (Entity)
///
/// User messages are created final. Model messages are created empty with
/// the streaming flag set, have their content replaced as fragments arrive,
/// and are frozen when the turn completes or fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub is_streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding: Option<GroundingMetadata>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A finalized user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
            is_streaming: false,
            grounding: None,
            timestamp: Utc::now(),
        }
    }

    /// An empty model message with the streaming indicator on.
    pub fn streaming_model() -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Model,
            content: String::new(),
            is_streaming: true,
            grounding: None,
            timestamp: Utc::now(),
        }
    }
}
