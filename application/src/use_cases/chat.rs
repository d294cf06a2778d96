//! Chat service: drives the conversation store from session callbacks.
//!
//! One turn = append the user/model message pair, stream the response into
//! the model message (replace semantics), then freeze it as completed or
//! failed. The service owns both the [`SessionManager`] and the
//! [`Conversation`], so a caller holding `&mut ChatService` can only run
//! one turn at a time.

use crate::ports::chat_gateway::GatewayError;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::use_cases::session_manager::SessionManager;
use abrazeq_domain::util::truncate_str;
use abrazeq_domain::{Conversation, DomainError, GroundingMetadata, MessageId};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// How a chat turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    Completed { message_id: MessageId },
    Failed { message_id: MessageId, error: GatewayError },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }

    pub fn message_id(&self) -> MessageId {
        match self {
            TurnOutcome::Completed { message_id } | TurnOutcome::Failed { message_id, .. } => {
                *message_id
            }
        }
    }
}

/// Application service tying the session manager to the conversation log.
pub struct ChatService {
    manager: SessionManager,
    conversation: Conversation,
    transcript: Arc<dyn ConversationLogger>,
}

impl ChatService {
    pub fn new(manager: SessionManager, transcript: Arc<dyn ConversationLogger>) -> Self {
        Self {
            manager,
            conversation: Conversation::new(),
            transcript,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Send one user message, streaming the accumulated response text to
    /// `on_render` after every fragment.
    ///
    /// The caller is expected to reject empty input before calling.
    pub async fn send_message<F>(
        &mut self,
        text: &str,
        mut on_render: F,
    ) -> Result<TurnOutcome, DomainError>
    where
        F: FnMut(&str),
    {
        let Self {
            manager,
            conversation,
            transcript,
        } = self;

        let message_id = conversation.begin_exchange(text)?;
        transcript.log(ConversationEvent::new(
            "user_message",
            json!({ "text": text }),
        ));

        let mut completed: Option<(String, Option<GroundingMetadata>)> = None;
        let mut failed: Option<GatewayError> = None;

        manager
            .send_message_stream(
                text,
                |accumulated| {
                    // The id addresses the message appended above, which
                    // stays streaming for the whole send.
                    let _ = conversation.update_streaming(message_id, accumulated);
                    on_render(accumulated);
                },
                |full, grounding| completed = Some((full.to_string(), grounding)),
                |error| failed = Some(error),
            )
            .await;

        if let Some(error) = failed {
            self.conversation.fail_exchange(message_id)?;
            self.transcript.log(ConversationEvent::new(
                "stream_error",
                json!({ "error": error.to_string() }),
            ));
            return Ok(TurnOutcome::Failed { message_id, error });
        }

        let (full, grounding) = completed.unwrap_or_default();
        let grounded = grounding.as_ref().is_some_and(|g| !g.is_empty());
        self.conversation
            .complete_exchange(message_id, &full, grounding)?;
        self.transcript.log(ConversationEvent::new(
            "model_response",
            json!({
                "bytes": full.len(),
                "grounded": grounded,
                "preview": truncate_str(&full, 200),
            }),
        ));
        Ok(TurnOutcome::Completed { message_id })
    }

    /// Discard the conversation and the model-side context together.
    pub fn reset(&mut self) {
        info!("Resetting conversation");
        self.conversation.clear();
        self.manager.start_new_session();
        self.transcript
            .log(ConversationEvent::new("session_reset", json!({})));
    }
}
