//! Conversation store: the ordered list of exchanged messages.
//!
//! A send appends a user message and an empty streaming model message as a
//! unit. At most one message is streaming at any time; the store rejects a
//! second exchange while one is in flight.

use crate::conversation::grounding::GroundingMetadata;
use crate::conversation::message::{Message, MessageId};
use crate::core::error::DomainError;

/// Marker appended to a model message whose stream failed partway.
const ERROR_MARKER: &str = "\n\n⚠️ عذراً، حدث خطأ أثناء معالجة طلبك. حاول مرة أخرى.";

/// The ordered conversation log displayed to the user (Entity).
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and its paired empty model response.
    ///
    /// The user message is finalized immediately; the model message is
    /// created empty and streaming. Returns the model message id used to
    /// address the in-flight turn.
    pub fn begin_exchange(
        &mut self,
        user_text: impl Into<String>,
    ) -> Result<MessageId, DomainError> {
        if self.streaming_id().is_some() {
            return Err(DomainError::ExchangeInFlight);
        }
        self.messages.push(Message::user(user_text));
        let model_message = Message::streaming_model();
        let id = model_message.id;
        self.messages.push(model_message);
        Ok(id)
    }

    /// Replace the streaming message's content with the accumulated text.
    ///
    /// The caller hands over the full text so far, not a fragment.
    pub fn update_streaming(
        &mut self,
        id: MessageId,
        accumulated: impl Into<String>,
    ) -> Result<(), DomainError> {
        let message = self.streaming_message_mut(id)?;
        message.content = accumulated.into();
        Ok(())
    }

    /// Freeze the streaming message with its final text and citations.
    pub fn complete_exchange(
        &mut self,
        id: MessageId,
        full_text: impl Into<String>,
        grounding: Option<GroundingMetadata>,
    ) -> Result<(), DomainError> {
        let message = self.streaming_message_mut(id)?;
        message.content = full_text.into();
        message.grounding = grounding;
        message.is_streaming = false;
        Ok(())
    }

    /// Mark the streaming message as failed: keep whatever text arrived,
    /// append the inline error marker, and stop the streaming indicator.
    pub fn fail_exchange(&mut self, id: MessageId) -> Result<(), DomainError> {
        let message = self.streaming_message_mut(id)?;
        message.content.push_str(ERROR_MARKER);
        message.is_streaming = false;
        Ok(())
    }

    /// Discard all turns.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up a message by id.
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Id of the in-flight model message, if any.
    pub fn streaming_id(&self) -> Option<MessageId> {
        self.messages.iter().find(|m| m.is_streaming).map(|m| m.id)
    }

    fn streaming_message_mut(&mut self, id: MessageId) -> Result<&mut Message, DomainError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::UnknownMessage(id.to_string()))?;
        if !message.is_streaming {
            return Err(DomainError::NotStreaming(id.to_string()));
        }
        Ok(message)
    }
}
