//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording conversation
//! events (user prompts, model responses, stream failures, session resets)
//! to a structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the conversation
//! in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_message", "model_response").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible —
/// transcript failures must never disrupt a chat turn.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
