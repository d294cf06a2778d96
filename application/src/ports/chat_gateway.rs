//! Chat gateway port
//!
//! Defines the interface for communicating with the hosted model provider.

use abrazeq_domain::{Model, StreamEvent};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while talking to the remote model.
///
/// Callers treat every variant uniformly: a send either completes or fails
/// once, and no failure is retried.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Configuration for a conversational session.
///
/// Fixed for the lifetime of a session handle; changing it means starting
/// a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model the session addresses.
    pub model: Model,
    /// System instruction (persona + language + formatting directives).
    pub system_instruction: String,
    /// Enable the provider's web-search augmentation.
    pub search_grounding: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            system_instruction: abrazeq_domain::prompt::DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            search_grounding: true,
        }
    }
}

/// Gateway for creating model sessions.
///
/// Session creation is local configuration, not a network call, so it is
/// synchronous and infallible; the first `stream_message` surfaces any
/// connectivity problems.
pub trait ChatGateway: Send + Sync {
    /// Create a new session with no memory of prior turns.
    fn create_session(&self, config: &SessionConfig) -> Box<dyn ModelSession>;
}

/// Handle for receiving streaming events from a model session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`: a finite, non-restartable pull
/// sequence. Each pull suspends the caller until the next fragment or
/// end-of-stream arrives.
pub struct StreamHandle {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Pull the next event; `None` means the stream closed.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// An active conversational session with the remote model.
///
/// The session owns the turn history; replacing the handle discards all
/// context. Implementations live in the infrastructure layer.
#[async_trait]
pub trait ModelSession: Send + Sync {
    /// The model this session addresses.
    fn model(&self) -> &Model;

    /// Open a streaming request for one user turn.
    ///
    /// Setup failures are returned directly; failures mid-stream arrive as
    /// [`StreamEvent::Error`] on the handle. A failed turn must leave the
    /// session usable for subsequent sends.
    async fn stream_message(&self, message: &str) -> Result<StreamHandle, GatewayError>;
}
