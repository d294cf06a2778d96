//! Application layer for abrazeq
//!
//! This crate contains the session manager, the conversation-driving use
//! case, and the port definitions implemented by the infrastructure layer.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError, ModelSession, SessionConfig, StreamHandle},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
};
pub use use_cases::{
    chat::{ChatService, TurnOutcome},
    session_manager::SessionManager,
};
