//! Infrastructure layer for abrazeq
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Gemini streaming gateway, configuration file
//! loading, and the JSONL conversation transcript logger.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileLogConfig,
    FileProviderConfig, FileReplConfig,
};
pub use gemini::{
    client::{GeminiClient, GeminiConfig},
    error::GeminiError,
    gateway::GeminiChatGateway,
    session::GeminiSession,
};
pub use logging::JsonlConversationLogger;
