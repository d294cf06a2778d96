//! Domain layer for abrazeq
//!
//! This crate contains the core entities and value objects of the chat
//! assistant. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! The ordered list of exchanged turns. A send appends a user message and
//! an empty streaming model message as a unit; the model message is filled
//! in incrementally and then frozen.
//!
//! ## Streaming
//!
//! Provider sessions emit a finite sequence of [`StreamEvent`]s — raw text
//! fragments plus optional citation metadata — which upper layers fold into
//! the accumulated response text.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    grounding::{GroundingChunk, GroundingMetadata, SearchEntryPoint, WebSource},
    message::{Message, MessageId, Role},
    store::Conversation,
    stream::StreamEvent,
};
pub use core::{error::DomainError, model::Model};
