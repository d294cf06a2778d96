//! Conversation domain: messages, the ordered store, streaming events,
//! and citation metadata.

pub mod grounding;
pub mod message;
pub mod store;
pub mod stream;
