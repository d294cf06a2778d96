//! Gemini adapter
//!
//! Implements the [`ChatGateway`](abrazeq_application::ChatGateway) and
//! [`ModelSession`](abrazeq_application::ModelSession) ports against the
//! Gemini `streamGenerateContent` REST API.
//!
//! The remote API is stateless: each request carries the full turn history,
//! which the session keeps locally and extends only after a turn streams to
//! completion. Streaming uses server-sent events (`?alt=sse`); each event
//! payload is a partial-result object carrying incremental text and,
//! when web search was used, trailing grounding metadata.

pub mod client;
pub mod error;
pub mod gateway;
pub mod session;
pub mod sse;
pub mod types;
