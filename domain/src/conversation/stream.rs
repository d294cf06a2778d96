//! Streaming events for model session communication.
//!
//! [`StreamEvent`] represents individual events in a streaming model
//! response, enabling real-time display of output as it's generated.
//!
//! Fragments carry the raw incremental text piece, not the running total;
//! accumulation is the consumer's job. Citation metadata may ride along on
//! any event position, typically the last one before the stream closes.

use crate::conversation::grounding::GroundingMetadata;

/// An event in a streaming model response.
///
/// Bridges infrastructure-level streaming (SSE chunks from the remote API)
/// to the application layer.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// An incremental text fragment from the model.
    Fragment(String),
    /// Citation metadata attached to a chunk.
    Grounding(GroundingMetadata),
    /// The remote closed the stream normally.
    Completed,
    /// An error occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Fragment event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Fragment(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_text_returns_content() {
        let event = StreamEvent::Fragment("مرحبا".to_string());
        assert_eq!(event.text(), Some("مرحبا"));
        assert!(!event.is_terminal());
    }

    #[test]
    fn grounding_is_not_terminal() {
        let event = StreamEvent::Grounding(GroundingMetadata::default());
        assert_eq!(event.text(), None);
        assert!(!event.is_terminal());
    }

    #[test]
    fn completed_and_error_are_terminal() {
        assert!(StreamEvent::Completed.is_terminal());
        assert!(StreamEvent::Error("oops".to_string()).is_terminal());
        assert_eq!(StreamEvent::Completed.text(), None);
    }
}
