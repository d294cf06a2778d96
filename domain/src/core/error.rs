//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("An exchange is already streaming")]
    ExchangeInFlight,

    #[error("Unknown message: {0}")]
    UnknownMessage(String),

    #[error("Message is not streaming: {0}")]
    NotStreaming(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_in_flight_display() {
        let error = DomainError::ExchangeInFlight;
        assert_eq!(error.to_string(), "An exchange is already streaming");
    }

    #[test]
    fn test_unknown_message_carries_id() {
        let error = DomainError::UnknownMessage("abc".to_string());
        assert!(error.to_string().contains("abc"));
    }
}
