//! Gemini gateway adapter.
//!
//! Implements [`ChatGateway`]: owns the shared HTTP client and hands out
//! fresh sessions. Creating a session is pure configuration — no network
//! traffic happens until the first send.

use crate::gemini::client::{GeminiClient, GeminiConfig};
use crate::gemini::error::Result;
use crate::gemini::session::GeminiSession;
use abrazeq_application::{ChatGateway, ModelSession, SessionConfig};
use std::sync::Arc;
use tracing::info;

pub struct GeminiChatGateway {
    client: Arc<GeminiClient>,
}

impl GeminiChatGateway {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        info!(base_url = %config.base_url, "Gemini gateway initialized");
        Ok(Self {
            client: Arc::new(GeminiClient::new(config)?),
        })
    }
}

impl ChatGateway for GeminiChatGateway {
    fn create_session(&self, config: &SessionConfig) -> Box<dyn ModelSession> {
        Box::new(GeminiSession::new(
            Arc::clone(&self.client),
            config.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abrazeq_domain::Model;

    #[test]
    fn sessions_carry_their_configured_model() {
        let gateway = GeminiChatGateway::new(GeminiConfig::new("k")).unwrap();
        let session = gateway.create_session(&SessionConfig {
            model: Model::Gemini25Pro,
            ..SessionConfig::default()
        });
        assert_eq!(session.model(), &Model::Gemini25Pro);
    }
}
