//! Gemini API client: HTTP transport, request building, endpoint layout.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::types::{
    Content, GenerateContentRequest, GenerationConfig, SystemInstruction, Tool,
};
use abrazeq_application::SessionConfig;
use abrazeq_domain::Model;
use std::time::Duration;
use tracing::debug;

/// Default API base.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Transport-level configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_output_tokens: u32,
    pub temperature: Option<f32>,
    /// Overall request timeout. Streams longer than this are cut off.
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE.to_string(),
            max_output_tokens: 8192,
            temperature: None,
            timeout_seconds: 120,
        }
    }
}

/// Gemini API client shared by all sessions of a gateway.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, http })
    }

    /// `{base}/{model}:streamGenerateContent?alt=sse`
    pub(crate) fn stream_url(&self, model: &Model) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse",
            self.config.base_url, model
        )
    }

    /// Build the request body for one turn: prior history plus the new
    /// user message, the session's system instruction, and the search
    /// tool when grounding is enabled.
    pub(crate) fn build_request_body(
        &self,
        contents: Vec<Content>,
        session: &SessionConfig,
    ) -> GenerateContentRequest {
        let system_instruction = if session.system_instruction.is_empty() {
            None
        } else {
            Some(SystemInstruction::text(&session.system_instruction))
        };

        let tools = if session.search_grounding {
            vec![Tool::default()]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            tools,
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        }
    }

    /// Open the streaming request; the returned response's body is the
    /// SSE byte stream.
    pub(crate) async fn open_stream(
        &self,
        model: &Model,
        body: &GenerateContentRequest,
    ) -> Result<reqwest::Response> {
        let url = self.stream_url(model);
        debug!(model = %model, turns = body.contents.len(), "Opening Gemini stream");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key")).unwrap()
    }

    #[test]
    fn stream_url_targets_the_model() {
        let url = client().stream_url(&Model::Gemini25Flash);
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
        );
    }

    #[test]
    fn body_includes_system_instruction_and_search_tool() {
        let session = SessionConfig::default();
        let body = client().build_request_body(vec![Content::user("سؤال")], &session);

        assert!(body.system_instruction.is_some());
        assert_eq!(body.tools.len(), 1);
        assert_eq!(body.contents.len(), 1);
    }

    #[test]
    fn body_omits_tools_when_grounding_disabled() {
        let session = SessionConfig {
            search_grounding: false,
            ..SessionConfig::default()
        };
        let body = client().build_request_body(vec![Content::user("hi")], &session);
        assert!(body.tools.is_empty());
    }

    #[test]
    fn body_omits_empty_system_instruction() {
        let session = SessionConfig {
            system_instruction: String::new(),
            ..SessionConfig::default()
        };
        let body = client().build_request_body(vec![Content::user("hi")], &session);
        assert!(body.system_instruction.is_none());
    }
}
