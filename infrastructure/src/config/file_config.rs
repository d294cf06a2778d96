//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and resolved into the runtime
//! configuration types at startup.

use crate::gemini::client::{GeminiConfig, GEMINI_API_BASE};
use abrazeq_application::SessionConfig;
use abrazeq_domain::prompt::DEFAULT_SYSTEM_INSTRUCTION;
use abrazeq_domain::Model;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw provider configuration from TOML (`[provider]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model name
    pub model: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (not recommended — use the env var instead)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Max output tokens per response
    pub max_output_tokens: u32,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: GEMINI_API_BASE.to_string(),
            max_output_tokens: 8192,
            temperature: None,
            timeout_seconds: 120,
        }
    }
}

/// Raw chat configuration from TOML (`[chat]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Override the built-in system instruction
    pub system_prompt: Option<String>,
    /// Enable web-search augmentation
    pub search_grounding: bool,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            search_grounding: true,
        }
    }
}

/// Raw REPL configuration from TOML (`[repl]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    pub history_file: Option<String>,
}

/// Raw transcript logging configuration from TOML (`[log]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Path for the JSONL conversation transcript; unset disables it
    pub transcript: Option<String>,
}

/// Complete raw configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub chat: FileChatConfig,
    pub repl: FileReplConfig,
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Resolve the API key: the inline value wins over the environment.
    pub fn resolve_api_key(&self) -> Result<String, ConfigValidationError> {
        if let Some(key) = &self.provider.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.provider.api_key_env)
            .map_err(|_| ConfigValidationError::MissingApiKey(self.provider.api_key_env.clone()))
    }

    /// Build the transport configuration, validating as we go.
    pub fn gemini_config(&self, api_key: String) -> Result<GeminiConfig, ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(GeminiConfig {
            api_key,
            base_url: self.provider.base_url.clone(),
            max_output_tokens: self.provider.max_output_tokens,
            temperature: self.provider.temperature,
            timeout_seconds: self.provider.timeout_seconds,
        })
    }

    /// Build the session configuration (model, persona, search toggle).
    pub fn session_config(&self, model_override: Option<&str>) -> SessionConfig {
        let model: Model = model_override
            .unwrap_or(&self.provider.model)
            .parse()
            .unwrap_or_default();
        SessionConfig {
            model,
            system_instruction: self
                .chat
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.to_string()),
            search_grounding: self.chat.search_grounding,
        }
    }
}
