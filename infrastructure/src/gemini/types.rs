//! Request and response types for the Gemini REST API.
//!
//! The wire format is camelCase JSON. Responses are tolerated loosely:
//! every field a chunk might omit is optional, and extraction helpers
//! return empty values rather than failing on absent parts.

use abrazeq_domain::GroundingMetadata;
use serde::{Deserialize, Serialize};

/// One turn in the request payload (role is `"user"` or `"model"`).
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// System instruction carried outside the turn list.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Tool enablement. Only the web-search augmentation is used.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tool {
    #[serde(rename = "googleSearch")]
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Body of a `streamGenerateContent` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

// ==================== Response types ====================

/// One partial-result object from the SSE stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl StreamChunk {
    /// Concatenated text of the first candidate's parts, empty if none.
    pub fn text(&self) -> String {
        let Some(candidate) = self.candidates.first() else {
            return String::new();
        };
        candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// Grounding metadata on the first candidate, if present.
    pub fn grounding(&self) -> Option<GroundingMetadata> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.clone())
    }
}
