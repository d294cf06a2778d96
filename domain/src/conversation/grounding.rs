//! Citation metadata attached to search-grounded responses.
//!
//! When a response was augmented with web search, the provider attaches
//! grounding metadata to one of the streamed chunks (typically the last).
//! The wire format uses camelCase field names; every field is optional in
//! practice, so deserialization tolerates anything missing.

use serde::{Deserialize, Serialize};

/// A single web source backing part of a grounded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// One citation entry. The `web` payload may be absent for non-web
/// grounding sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// Rendered search-suggestion widget returned alongside grounded answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
}

/// Grounding metadata for a completed model message.
///
/// Citations keep the order the provider returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<SearchEntryPoint>,
}

impl GroundingMetadata {
    /// Returns true if there is nothing worth displaying.
    pub fn is_empty(&self) -> bool {
        self.grounding_chunks.is_empty() && self.search_entry_point.is_none()
    }

    /// Iterate over the web sources, skipping chunks without one.
    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.grounding_chunks.iter().filter_map(|c| c.web.as_ref())
    }
}
