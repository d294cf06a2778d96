//! Gemini session implementation.
//!
//! Implements [`ModelSession`] over the stateless `streamGenerateContent`
//! API: the session keeps the turn history locally and replays it on every
//! request. The history is extended only after a turn streams to
//! completion, so a failed send leaves no residue and the next send works
//! against the same context as before the failure.

use crate::gemini::client::GeminiClient;
use crate::gemini::error::{GeminiError, Result};
use crate::gemini::sse::SseParser;
use crate::gemini::types::{Content, StreamChunk};
use abrazeq_application::{GatewayError, ModelSession, SessionConfig, StreamHandle};
use abrazeq_domain::{Model, StreamEvent};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tokio_util::io::StreamReader;
use tracing::debug;

/// An active conversation with a Gemini model.
pub struct GeminiSession {
    client: Arc<GeminiClient>,
    config: SessionConfig,
    history: Arc<Mutex<Vec<Content>>>,
}

impl GeminiSession {
    pub fn new(client: Arc<GeminiClient>, config: SessionConfig) -> Self {
        Self {
            client,
            config,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ModelSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.config.model
    }

    async fn stream_message(&self, message: &str) -> std::result::Result<StreamHandle, GatewayError> {
        let mut contents = self.history.lock().await.clone();
        contents.push(Content::user(message));
        let body = self.client.build_request_body(contents, &self.config);

        // Setup errors (connect, auth, quota) surface directly.
        let response = self.client.open_stream(&self.config.model, &body).await?;

        let (tx, rx) = mpsc::channel(32);
        let history = Arc::clone(&self.history);
        let user_turn = Content::user(message);

        tokio::spawn(async move {
            match pump_stream(response, &tx).await {
                Ok(full_text) => {
                    let mut history = history.lock().await;
                    history.push(user_turn);
                    history.push(Content::model(full_text));
                    drop(history);
                    let _ = tx.send(StreamEvent::Completed).await;
                }
                Err(err) => {
                    let _ = tx.send(StreamEvent::Error(err.to_string())).await;
                }
            }
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Read the SSE body, forwarding fragments and grounding metadata as they
/// arrive. Returns the full concatenated text on normal end of stream.
async fn pump_stream(
    response: reqwest::Response,
    tx: &mpsc::Sender<StreamEvent>,
) -> Result<String> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();

    let mut parser = SseParser::new();
    let mut full_text = String::new();

    while let Some(line) = lines.next_line().await? {
        if let Some(event) = parser.push_line(&line) {
            forward_chunk(&event.data, &mut full_text, tx).await?;
        }
    }
    if let Some(event) = parser.finish() {
        forward_chunk(&event.data, &mut full_text, tx).await?;
    }

    debug!(bytes = full_text.len(), "Gemini stream drained");
    Ok(full_text)
}

async fn forward_chunk(
    data: &str,
    full_text: &mut String,
    tx: &mpsc::Sender<StreamEvent>,
) -> Result<()> {
    // Some SSE backends close with a sentinel rather than just EOF.
    if data == "[DONE]" {
        return Ok(());
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| GeminiError::Parse(format!("{e} in chunk: {}", data)))?;

    let text = chunk.text();
    if !text.is_empty() {
        full_text.push_str(&text);
        let _ = tx.send(StreamEvent::Fragment(text)).await;
    }

    if let Some(grounding) = chunk.grounding() {
        let _ = tx.send(StreamEvent::Grounding(grounding)).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use abrazeq_domain::GroundingMetadata;

    async fn run_forward(payloads: &[&str]) -> (String, Vec<StreamEvent>) {
        let (tx, mut rx) = mpsc::channel(32);
        let mut full_text = String::new();
        for payload in payloads {
            forward_chunk(payload, &mut full_text, &tx).await.unwrap();
        }
        drop(tx);
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (full_text, events)
    }

    #[tokio::test]
    async fn fragments_accumulate_and_forward() {
        let (full, events) = run_forward(&[
            r#"{"candidates":[{"content":{"parts":[{"text":"مرح"}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"با"}]}}]}"#,
        ])
        .await;

        assert_eq!(full, "مرحبا");
        assert_eq!(
            events,
            vec![
                StreamEvent::Fragment("مرح".to_string()),
                StreamEvent::Fragment("با".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn grounding_rides_along_with_the_final_chunk() {
        let (_, events) = run_forward(&[
            r#"{"candidates":[{"content":{"parts":[{"text":"نص"}]},"groundingMetadata":{"groundingChunks":[{"web":{"uri":"https://example.com","title":"مصدر"}}]}}]}"#,
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], StreamEvent::Fragment(_)));
        match &events[1] {
            StreamEvent::Grounding(meta) => {
                assert_eq!(meta.web_sources().next().unwrap().uri, "https://example.com");
            }
            other => panic!("expected grounding event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_chunks_and_done_sentinel_are_silent() {
        let (full, events) = run_forward(&[
            r#"{"candidates":[{}]}"#,
            "[DONE]",
        ])
        .await;
        assert!(full.is_empty());
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn malformed_chunk_is_a_parse_error() {
        let (tx, _rx) = mpsc::channel(4);
        let mut full_text = String::new();
        let err = forward_chunk("{not json", &mut full_text, &tx)
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Parse(_)));
    }

    #[test]
    fn grounding_metadata_type_roundtrips() {
        let meta: GroundingMetadata = serde_json::from_str(
            r#"{"groundingChunks":[{"web":{"uri":"u","title":"t"}}]}"#,
        )
        .unwrap();
        assert!(!meta.is_empty());
    }
}
