//! Session manager: the single owner of the conversational session handle.
//!
//! Mediates all communication with the remote model. The handle is created
//! lazily on first send, replaced wholesale on reset, and kept for the
//! lifetime of the application otherwise.
//!
//! # Streaming contract
//!
//! For one send, fragments are folded into an accumulator that is never
//! reset mid-stream, and `on_chunk` receives the *entire accumulated text
//! so far* on every fragment — callers replace their displayed text rather
//! than appending. Exactly one of `on_complete` / `on_error` fires per
//! send. Citation metadata is retained last-write-wins.
//!
//! A send is not designed for concurrent invocation against the same
//! session; the `&mut self` receiver surfaces that requirement to callers,
//! who serialize sends (the REPL awaits each turn before reading input).

use crate::ports::chat_gateway::{ChatGateway, GatewayError, ModelSession, SessionConfig};
use abrazeq_domain::{GroundingMetadata, StreamEvent};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the single active session with the remote model.
pub struct SessionManager {
    gateway: Arc<dyn ChatGateway>,
    config: SessionConfig,
    session: Option<Box<dyn ModelSession>>,
}

impl SessionManager {
    /// Create a manager with no active session; one is created lazily on
    /// the first send, or eagerly via [`start_new_session`](Self::start_new_session).
    pub fn new(gateway: Arc<dyn ChatGateway>, config: SessionConfig) -> Self {
        Self {
            gateway,
            config,
            session: None,
        }
    }

    /// Discard any existing session and create a fresh one.
    ///
    /// Subsequent sends address a model with no memory of earlier turns.
    pub fn start_new_session(&mut self) {
        info!(model = %self.config.model, "Starting new chat session");
        self.session = Some(self.gateway.create_session(&self.config));
    }

    /// Whether a session handle currently exists.
    pub fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Send one user turn and stream the response.
    ///
    /// `on_chunk` receives the accumulated text after every fragment.
    /// `on_complete` receives the final text plus the last citation
    /// metadata seen, if any. Any setup or mid-stream failure is delivered
    /// to `on_error` instead, exactly once, with no retry; the session
    /// stays usable for the next send.
    ///
    /// Empty-message validation is the caller's responsibility.
    pub async fn send_message_stream<C, D, E>(
        &mut self,
        message: &str,
        mut on_chunk: C,
        on_complete: D,
        on_error: E,
    ) where
        C: FnMut(&str),
        D: FnOnce(&str, Option<GroundingMetadata>),
        E: FnOnce(GatewayError),
    {
        let session = self.ensure_session();

        let mut handle = match session.stream_message(message).await {
            Ok(handle) => handle,
            Err(err) => {
                warn!("Stream setup failed: {err}");
                on_error(err);
                return;
            }
        };

        let mut accumulated = String::new();
        let mut grounding: Option<GroundingMetadata> = None;

        while let Some(event) = handle.next_event().await {
            match event {
                StreamEvent::Fragment(fragment) => {
                    accumulated.push_str(&fragment);
                    on_chunk(&accumulated);
                }
                StreamEvent::Grounding(metadata) => {
                    // Last write wins; earlier metadata is discarded unmerged.
                    grounding = Some(metadata);
                }
                StreamEvent::Completed => {
                    debug!(bytes = accumulated.len(), "Stream completed");
                    on_complete(&accumulated, grounding);
                    return;
                }
                StreamEvent::Error(reason) => {
                    warn!("Stream failed: {reason}");
                    on_error(GatewayError::RequestFailed(reason));
                    return;
                }
            }
        }

        // Channel closed without a terminal event: the remote ended the
        // stream, so surface what accumulated as the completed response.
        debug!(bytes = accumulated.len(), "Stream closed");
        on_complete(&accumulated, grounding);
    }

    /// Lazily create the session handle if none exists.
    fn ensure_session(&mut self) -> &dyn ModelSession {
        let Self {
            gateway,
            config,
            session,
        } = self;
        if session.is_none() {
            debug!("No active session; creating one before send");
        }
        session
            .get_or_insert_with(|| gateway.create_session(config))
            .as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::StreamHandle;
    use abrazeq_domain::{GroundingChunk, Model, WebSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    /// Session that replays a scripted event sequence.
    struct ScriptedSession {
        model: Model,
        script: Mutex<Vec<Vec<StreamEvent>>>,
        setup_error: bool,
    }

    impl ScriptedSession {
        fn new(script: Vec<Vec<StreamEvent>>) -> Self {
            Self {
                model: Model::default(),
                script: Mutex::new(script),
                setup_error: false,
            }
        }

        fn failing_setup() -> Self {
            Self {
                model: Model::default(),
                script: Mutex::new(Vec::new()),
                setup_error: true,
            }
        }
    }

    #[async_trait]
    impl ModelSession for ScriptedSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn stream_message(&self, _message: &str) -> Result<StreamHandle, GatewayError> {
            if self.setup_error {
                return Err(GatewayError::ConnectionError("refused".to_string()));
            }
            let events = self.script.lock().unwrap().remove(0);
            let (tx, rx) = mpsc::channel(16);
            tokio::spawn(async move {
                for event in events {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            });
            Ok(StreamHandle::new(rx))
        }
    }

    struct CountingGateway {
        created: AtomicUsize,
        sessions: Mutex<Vec<ScriptedSession>>,
    }

    impl CountingGateway {
        fn new(sessions: Vec<ScriptedSession>) -> Self {
            Self {
                created: AtomicUsize::new(0),
                sessions: Mutex::new(sessions),
            }
        }

        fn created_count(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }
    }

    impl ChatGateway for CountingGateway {
        fn create_session(&self, _config: &SessionConfig) -> Box<dyn ModelSession> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Box::new(self.sessions.lock().unwrap().remove(0))
        }
    }

    fn fragments(parts: &[&str]) -> Vec<StreamEvent> {
        let mut events: Vec<StreamEvent> = parts
            .iter()
            .map(|p| StreamEvent::Fragment(p.to_string()))
            .collect();
        events.push(StreamEvent::Completed);
        events
    }

    fn grounding_with(uri: &str) -> GroundingMetadata {
        GroundingMetadata {
            grounding_chunks: vec![GroundingChunk {
                web: Some(WebSource {
                    uri: uri.to_string(),
                    title: String::new(),
                }),
            }],
            search_entry_point: None,
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn chunks_are_cumulative_and_complete_sees_total() {
        let session = ScriptedSession::new(vec![fragments(&["ab", "cd", "ef"])]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut chunks = Vec::new();
        let mut final_text = None;
        manager
            .send_message_stream(
                "hi",
                |acc| chunks.push(acc.to_string()),
                |full, _| final_text = Some(full.to_string()),
                |err| panic!("unexpected error: {err}"),
            )
            .await;

        assert_eq!(chunks, vec!["ab", "abcd", "abcdef"]);
        assert_eq!(final_text.as_deref(), Some("abcdef"));
    }

    #[tokio::test]
    async fn grounding_metadata_is_last_write_wins() {
        let events = vec![
            StreamEvent::Fragment("a".to_string()),
            StreamEvent::Grounding(grounding_with("https://first.example")),
            StreamEvent::Fragment("b".to_string()),
            StreamEvent::Fragment("c".to_string()),
            StreamEvent::Grounding(grounding_with("https://second.example")),
            StreamEvent::Completed,
        ];
        let session = ScriptedSession::new(vec![events]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut seen = None;
        manager
            .send_message_stream(
                "ابحث",
                |_| {},
                |_, grounding| seen = grounding,
                |err| panic!("unexpected error: {err}"),
            )
            .await;

        let seen = seen.expect("metadata should be delivered");
        assert_eq!(
            seen.web_sources().next().unwrap().uri,
            "https://second.example"
        );
    }

    #[tokio::test]
    async fn error_suppresses_complete() {
        let events = vec![
            StreamEvent::Fragment("partial".to_string()),
            StreamEvent::Error("connection reset".to_string()),
        ];
        let session = ScriptedSession::new(vec![events]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut completions = 0;
        let mut errors = 0;
        manager
            .send_message_stream("hi", |_| {}, |_, _| completions += 1, |_| errors += 1)
            .await;

        assert_eq!(completions, 0);
        assert_eq!(errors, 1);
    }

    #[tokio::test]
    async fn setup_failure_reports_error_once() {
        let gateway = Arc::new(CountingGateway::new(vec![ScriptedSession::failing_setup()]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut chunks = 0;
        let mut errors = Vec::new();
        manager
            .send_message_stream(
                "hi",
                |_| chunks += 1,
                |_, _| panic!("must not complete"),
                |err| errors.push(err.to_string()),
            )
            .await;

        assert_eq!(chunks, 0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("refused"));
    }

    #[tokio::test]
    async fn channel_close_without_terminal_completes() {
        // No Completed marker: sender drops after the fragments.
        let events = vec![
            StreamEvent::Fragment("x".to_string()),
            StreamEvent::Fragment("y".to_string()),
        ];
        let session = ScriptedSession::new(vec![events]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut final_text = None;
        manager
            .send_message_stream(
                "hi",
                |_| {},
                |full, _| final_text = Some(full.to_string()),
                |err| panic!("unexpected error: {err}"),
            )
            .await;

        assert_eq!(final_text.as_deref(), Some("xy"));
    }

    #[tokio::test]
    async fn session_is_created_lazily_on_first_send() {
        let session = ScriptedSession::new(vec![fragments(&["ok"])]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway.clone(), SessionConfig::default());

        assert!(!manager.has_active_session());
        manager
            .send_message_stream("hi", |_| {}, |_, _| {}, |err| panic!("{err}"))
            .await;

        assert!(manager.has_active_session());
        assert_eq!(gateway.created_count(), 1);
    }

    #[tokio::test]
    async fn reset_replaces_the_session_handle() {
        let sessions = vec![
            ScriptedSession::new(vec![fragments(&["one"])]),
            ScriptedSession::new(vec![fragments(&["two"])]),
        ];
        let gateway = Arc::new(CountingGateway::new(sessions));
        let mut manager = SessionManager::new(gateway.clone(), SessionConfig::default());

        manager
            .send_message_stream("a", |_| {}, |_, _| {}, |err| panic!("{err}"))
            .await;
        assert_eq!(gateway.created_count(), 1);

        manager.start_new_session();
        assert_eq!(gateway.created_count(), 2);

        // The replacement session serves the next send; no third creation.
        manager
            .send_message_stream("b", |_| {}, |_, _| {}, |err| panic!("{err}"))
            .await;
        assert_eq!(gateway.created_count(), 2);
    }

    #[tokio::test]
    async fn session_survives_a_failed_send() {
        let session = ScriptedSession::new(vec![
            vec![StreamEvent::Error("boom".to_string())],
            fragments(&["recovered"]),
        ]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway.clone(), SessionConfig::default());

        let mut errors = 0;
        manager
            .send_message_stream("a", |_| {}, |_, _| panic!("must not complete"), |_| errors += 1)
            .await;
        assert_eq!(errors, 1);

        let mut final_text = None;
        manager
            .send_message_stream(
                "b",
                |_| {},
                |full, _| final_text = Some(full.to_string()),
                |err| panic!("{err}"),
            )
            .await;
        assert_eq!(final_text.as_deref(), Some("recovered"));
        assert_eq!(gateway.created_count(), 1);
    }

    #[tokio::test]
    async fn arabic_code_block_scenario() {
        let parts = ["```python\n", "def add(a, b):\n", "    return a + b\n```"];
        let session = ScriptedSession::new(vec![fragments(&parts)]);
        let gateway = Arc::new(CountingGateway::new(vec![session]));
        let mut manager = SessionManager::new(gateway, SessionConfig::default());

        let mut chunks = Vec::new();
        let mut completed = None;
        manager
            .send_message_stream(
                "اكتب دالة جمع",
                |acc| chunks.push(acc.to_string()),
                |full, grounding| completed = Some((full.to_string(), grounding)),
                |err| panic!("unexpected error: {err}"),
            )
            .await;

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "```python\n");
        assert_eq!(chunks[1], "```python\ndef add(a, b):\n");

        let (full, grounding) = completed.expect("one completion");
        assert_eq!(full, "```python\ndef add(a, b):\n    return a + b\n```");
        assert!(grounding.is_none());
    }
}
