//! Server-sent events line parser.
//!
//! The streaming endpoint (`?alt=sse`) emits `data:` lines separated by
//! blank lines. The parser is fed one line at a time and yields an event
//! whenever a blank line closes one; `finish` flushes an event left open
//! when the connection ends without a trailing blank line.

/// A single SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` field, if the server sent one.
    pub event: Option<String>,
    /// The `data:` payload (multi-line data joined with `\n`).
    pub data: String,
}

/// Incremental line-oriented SSE parser.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator). Returns a completed event
    /// when `line` is the blank separator and data was pending.
    pub fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.take_pending();
        }

        if let Some(event_type) = line.strip_prefix("event:") {
            self.event = Some(event_type.trim_start().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data.trim_start());
        }
        // id:, retry:, and comment lines are ignored
        None
    }

    /// Flush a pending event after the last line of the stream.
    pub fn finish(&mut self) -> Option<SseEvent> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data),
        })
    }
}
