//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered
//! writer. Transcript failures are logged and swallowed — they must never
//! break a chat turn.

use abrazeq_application::{ConversationEvent, ConversationLogger};
use chrono::Utc;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event so
/// a crash loses at most the in-flight line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!(
                        "Could not create transcript directory {}: {}",
                        parent.display(),
                        e
                    );
                    return None;
                }
            }
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let record = json!({
            "type": event.event_type,
            "timestamp": Utc::now().to_rfc3339(),
            "data": event.payload,
        });

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{record}") {
            warn!("Failed to write transcript event: {e}");
            return;
        }
        if let Err(e) = writer.flush() {
            warn!("Failed to flush transcript: {e}");
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
