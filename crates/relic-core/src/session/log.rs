//! Error log - append-only entries mirrored to a persistent text sink

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the persistent sink, created directly under the analysis root.
pub const ERROR_SINK_NAME: &str = "relic-errors.log";

/// Error taxonomy. Nothing here is fatal to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FileNotFound,
    FileReadFailure,
    UnsupportedDialect,
    SyntaxParseFailure,
    ExtractionFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::FileReadFailure => "file_read_failure",
            ErrorKind::UnsupportedDialect => "unsupported_dialect",
            ErrorKind::SyntaxParseFailure => "syntax_parse_failure",
            ErrorKind::ExtractionFailure => "extraction_failure",
        };
        f.write_str(name)
    }
}

/// One logged analysis error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub kind: ErrorKind,
    pub file: String,
    pub line: u32,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only error collector shared across analysis threads
pub struct ErrorLog {
    entries: Mutex<Vec<ErrorLogEntry>>,
    sink: Mutex<Option<File>>,
}

impl ErrorLog {
    /// In-memory log with no persistent sink.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            sink: Mutex::new(None),
        }
    }

    /// Log mirrored to `relic-errors.log` under `root`. Falls back to
    /// in-memory only when the sink cannot be opened.
    pub fn with_sink(root: &Path) -> Self {
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(root.join(ERROR_SINK_NAME))
            .ok();
        Self {
            entries: Mutex::new(Vec::new()),
            sink: Mutex::new(sink),
        }
    }

    pub fn record(&self, kind: ErrorKind, file: &str, line: u32, message: &str) {
        let entry = ErrorLogEntry {
            kind,
            file: file.to_string(),
            line,
            message: message.to_string(),
            timestamp: Utc::now(),
        };
        if let Ok(mut sink) = self.sink.lock() {
            if let Some(out) = sink.as_mut() {
                let stamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(
                    out,
                    "[{}] {} in {}:{} - {}",
                    stamp, entry.kind, entry.file, entry.line, entry.message
                );
            }
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.entries
            .lock()
            .map(|e| e.iter().filter(|entry| entry.kind == kind).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }

    /// Clears in-memory entries; the persistent sink is append-only and kept.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}
