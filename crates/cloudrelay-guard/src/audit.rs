//! Structured audit trail for outbound calls.
//!
//! Each call attempt produces exactly one [`AuditRecord`], written immediately as a
//! single JSON line. The sink writes to stderr by default so it never shares a stream
//! with the MCP stdio channel.
//!
//! Parameters are redacted before serialization: any key containing a credential-like
//! term (case-insensitive) has its value replaced with [`REDACTED`], at any depth.
//!
//! ```text
//! {"timestamp":"2026-10-19T08:15:02.114Z","requestId":"…","operation":"list_zones",
//!  "parameters":{"name":"example.com"},"outcome":"success","durationMs":184}
//! ```

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Replacement value for redacted parameters.
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_TERMS: &[&str] = &[
    "api_key",
    "apikey",
    "token",
    "secret",
    "password",
    "key",
    "credential",
    "authorization",
];

/// Returns `true` if `key` looks like it names a credential.
#[must_use]
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_TERMS.iter().any(|term| key.contains(term))
}

/// Returns a copy of `value` with every sensitive key's value replaced by [`REDACTED`].
///
/// Recurses into nested objects and into objects inside arrays.
#[must_use]
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = if is_sensitive_key(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact(value)
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Result of a call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// One audit entry per outbound call attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// When the attempt finished.
    pub timestamp: DateTime<Utc>,
    /// Correlation id for this attempt.
    pub request_id: Uuid,
    /// Operation (tool) name.
    pub operation: String,
    /// Redacted call parameters.
    pub parameters: Value,
    pub outcome: Outcome,
    /// Safe error message, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_summary: Option<String>,
    pub duration_ms: u64,
}

impl AuditRecord {
    /// Builds a record, redacting `parameters`. Absent or null parameters become `{}`.
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        parameters: Option<&Value>,
        outcome: Outcome,
        error_summary: Option<&str>,
        duration: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            request_id: Uuid::new_v4(),
            operation: operation.into(),
            parameters: parameters
                .filter(|value| !value.is_null())
                .map_or_else(|| Value::Object(Map::new()), redact),
            outcome,
            error_summary: error_summary.map(str::to_string),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Line-oriented audit writer.
///
/// Writes are serialized behind a mutex so concurrent records never interleave.
pub struct AuditSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl AuditSink {
    /// Audit lines go to `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Audit lines go to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Audit lines are appended to the file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    pub fn append_to_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Audit lines are captured in memory; returns the sink and a handle to read them.
    #[must_use]
    pub fn in_memory() -> (Self, AuditBuffer) {
        let buffer = AuditBuffer::default();
        (Self::new(buffer.clone()), buffer)
    }

    /// Records one call attempt.
    ///
    /// Never fails: serialization or write errors are logged and dropped so that
    /// auditing cannot break the calling operation.
    pub fn record(
        &self,
        operation: &str,
        parameters: Option<&Value>,
        outcome: Outcome,
        error_summary: Option<&str>,
        duration: Duration,
    ) {
        let record = AuditRecord::new(operation, parameters, outcome, error_summary, duration);
        self.emit(&record);
    }

    /// Writes an already-built record as one JSON line.
    pub fn emit(&self, record: &AuditRecord) {
        let mut line = match serde_json::to_vec(record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize audit record for '{}': {e}", record.operation);
                return;
            }
        };
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.write_all(&line).and_then(|()| writer.flush()) {
            warn!("Failed to write audit record for '{}': {e}", record.operation);
        }
    }
}

impl std::fmt::Debug for AuditSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditSink").finish_non_exhaustive()
    }
}

/// Shared in-memory destination for audit lines.
#[derive(Debug, Clone, Default)]
pub struct AuditBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl AuditBuffer {
    /// All lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// All records written so far, skipping lines that do not parse.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl Write for AuditBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
