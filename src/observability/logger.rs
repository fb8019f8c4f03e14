//! Structured JSON logger
//!
//! One log line = one event:
//! - Structured (JSON), with an RFC 3339 timestamp
//! - Deterministic key ordering
//! - Explicit severity levels
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues; swallowed callback failures land here
    Warn = 1,
    /// Operation failures
    Error = 2,
    /// Unrecoverable, process exits
    Fatal = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON log lines
///
/// Writes are synchronous and unbuffered; field keys are ordered
/// deterministically so lines diff cleanly across runs.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stdout());
    }

    /// Log to stderr (for errors and fatal messages)
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Internal log implementation that writes to a given writer
    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        // Build JSON manually to keep the fixed keys in a fixed position
        let mut output = String::with_capacity(256);

        output.push('{');

        // Timestamp first, then event, then severity
        output.push_str("\"ts\":\"");
        output.push_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        output.push('"');

        output.push_str(",\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        // Sort fields alphabetically for deterministic output
        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');

        // Write atomically (one syscall)
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    /// Escape special characters for JSON strings
    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log_stderr(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log_stderr(Severity::Fatal, event, fields);
    }
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(
    severity: Severity,
    event: &str,
    fields: &[(&str, &str)],
) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
