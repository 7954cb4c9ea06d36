//! Structured JSON logging
//!
//! - One log line = one event
//! - Deterministic key ordering
//! - Synchronous, no buffering
//!
//! The gateway logs completed and failed operations; backends stay silent and
//! report through their `StoreResult` instead.

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues
    Warn = 1,
    /// Operation failures
    Error = 2,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle events emitted by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    StoreCompleted,
    StoreFailed,
    RetrieveCompleted,
    RetrieveFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreCompleted => "store_completed",
            Event::StoreFailed => "store_failed",
            Event::RetrieveCompleted => "retrieve_completed",
            Event::RetrieveFailed => "retrieve_failed",
        }
    }
}

/// A structured logger that outputs one JSON object per line
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields.
    ///
    /// INFO goes to stdout; WARN and ERROR go to stderr.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        match severity {
            Severity::Info => Self::log_to_writer(severity, event, fields, &mut io::stdout()),
            _ => Self::log_to_writer(severity, event, fields, &mut io::stderr()),
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        // Build JSON manually to keep key ordering deterministic
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");

        // One write, no buffering
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

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
}

/// Log a gateway lifecycle event with fields
pub fn log_event(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut buffer = Vec::new();
        Logger::log_to_writer(severity, event, fields, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_event_first_then_severity() {
        let line = render(Severity::Info, "store_completed", &[]);
        assert_eq!(
            line,
            "{\"event\":\"store_completed\",\"severity\":\"INFO\"}\n"
        );
    }

    #[test]
    fn test_fields_sorted_alphabetically() {
        let line = render(
            Severity::Error,
            "store_failed",
            &[("key", "keyImage"), ("backend", "prefs")],
        );
        let backend_pos = line.find("backend").unwrap();
        let key_pos = line.find("\"key\"").unwrap();
        assert!(backend_pos < key_pos);
    }

    #[test]
    fn test_values_escaped() {
        let line = render(Severity::Warn, "store_failed", &[("detail", "a\"b\nc")]);
        assert!(line.contains("a\\\"b\\nc"));
    }

    #[test]
    fn test_output_is_valid_json() {
        let line = render(
            Severity::Info,
            "retrieve_completed",
            &[("backend", "file_system"), ("key", "keyImage")],
        );
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["event"], "retrieve_completed");
        assert_eq!(parsed["backend"], "file_system");
    }
}
