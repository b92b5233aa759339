//! JSON reporter
//!
//! Buffers every event into an ordered message list plus the terminal
//! result, and serializes the whole document once at `close`. Fields left
//! unset are omitted from the output entirely (never `null`), so the
//! document round-trips losslessly.

use super::Reporter;
use crate::models::{CommandResult, SourceLocation};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl JsonMessage {
    fn new(kind: &str, message: &str, location: Option<&SourceLocation>) -> Self {
        let location = location.cloned().unwrap_or_default();
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
            file: location.file,
            line: location.line,
            col: location.col,
            end_line: location.end_line,
            end_column: location.end_column,
            code: location.code,
            key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResult {
    pub total: usize,
    pub documented: usize,
    pub undocumented: usize,
    pub percent: u32,
    pub health: String,
    pub message: String,
    pub badge: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    pub messages: Vec<JsonMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonResult>,
}

pub struct JsonReporter<W: Write> {
    out: W,
    document: JsonDocument,
    closed: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            document: JsonDocument::default(),
            closed: false,
        }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn write_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.document
            .messages
            .push(JsonMessage::new("error", message, location));
    }

    fn write_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.document
            .messages
            .push(JsonMessage::new("warning", message, location));
    }

    fn write_info(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.document
            .messages
            .push(JsonMessage::new("info", message, location));
    }

    fn write_debug(&mut self, message: &str) {
        self.document
            .messages
            .push(JsonMessage::new("debug", message, None));
    }

    fn open_group(&mut self, title: &str, key: Option<&str>) {
        let mut message = JsonMessage::new("group", title, None);
        message.key = key.map(str::to_string);
        self.document.messages.push(message);
    }

    fn close_group(&mut self, key: Option<&str>) {
        let mut message = JsonMessage::new("endgroup", "", None);
        message.key = key.map(str::to_string);
        self.document.messages.push(message);
    }

    fn set_progress(&mut self, _total: usize, _current: usize, _message: Option<&str>) {
        // Not meaningful in a document emitted once at run end.
    }

    fn set_result(&mut self, result: &CommandResult) {
        let aggregate = &result.aggregate;
        self.document.result = Some(JsonResult {
            total: aggregate.total,
            documented: aggregate.documented(),
            undocumented: aggregate.undocumented,
            percent: aggregate.documented_percentage_display(),
            health: result.health_glyph().to_string(),
            message: result.message.clone(),
            badge: result.badge_url(),
        });
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match serde_json::to_string_pretty(&self.document) {
            Ok(json) => {
                if let Err(e) = writeln!(self.out, "{json}") {
                    warn!("failed to write JSON document: {e}");
                }
            }
            Err(e) => warn!("failed to serialize JSON document: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_location, test_result};

    fn run(f: impl FnOnce(&mut JsonReporter<&mut Vec<u8>>)) -> String {
        let mut buf = Vec::new();
        let mut reporter = JsonReporter::new(&mut buf);
        f(&mut reporter);
        reporter.close();
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn nothing_written_before_close() {
        let mut buf = Vec::new();
        let mut reporter = JsonReporter::new(&mut buf);
        reporter.write_info("buffered", None);
        reporter.set_result(&test_result());
        drop(reporter);
        assert!(buf.is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut buf = Vec::new();
        let mut reporter = JsonReporter::new(&mut buf);
        reporter.write_info("once", None);
        reporter.close();
        reporter.close();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("\"once\"").count(), 1);
    }

    #[test]
    fn unset_fields_are_absent() {
        let out = run(|r| {
            r.write_debug("dbg");
            r.close_group(None);
        });
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages[0], serde_json::json!({"type": "debug", "message": "dbg"}));
        // A bare endgroup has no message, key, or location fields at all.
        assert_eq!(messages[1], serde_json::json!({"type": "endgroup"}));
        assert!(value.get("result").is_none());
    }

    #[test]
    fn document_round_trips() {
        let out = run(|r| {
            r.write_error("missing docs", Some(&test_location()));
            r.open_group("Analyzing App.csproj", Some("app"));
            r.write_warning("no source files analyzed", None);
            r.close_group(Some("app"));
            r.set_result(&test_result());
        });

        let parsed: JsonDocument = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.messages.len(), 4);
        assert_eq!(parsed.messages[0].kind, "error");
        assert_eq!(parsed.messages[0].file.as_deref(), Some("src/Widget.cs"));
        assert_eq!(parsed.messages[0].line, Some(12));
        assert_eq!(parsed.messages[0].end_column, Some(20));
        assert_eq!(parsed.messages[1].key.as_deref(), Some("app"));
        assert_eq!(parsed.messages[3].kind, "endgroup");

        let result = parsed.result.as_ref().expect("result present");
        assert_eq!(result.total, 10);
        assert_eq!(result.documented, 7);
        assert_eq!(result.undocumented, 3);
        assert_eq!(result.percent, 70);
        assert_eq!(result.health, "\u{26a0}\u{fe0f}");
        assert!(result.badge.contains("70%25-yellow"));

        // Serializing the parsed document reproduces the original exactly.
        let reserialized = serde_json::to_string_pretty(&parsed).unwrap() + "\n";
        assert_eq!(reserialized, out);
    }

    #[test]
    fn progress_is_not_recorded() {
        let out = run(|r| r.set_progress(10, 5, Some("App.csproj")));
        let parsed: JsonDocument = serde_json::from_str(&out).unwrap();
        assert!(parsed.messages.is_empty());
    }
}
