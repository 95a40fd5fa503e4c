//! Hook event intake.
//!
//! The host agent writes one JSON object to stdin per invocation. Only
//! `tool_input.file_path` matters here; anything unreadable is treated as an
//! event without a file, which every dispatcher handles as a no-op.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

#[derive(Debug, Deserialize)]
struct HookPayload {
    #[serde(default)]
    tool_input: Value,
}

/// The triggering input of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Edited file; absent for session completion or unusable input.
    pub file_path: Option<String>,
    /// Caller-supplied tool arguments, kept opaque.
    pub tool_input: Map<String, Value>,
}

impl Event {
    /// An event carrying only a file path.
    pub fn for_file<S: Into<String>>(path: S) -> Self {
        Self {
            file_path: Some(path.into()),
            tool_input: Map::new(),
        }
    }

    /// Parse a serialized payload. Empty or malformed input yields an empty
    /// event rather than an error.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        let payload: HookPayload = match serde_json::from_str(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed hook payload");
                return Self::default();
            }
        };

        let tool_input = match payload.tool_input {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let file_path = tool_input
            .get("file_path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Self {
            file_path,
            tool_input,
        }
    }

    /// Read the whole payload from `reader`.
    pub fn from_reader<R: Read>(mut reader: R) -> Self {
        let mut raw = String::new();
        if let Err(e) = reader.read_to_string(&mut raw) {
            tracing::debug!(error = %e, "failed to read hook payload");
            return Self::default();
        }
        Self::parse(&raw)
    }
}
