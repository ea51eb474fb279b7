//! Record encoders
//!
//! Two encodings are supported:
//! - `json`: one JSON object per line, for machines
//! - `console`: tab-separated text, for humans
//!
//! Any other encoding name is accepted by the configuration and encoded as
//! `json`. Encoding must never fail at the call site, so an unrecognized name
//! degrades to the structured format instead of dropping records.

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const ENCODER_JSON: &str = "json";
pub const ENCODER_CONSOLE: &str = "console";

const LEVEL_KEY: &str = "level";
const TIME_KEY: &str = "ts";
const CALLER_KEY: &str = "caller";
const MESSAGE_KEY: &str = "msg";
const RESERVED_KEYS: [&str; 4] = [LEVEL_KEY, TIME_KEY, CALLER_KEY, MESSAGE_KEY];

/// Requested encoding for a logger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Machine-readable JSON lines
    #[default]
    Json,
    /// Human-readable console text
    Console,
    /// Unrecognized encoding name, encoded as JSON
    Other(String),
}

impl Encoding {
    pub fn name(&self) -> &str {
        match self {
            Encoding::Json => ENCODER_JSON,
            Encoding::Console => ENCODER_CONSOLE,
            Encoding::Other(name) => name,
        }
    }

    /// The encoding actually used: `Other` resolves to `Json`
    #[must_use]
    pub fn resolve(&self) -> Encoding {
        match self {
            Encoding::Console => Encoding::Console,
            _ => Encoding::Json,
        }
    }
}

impl From<&str> for Encoding {
    fn from(name: &str) -> Self {
        match name {
            ENCODER_JSON => Encoding::Json,
            ENCODER_CONSOLE => Encoding::Console,
            other => Encoding::Other(other.to_string()),
        }
    }
}

impl From<String> for Encoding {
    fn from(name: String) -> Self {
        Encoding::from(name.as_str())
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Encoding::from(String::deserialize(deserializer)?))
    }
}

/// Escape line and column separators so one record stays one console line
fn escape_console(message: &str) -> String {
    message
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Turns entries into newline-terminated lines
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    timestamp_format: TimestampFormat,
    color: bool,
}

impl Encoder {
    pub fn new(encoding: &Encoding, timestamp_format: TimestampFormat, color: bool) -> Self {
        Self {
            encoding: encoding.resolve(),
            timestamp_format,
            color,
        }
    }

    /// The resolved encoding (never `Other`)
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut line = match self.encoding {
            Encoding::Console => self.encode_console(entry),
            _ => self.encode_json(entry),
        };
        line.push('\n');
        line
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            TIME_KEY.to_string(),
            self.timestamp_format.to_json_value(&entry.timestamp),
        );
        if let Some(ref caller) = entry.caller {
            json_obj.insert(
                CALLER_KEY.to_string(),
                serde_json::Value::String(caller.to_string()),
            );
        }
        json_obj.insert(
            MESSAGE_KEY.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        for (key, value) in &entry.fields {
            let key = if RESERVED_KEYS.contains(&key.as_str()) {
                format!("field.{}", key)
            } else {
                key.clone()
            };
            json_obj.insert(key, value.to_json_value());
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut parts = Vec::with_capacity(5);

        parts.push(self.timestamp_format.format(&entry.timestamp));
        parts.push(self.level_text(entry));
        if let Some(ref caller) = entry.caller {
            parts.push(caller.to_string());
        }
        parts.push(escape_console(&entry.message));
        if !entry.fields.is_empty() {
            parts.push(serde_json::Value::Object(entry.fields.to_json_map()).to_string());
        }

        parts.join("\t")
    }

    #[cfg(feature = "color")]
    fn level_text(&self, entry: &LogEntry) -> String {
        use colored::Colorize;
        if self.color {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "color"))]
    fn level_text(&self, entry: &LogEntry) -> String {
        entry.level.to_str().to_string()
    }
}
