use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::Level;

use crate::event::ErrorFields;
use crate::logger::level_name;

pub const KEY_TIMESTAMP: &str = "timestamp";
pub const KEY_LEVEL: &str = "level";
pub const KEY_LOGGER: &str = "logger";
pub const KEY_MESSAGE: &str = "message";
pub const KEY_ERROR_KIND: &str = "error.kind";
pub const KEY_ERROR_MESSAGE: &str = "error.message";
pub const KEY_ERROR_STACK: &str = "error.stack";

/// Everything known about one event before it is rendered.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub timestamp: OffsetDateTime,
    pub level: Level,
    pub logger: String,
    pub message: String,
    pub error: Option<ErrorFields>,
    pub fields: Map<String, Value>,
}

impl EventRecord {
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            level,
            logger: logger.into(),
            message: message.into(),
            error: None,
            fields: Map::new(),
        }
    }

    pub fn with_error(mut self, error: ErrorFields) -> Self {
        self.error = Some(error);
        self
    }

    /// Caller fields; rendered after the canonical ones and winning on collision.
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Flat field map in output order: canonical fields, error fields, caller fields.
    pub fn into_json(self) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert(KEY_TIMESTAMP.into(), Value::String(format_timestamp(self.timestamp)));
        out.insert(KEY_LEVEL.into(), Value::String(level_name(&self.level).into()));
        out.insert(KEY_LOGGER.into(), Value::String(self.logger));

        match self.error {
            Some(error) => {
                out.insert(KEY_MESSAGE.into(), Value::String(error.stack.clone()));
                out.insert(KEY_ERROR_KIND.into(), Value::String(error.kind));
                out.insert(KEY_ERROR_MESSAGE.into(), Value::String(error.message));
                out.insert(KEY_ERROR_STACK.into(), Value::String(error.stack));
            }
            None => {
                out.insert(KEY_MESSAGE.into(), Value::String(self.message));
            }
        }

        for (key, value) in self.fields {
            out.insert(key, value);
        }
        out
    }

    /// Single-line JSON rendering, without a trailing newline.
    pub fn render(self) -> String {
        Value::Object(self.into_json()).to_string()
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}
