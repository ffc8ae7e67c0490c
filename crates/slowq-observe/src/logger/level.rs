use std::{fmt, str::FromStr};

use tracing::{Level, level_filters::LevelFilter};

use crate::logger::error::LoggerError;

/// Minimum severity an event needs to be written.
///
/// Accepts the usual level names case-insensitively, including the aliases
/// `warning`, `critical` and `fatal` used by most logging stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerLevel(Level);

impl LoggerLevel {
    pub fn new(name: &str) -> Result<Self, LoggerError> {
        let level = match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" | "critical" | "fatal" => Level::ERROR,
            _ => return Err(LoggerError::InvalidLogLevel(name.to_string())),
        };
        Ok(Self(level))
    }

    pub fn as_level(&self) -> Level {
        self.0
    }

    pub fn as_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.0)
    }

    /// Lower-case name, also a valid filter directive.
    pub fn as_str(&self) -> &'static str {
        level_name(&self.0)
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self(Level::INFO)
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}
