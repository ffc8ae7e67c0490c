use std::io::IsTerminal;

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    /// Text format only: print the event target.
    pub with_targets: bool,
    /// Text format only: colorize output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = !cfg!(test) && std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Json,
            level: LoggerLevel::default(),
            with_targets: true,
            use_color,
        }
    }
}
