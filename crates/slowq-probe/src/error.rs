use thiserror::Error;

use slowq_inspect::InspectError;
use slowq_observe::LoggerError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0} is not set")]
    MissingConfiguration(&'static str),
    #[error("invalid configuration: {key}: {reason}")]
    InvalidConfiguration { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error(transparent)]
    Logger(#[from] LoggerError),
    #[error("invalid invocation event: {0}")]
    InvalidEvent(String),
}
