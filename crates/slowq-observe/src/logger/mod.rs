mod config;
mod error;
mod format;
mod guard;
mod level;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use guard::LoggerGuard;
pub use level::LoggerLevel;
pub use log::build_dispatch;

pub(crate) use level::level_name;

/// Configure process-wide logging once; later calls are no-ops.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    LoggerGuard::global().init(cfg).map(|_| ())
}
