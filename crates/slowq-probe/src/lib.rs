mod config;
pub use config::{
    ENV_HOSTS, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_MAX_TIME, ENV_REGION, ENV_TIMEOUT, ProbeConfig,
    logger_config,
};

mod error;
pub use error::{ConfigError, ProbeError};

mod handler;
pub use handler::{InvocationContext, connect, handle, invoke, parse_event, report, run};
