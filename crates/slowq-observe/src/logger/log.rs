use std::io;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Dispatch;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter, time::OffsetTime},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::event::JsonEventLayer;
use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// Assemble the logging pipeline for `cfg` without installing it.
///
/// The returned dispatcher can be installed globally or scoped with
/// [`tracing::dispatcher::with_default`].
pub fn build_dispatch<W>(cfg: &LoggerConfig, make_writer: W) -> Result<Dispatch, LoggerError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = mk_filter(cfg)?;
    let registry = tracing_subscriber::registry().with(filter);

    let dispatch = match cfg.format {
        LoggerFormat::Json => Dispatch::new(registry.with(JsonEventLayer::new(make_writer))),
        LoggerFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(make_writer)
                .with_ansi(cfg.use_color)
                .with_target(cfg.with_targets)
                .with_timer(mk_timer());
            Dispatch::new(registry.with(fmt_layer))
        }
    };
    Ok(dispatch)
}

/// Install the pipeline as the process-wide default, writing to stdout.
///
/// Records emitted through the `log` facade are routed into the same pipeline.
pub(crate) fn install_global(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    build_dispatch(cfg, io::stdout)?.try_init().map_err(as_error)
}

fn mk_filter(cfg: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let level = cfg.level.as_str();
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    OffsetTime::new(UtcOffset::UTC, Rfc3339)
}

fn as_error(e: TryInitError) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("already") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}
