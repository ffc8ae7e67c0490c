use std::process::ExitCode;

use tracing::error;

use slowq_observe::logger_init;
use slowq_probe::{InvocationContext, connect, logger_config, report, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // 1) Logger
    let log_cfg = logger_config(|key| std::env::var(key).ok());
    logger_init(&log_cfg.as_ref().cloned().unwrap_or_default())?;
    if let Err(err) = &log_cfg {
        error!(error = err as &dyn std::error::Error, "logger settings rejected, using defaults");
    }

    // 2) Invocation
    let ctx = InvocationContext::new();
    let raw = std::env::args().nth(1);
    let outcome = run(raw.as_deref(), |key| std::env::var(key).ok(), &ctx, connect).await;

    // 3) Outcome, reported once as a JSON event
    report(&ctx, &outcome);
    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
