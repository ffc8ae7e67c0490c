use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use slowq_inspect::{ClusterClient, TaskSource, detect_slow_tasks, list_tasks};
use slowq_model::Threshold;

use crate::config::ProbeConfig;
use crate::error::ProbeError;

/// Per-invocation metadata; its id is attached to every event of the invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub invocation_id: Uuid,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the trigger payload; an absent payload is `null`.
pub fn parse_event(raw: Option<&str>) -> Result<Value, ProbeError> {
    match raw {
        None => Ok(Value::Null),
        Some(raw) if raw.trim().is_empty() => Ok(Value::Null),
        Some(raw) => serde_json::from_str(raw).map_err(|e| ProbeError::InvalidEvent(e.to_string())),
    }
}

/// Open the signed cluster client described by `cfg`.
pub fn connect(cfg: &ProbeConfig) -> Result<ClusterClient, ProbeError> {
    Ok(ClusterClient::new(cfg.client_config())?)
}

/// Parse the raw trigger payload, then [`invoke`].
pub async fn run<F, C, S>(
    raw_event: Option<&str>,
    lookup: F,
    ctx: &InvocationContext,
    connect: C,
) -> Result<usize, ProbeError>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(&ProbeConfig) -> Result<S, ProbeError>,
    S: TaskSource,
{
    let event = parse_event(raw_event)?;
    invoke(lookup, &event, ctx, connect).await
}

/// Log how an invocation ended; the only place a failure is reported.
pub fn report(ctx: &InvocationContext, outcome: &Result<usize, ProbeError>) {
    match outcome {
        Ok(flagged) => {
            info!(invocation_id = %ctx.invocation_id, flagged, "probe invocation finished");
        }
        Err(err) => {
            error!(
                invocation_id = %ctx.invocation_id,
                error = err as &dyn std::error::Error,
                "probe invocation failed"
            );
        }
    }
}

/// One complete invocation: read configuration, connect, inspect.
///
/// Configuration is validated in full before `connect` runs, so a bad setting never
/// reaches the cluster.
pub async fn invoke<F, C, S>(
    lookup: F,
    event: &Value,
    ctx: &InvocationContext,
    connect: C,
) -> Result<usize, ProbeError>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(&ProbeConfig) -> Result<S, ProbeError>,
    S: TaskSource,
{
    let cfg = ProbeConfig::from_lookup(lookup)?;
    let source = connect(&cfg)?;
    handle(event, ctx, &source, cfg.threshold).await
}

/// List tasks from `source` and log the ones over `threshold`.
///
/// The trigger payload is accepted for the host's calling convention and not read.
pub async fn handle<S>(
    _event: &Value,
    ctx: &InvocationContext,
    source: &S,
    threshold: Threshold,
) -> Result<usize, ProbeError>
where
    S: TaskSource + ?Sized,
{
    let span = info_span!("invocation", invocation_id = %ctx.invocation_id);
    async move {
        let tasks = list_tasks(source).await?;
        Ok(detect_slow_tasks(&tasks, threshold))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use serde_json::json;
    use slowq_inspect::InspectError;
    use slowq_observe::{BufferSink, LoggerConfig, build_dispatch};

    use super::*;
    use crate::error::ConfigError;

    struct Fixed {
        body: Value,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(body: Value) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TaskSource for Fixed {
        async fn fetch_tasks(&self) -> Result<Value, InspectError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    /// Lets a connect closure hand out a source the test still owns.
    struct Borrowed<'a>(&'a Fixed);

    #[async_trait]
    impl<'a> TaskSource for Borrowed<'a> {
        async fn fetch_tasks(&self) -> Result<Value, InspectError> {
            self.0.fetch_tasks().await
        }
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn base_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ES_HOST", "a.example.com"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCESS_KEY_ID", "AKID"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]
    }

    fn scenario_tasks() -> Value {
        json!({
            "tasks": [
                {"id": "t1", "running_time_in_nanos": 3_000_000_000u64},
                {"id": "t2", "running_time_in_nanos": 7_500_000_000u64}
            ]
        })
    }

    fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Value>) {
        let sink = BufferSink::new();
        let dispatch = build_dispatch(&LoggerConfig::default(), sink.clone()).unwrap();
        let out = tracing::dispatcher::with_default(&dispatch, f);
        (out, sink.json_lines())
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn scenario_emits_one_event_for_slow_task() {
        let source = Fixed::new(scenario_tasks());
        let ctx = InvocationContext::new();

        let (result, events) = capture(|| {
            block_on(handle(&Value::Null, &ctx, &source, Threshold::from_secs(5)))
        });

        assert_eq!(result.unwrap(), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["task_id"], "t2");
        assert_eq!(events[0]["invocation_id"], ctx.invocation_id.to_string());
    }

    #[test]
    fn invoke_reads_threshold_from_configuration() {
        let source = Fixed::new(scenario_tasks());
        let mut vars = base_env();
        vars.push(("MAX_TIME_IN_SECONDS", "2"));

        let (result, events) = capture(|| {
            block_on(invoke(env(&vars), &Value::Null, &InvocationContext::new(), |_| {
                Ok(Borrowed(&source))
            }))
        });

        assert_eq!(result.unwrap(), 2);
        assert_eq!(events.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bad_threshold_fails_before_contacting_cluster() {
        let source = Fixed::new(scenario_tasks());
        let connects = AtomicUsize::new(0);

        for threshold in [None, Some("soon")] {
            let mut vars = base_env();
            if let Some(value) = threshold {
                vars.push(("MAX_TIME_IN_SECONDS", value));
            }

            let err = block_on(invoke(env(&vars), &Value::Null, &InvocationContext::new(), |_| {
                connects.fetch_add(1, Ordering::SeqCst);
                Ok(Borrowed(&source))
            }))
            .unwrap_err();

            assert!(matches!(err, ProbeError::Config(_)), "{err:?}");
        }

        assert_eq!(connects.load(Ordering::SeqCst), 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_tasks_surface_as_data_unavailable() {
        let source = Fixed::new(json!({"tasks": []}));
        let err = block_on(handle(
            &Value::Null,
            &InvocationContext::new(),
            &source,
            Threshold::from_secs(5),
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            ProbeError::Inspect(InspectError::DataUnavailable(_))
        ));
    }

    #[test]
    fn missing_hosts_is_missing_configuration() {
        let vars = vec![("AWS_REGION", "eu-west-1"), ("MAX_TIME_IN_SECONDS", "5")];
        let err = block_on(invoke(env(&vars), &Value::Null, &InvocationContext::new(), connect))
            .unwrap_err();

        assert!(matches!(
            err,
            ProbeError::Config(ConfigError::MissingConfiguration("ES_HOST"))
        ));
    }

    #[test]
    fn malformed_payload_is_logged_before_anything_else_runs() {
        let source = Fixed::new(scenario_tasks());
        let connects = AtomicUsize::new(0);
        let mut vars = base_env();
        vars.push(("MAX_TIME_IN_SECONDS", "5"));
        let ctx = InvocationContext::new();

        let (outcome, events) = capture(|| {
            let outcome = block_on(run(Some("{bad"), env(&vars), &ctx, |_| {
                connects.fetch_add(1, Ordering::SeqCst);
                Ok(Borrowed(&source))
            }));
            report(&ctx, &outcome);
            outcome
        });

        assert!(matches!(outcome, Err(ProbeError::InvalidEvent(_))));
        assert_eq!(connects.load(Ordering::SeqCst), 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["level"], "error");
        assert_eq!(events[0]["error.kind"], "InvalidEvent");
        assert_eq!(events[0]["invocation_id"], ctx.invocation_id.to_string());
        assert_eq!(events[0]["message"], events[0]["error.stack"]);
    }

    #[test]
    fn successful_run_reports_flagged_count() {
        let source = Fixed::new(scenario_tasks());
        let mut vars = base_env();
        vars.push(("MAX_TIME_IN_SECONDS", "5"));
        let ctx = InvocationContext::new();

        let (_, events) = capture(|| {
            let outcome = block_on(run(None, env(&vars), &ctx, |_| Ok(Borrowed(&source))));
            report(&ctx, &outcome);
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["task_id"], "t2");
        assert_eq!(events[1]["message"], "probe invocation finished");
        assert_eq!(events[1]["flagged"], 1);
    }

    #[test]
    fn event_payload_is_optional() {
        assert_eq!(parse_event(None).unwrap(), Value::Null);
        assert_eq!(parse_event(Some("  ")).unwrap(), Value::Null);
        assert_eq!(
            parse_event(Some(r#"{"source":"aws.events"}"#)).unwrap()["source"],
            "aws.events"
        );
        assert!(matches!(
            parse_event(Some("{not json")),
            Err(ProbeError::InvalidEvent(_))
        ));
    }
}
