use serde_json::{Map, Value};
use tracing::{debug, warn};

use slowq_model::TaskSnapshot;

use crate::errors::InspectError;
use crate::tasks::TaskSource;

const KEY_TASKS: &str = "tasks";
const FAILURE_KEYS: &[&str] = &["node_failures", "task_failures"];

/// Fetch every running task from `source`.
///
/// An empty response or an empty task collection is reported as
/// [`InspectError::DataUnavailable`] rather than as "no slow tasks": a healthy
/// cluster always lists at least the listing task itself.
pub async fn list_tasks<S>(source: &S) -> Result<Vec<TaskSnapshot>, InspectError>
where
    S: TaskSource + ?Sized,
{
    let response = source.fetch_tasks().await?;
    let tasks = parse_tasks(response)?;
    debug!(count = tasks.len(), "cluster tasks listed");
    Ok(tasks)
}

/// Validate a task listing body and build snapshots from it.
///
/// `tasks` may be an array (`group_by=none`) or an object keyed by task id.
pub fn parse_tasks(response: Value) -> Result<Vec<TaskSnapshot>, InspectError> {
    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(InspectError::DataUnavailable(format!(
                "response is not a JSON object: {other}"
            )));
        }
    };
    if body.is_empty() {
        return Err(InspectError::DataUnavailable("response is empty".into()));
    }
    report_failures(&body);

    let tasks = body
        .remove(KEY_TASKS)
        .ok_or_else(|| InspectError::DataUnavailable("response has no `tasks` entry".into()))?;

    let snapshots = match tasks {
        Value::Array(items) => items
            .into_iter()
            .map(|item| TaskSnapshot::from_value(None, item))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(items) => items
            .into_iter()
            .map(|(key, item)| TaskSnapshot::from_value(Some(&key), item))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(InspectError::DataUnavailable(format!(
                "`tasks` is not a collection: {other}"
            )));
        }
    };

    if snapshots.is_empty() {
        return Err(InspectError::DataUnavailable("`tasks` is empty".into()));
    }
    Ok(snapshots)
}

fn report_failures(body: &Map<String, Value>) {
    for key in FAILURE_KEYS {
        if let Some(Value::Array(failures)) = body.get(*key)
            && !failures.is_empty()
        {
            let count = failures.len();
            let failures = Value::Array(failures.clone());
            warn!(
                kind = *key,
                count,
                failures = %failures,
                "cluster reported partial failures while listing tasks"
            );
        }
    }
}
