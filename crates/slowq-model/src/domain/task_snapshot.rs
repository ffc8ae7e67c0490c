use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{ModelError, TaskId, Threshold};

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

const FIELD_ID: &str = "id";
const FIELD_NODE: &str = "node";
const FIELD_RUNNING_TIME: &str = "running_time_in_nanos";

/// One in-flight cluster operation as reported by the tasks API.
///
/// Only the identifier and the running time are interpreted. Everything the cluster
/// sent is kept verbatim in `raw` so new fields reach the logs without code changes;
/// serializing a snapshot yields exactly those fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSnapshot {
    #[serde(skip)]
    id: TaskId,
    #[serde(skip)]
    running_time_in_nanos: u64,
    #[serde(flatten)]
    raw: Map<String, Value>,
}

impl TaskSnapshot {
    /// Parse a task object from a tasks API response.
    ///
    /// `key` is the map key the task was listed under, if the collection was an object.
    pub fn from_value(key: Option<&str>, value: Value) -> Result<Self, ModelError> {
        let Value::Object(raw) = value else {
            return Err(ModelError::MalformedTask(format!(
                "expected a JSON object, got {value}"
            )));
        };

        let id = resolve_id(key, &raw)?;
        let running_time_in_nanos = raw
            .get(FIELD_RUNNING_TIME)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ModelError::MalformedTask(format!(
                    "task {id} has no non-negative integer `{FIELD_RUNNING_TIME}`"
                ))
            })?;

        Ok(Self {
            id,
            running_time_in_nanos,
            raw,
        })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn running_time_in_nanos(&self) -> u64 {
        self.running_time_in_nanos
    }

    /// All fields as received from the cluster.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Elapsed time in seconds, unrounded.
    pub fn elapsed_seconds(&self) -> f64 {
        self.running_time_in_nanos as f64 / NANOS_PER_SECOND as f64
    }

    /// `true` when the task has run strictly longer than `threshold`.
    pub fn exceeds(&self, threshold: Threshold) -> bool {
        self.elapsed_seconds() > threshold.as_secs() as f64
    }
}

fn resolve_id(key: Option<&str>, raw: &Map<String, Value>) -> Result<TaskId, ModelError> {
    if let Some(id) = raw.get(FIELD_ID).and_then(Value::as_str) {
        return Ok(TaskId::from(id));
    }
    if let Some(id) = raw.get(FIELD_ID).and_then(Value::as_u64)
        && let Some(node) = raw.get(FIELD_NODE).and_then(Value::as_str)
    {
        return Ok(TaskId::from_node(node, id));
    }
    key.map(TaskId::from)
        .ok_or_else(|| ModelError::MalformedTask("task has no usable identifier".into()))
}

impl fmt::Display for TaskSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{:?}", self.raw),
        }
    }
}
