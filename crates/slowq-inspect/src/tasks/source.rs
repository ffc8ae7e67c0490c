use async_trait::async_trait;
use serde_json::Value;

use crate::errors::InspectError;

/// Anything that can answer a detailed, ungrouped task listing.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Raw JSON body of the task listing.
    async fn fetch_tasks(&self) -> Result<Value, InspectError>;
}
