use slowq_model::ClusterEndpoints;

use crate::credentials::Credentials;

/// Signing service name of managed Elasticsearch / OpenSearch domains.
pub const DEFAULT_SERVICE: &str = "es";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: ClusterEndpoints,
    pub region: String,
    pub service: String,
    pub credentials: Credentials,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(endpoints: ClusterEndpoints, region: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoints,
            region: region.into(),
            service: DEFAULT_SERVICE.to_string(),
            credentials,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
