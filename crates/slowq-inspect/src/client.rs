use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use slowq_model::ClusterEndpoint;
use time::OffsetDateTime;
use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::InspectError;
use crate::sigv4::{SignableRequest, SigV4Signer};
use crate::tasks::TaskSource;

const TASKS_PATH: &str = "/_tasks";
const TASKS_QUERY: &[(&str, &str)] = &[("detailed", "true"), ("group_by", "none")];

/// Signed HTTPS client for the cluster's task-management API.
///
/// Requests rotate over the configured endpoints. A failed request is not retried.
pub struct ClusterClient {
    http: reqwest::Client,
    signer: SigV4Signer,
    config: ClientConfig,
    next: AtomicUsize,
}

impl ClusterClient {
    pub fn new(config: ClientConfig) -> Result<Self, InspectError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        let signer = SigV4Signer::new(
            config.credentials.clone(),
            config.region.clone(),
            config.service.clone(),
        );

        Ok(Self {
            http,
            signer,
            config,
            next: AtomicUsize::new(0),
        })
    }

    fn next_endpoint(&self) -> &ClusterEndpoint {
        self.config
            .endpoints
            .get(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Signed task-listing request against `endpoint`.
    fn tasks_request(
        &self,
        endpoint: &ClusterEndpoint,
        now: OffsetDateTime,
    ) -> Result<reqwest::Request, InspectError> {
        let host = endpoint.authority();
        let url = format!(
            "{}{TASKS_PATH}?{}",
            endpoint.base_url(),
            TASKS_QUERY
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        );

        let headers = self.signer.sign(
            &SignableRequest {
                method: "GET",
                host: &host,
                path: TASKS_PATH,
                query: TASKS_QUERY,
                body: b"",
            },
            now,
        );

        let mut request = self.http.get(&url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        Ok(request.build()?)
    }
}

#[async_trait]
impl TaskSource for ClusterClient {
    async fn fetch_tasks(&self) -> Result<Value, InspectError> {
        let endpoint = self.next_endpoint();
        let request = self.tasks_request(endpoint, OffsetDateTime::now_utc())?;

        debug!(endpoint = %endpoint, "listing cluster tasks");
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        read_tasks_response(status, body)
    }
}

fn read_tasks_response(status: StatusCode, body: String) -> Result<Value, InspectError> {
    if !status.is_success() {
        return Err(InspectError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        InspectError::InvalidResponse(format!("failed to parse response: {e}, body: {body}"))
    })
}
