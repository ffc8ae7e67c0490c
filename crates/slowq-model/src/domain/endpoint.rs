use std::fmt;

use crate::ModelError;

/// Every cluster endpoint is reached over HTTPS on this port.
pub const CLUSTER_PORT: u16 = 443;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub host: String,
    pub port: u16,
}

impl ClusterEndpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: CLUSTER_PORT,
        }
    }

    /// Base URL without a trailing slash, e.g. `https://search.example.com`.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.authority())
    }

    /// Value for the `Host` header; the default HTTPS port is omitted.
    pub fn authority(&self) -> String {
        if self.port == CLUSTER_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ClusterEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Ordered, non-empty list of cluster endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoints(Vec<ClusterEndpoint>);

impl ClusterEndpoints {
    /// Parse a comma-separated host list.
    ///
    /// Entries are trimmed, a leading URL scheme and trailing slashes are dropped,
    /// and empty entries are skipped.
    pub fn parse(hosts: &str) -> Result<Self, ModelError> {
        let endpoints: Vec<_> = hosts
            .split(',')
            .map(normalize_host)
            .filter(|host| !host.is_empty())
            .map(ClusterEndpoint::new)
            .collect();

        if endpoints.is_empty() {
            return Err(ModelError::EmptyEndpoints);
        }
        Ok(Self(endpoints))
    }

    pub fn first(&self) -> &ClusterEndpoint {
        // Non-empty by construction.
        &self.0[0]
    }

    pub fn get(&self, index: usize) -> &ClusterEndpoint {
        &self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClusterEndpoint> {
        self.0.iter()
    }
}

fn normalize_host(entry: &str) -> &str {
    let entry = entry.trim();
    let entry = entry
        .strip_prefix("https://")
        .or_else(|| entry.strip_prefix("http://"))
        .unwrap_or(entry);
    entry.trim_end_matches('/')
}
