mod tasks;
pub use tasks::{TaskSource, detect_slow_tasks, list_tasks, parse_tasks, slow_tasks};

mod client;
pub use client::ClusterClient;

mod config;
pub use config::{ClientConfig, DEFAULT_TIMEOUT_MS};

mod credentials;
pub use credentials::Credentials;

mod sigv4;
pub use sigv4::{SignableRequest, SigV4Signer};

mod errors;
pub use errors::InspectError;
