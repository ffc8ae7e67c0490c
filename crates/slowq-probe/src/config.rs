use slowq_inspect::{ClientConfig, Credentials, DEFAULT_TIMEOUT_MS, InspectError};
use slowq_model::{ClusterEndpoints, Threshold};
use slowq_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

use crate::error::ConfigError;

pub const ENV_HOSTS: &str = "ES_HOST";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_MAX_TIME: &str = "MAX_TIME_IN_SECONDS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_TIMEOUT: &str = "REQUEST_TIMEOUT_SECS";

/// Everything one invocation needs, read and validated before the cluster is contacted.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub endpoints: ClusterEndpoints,
    pub region: String,
    pub threshold: Threshold,
    pub credentials: Credentials,
    pub timeout_ms: u64,
    pub logger: LoggerConfig,
}

impl ProbeConfig {
    /// Build the configuration from `lookup`, usually `std::env::var`. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hosts = required(&lookup, ENV_HOSTS)?;
        let endpoints = ClusterEndpoints::parse(&hosts).map_err(|e| invalid(ENV_HOSTS, e))?;
        let region = required(&lookup, ENV_REGION)?;

        let threshold = required(&lookup, ENV_MAX_TIME)?
            .parse::<Threshold>()
            .map_err(|e| invalid(ENV_MAX_TIME, e))?;

        let credentials = Credentials::from_lookup(&lookup).map_err(|e| match e {
            InspectError::MissingCredentials(key) => ConfigError::MissingConfiguration(key),
            other => invalid("credentials", other),
        })?;

        let timeout_ms = match optional(&lookup, ENV_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => return Err(invalid(ENV_TIMEOUT, "must be at least one second")),
                Ok(secs) => secs.saturating_mul(1_000),
                Err(e) => return Err(invalid(ENV_TIMEOUT, e)),
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            endpoints,
            region,
            threshold,
            credentials,
            timeout_ms,
            logger: logger_config(&lookup)?,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_ms: self.timeout_ms,
            ..ClientConfig::new(
                self.endpoints.clone(),
                self.region.clone(),
                self.credentials.clone(),
            )
        }
    }
}

/// Logger settings alone, so logging can be configured before anything else.
pub fn logger_config<F>(lookup: F) -> Result<LoggerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = LoggerConfig::default();
    if let Some(level) = optional(&lookup, ENV_LOG_LEVEL) {
        cfg.level = LoggerLevel::new(&level).map_err(|e| invalid(ENV_LOG_LEVEL, e))?;
    }
    if let Some(format) = optional(&lookup, ENV_LOG_FORMAT) {
        cfg.format = format
            .parse::<LoggerFormat>()
            .map_err(|e| invalid(ENV_LOG_FORMAT, e))?;
    }
    Ok(cfg)
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::MissingConfiguration(key))
}

fn invalid(key: &'static str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidConfiguration {
        key,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_HOSTS, "a.example.com,b.example.com"),
            (ENV_REGION, "eu-west-1"),
            (ENV_MAX_TIME, "60"),
            ("AWS_ACCESS_KEY_ID", "AKID"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]
    }

    fn without(key: &str) -> Vec<(&'static str, &'static str)> {
        full().into_iter().filter(|(k, _)| *k != key).collect()
    }

    fn with(key: &'static str, value: &'static str) -> Vec<(&'static str, &'static str)> {
        let mut vars = without(key);
        vars.push((key, value));
        vars
    }

    #[test]
    fn reads_complete_configuration() {
        let cfg = ProbeConfig::from_lookup(env(&full())).unwrap();

        assert_eq!(cfg.endpoints.len(), 2);
        assert_eq!(cfg.endpoints.first().host, "a.example.com");
        assert_eq!(cfg.endpoints.first().port, 443);
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(cfg.threshold.as_secs(), 60);
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(cfg.logger.level, LoggerLevel::default());
    }

    #[test]
    fn missing_required_keys_are_reported_by_name() {
        for key in [ENV_HOSTS, ENV_REGION, ENV_MAX_TIME, "AWS_SECRET_ACCESS_KEY"] {
            let err = ProbeConfig::from_lookup(env(&without(key))).unwrap_err();
            assert!(
                matches!(err, ConfigError::MissingConfiguration(k) if k == key),
                "{key}: {err:?}"
            );
        }
    }

    #[test]
    fn empty_host_list_is_missing() {
        let err = ProbeConfig::from_lookup(env(&with(ENV_HOSTS, "  "))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfiguration(ENV_HOSTS)));
    }

    #[test]
    fn host_list_without_entries_is_invalid() {
        let err = ProbeConfig::from_lookup(env(&with(ENV_HOSTS, ",,"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { key: ENV_HOSTS, .. }));
    }

    #[test]
    fn non_numeric_threshold_is_invalid() {
        let err = ProbeConfig::from_lookup(env(&with(ENV_MAX_TIME, "one minute"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { key: ENV_MAX_TIME, .. }));
    }

    #[test]
    fn negative_threshold_is_invalid() {
        let err = ProbeConfig::from_lookup(env(&with(ENV_MAX_TIME, "-5"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { key: ENV_MAX_TIME, .. }));
    }

    #[test]
    fn optional_settings_are_applied() {
        let mut vars = full();
        vars.push((ENV_TIMEOUT, "5"));
        vars.push((ENV_LOG_LEVEL, "debug"));
        vars.push((ENV_LOG_FORMAT, "text"));
        vars.push(("AWS_SESSION_TOKEN", "token"));
        let cfg = ProbeConfig::from_lookup(env(&vars)).unwrap();

        assert_eq!(cfg.timeout_ms, 5_000);
        assert_eq!(cfg.logger.level, LoggerLevel::new("debug").unwrap());
        assert_eq!(cfg.logger.format, LoggerFormat::Text);
        assert_eq!(cfg.credentials.session_token.as_deref(), Some("token"));

        let client = cfg.client_config();
        assert_eq!(client.service, "es");
        assert_eq!(client.timeout_ms, 5_000);
    }

    #[test]
    fn zero_or_malformed_timeout_is_invalid() {
        for value in ["0", " 0 ", "soon", "-1"] {
            let err = ProbeConfig::from_lookup(env(&with(ENV_TIMEOUT, value))).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidConfiguration { key: ENV_TIMEOUT, .. }),
                "{value:?}: {err:?}"
            );
        }
    }

    #[test]
    fn unknown_log_level_is_invalid() {
        let err = logger_config(env(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { key: ENV_LOG_LEVEL, .. }));
    }
}
