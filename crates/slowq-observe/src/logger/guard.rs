use std::sync::atomic::{AtomicBool, Ordering};

use crate::logger::{config::LoggerConfig, error::LoggerError, log::install_global};

static GLOBAL: LoggerGuard = LoggerGuard::new();

/// Initialize-once guard around logger installation.
///
/// The first successful `init` installs the pipeline; every later call returns
/// `Ok(false)` without looking at its config. A failed installation leaves the guard
/// unset so the caller may retry.
#[derive(Debug)]
pub struct LoggerGuard {
    initialized: AtomicBool,
}

impl LoggerGuard {
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
        }
    }

    /// The guard used by [`logger_init`](crate::logger_init).
    pub fn global() -> &'static LoggerGuard {
        &GLOBAL
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Install the stdout pipeline. Returns `true` if this call installed it.
    pub fn init(&self, cfg: &LoggerConfig) -> Result<bool, LoggerError> {
        self.init_with(cfg, install_global)
    }

    /// Same as [`init`](Self::init) with a caller-supplied installer.
    pub fn init_with<F>(&self, cfg: &LoggerConfig, install: F) -> Result<bool, LoggerError>
    where
        F: FnOnce(&LoggerConfig) -> Result<(), LoggerError>,
    {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(false);
        }

        match install(cfg) {
            Ok(()) => Ok(true),
            Err(e) => {
                self.initialized.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Forget a previous initialization. Does not uninstall anything.
    pub fn reset(&self) {
        self.initialized.store(false, Ordering::Release);
    }
}

impl Default for LoggerGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::LoggerLevel;

    #[test]
    fn second_init_is_a_noop() {
        let guard = LoggerGuard::new();
        let installs = Cell::new(0);
        let cfg = LoggerConfig::default();

        let first = guard.init_with(&cfg, |_| {
            installs.set(installs.get() + 1);
            Ok(())
        });
        let second = guard.init_with(&cfg, |_| {
            installs.set(installs.get() + 1);
            Ok(())
        });

        assert!(first.unwrap());
        assert!(!second.unwrap());
        assert_eq!(installs.get(), 1);
        assert!(guard.is_initialized());
    }

    #[test]
    fn later_config_is_ignored() {
        let guard = LoggerGuard::new();
        let seen = Cell::new(None);

        let debug = LoggerConfig {
            level: LoggerLevel::new("debug").unwrap(),
            ..Default::default()
        };
        let error = LoggerConfig {
            level: LoggerLevel::new("error").unwrap(),
            ..Default::default()
        };

        guard
            .init_with(&debug, |cfg| {
                seen.set(Some(cfg.level));
                Ok(())
            })
            .unwrap();
        guard
            .init_with(&error, |cfg| {
                seen.set(Some(cfg.level));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.get(), Some(LoggerLevel::new("debug").unwrap()));
    }

    #[test]
    fn failed_install_can_be_retried() {
        let guard = LoggerGuard::new();
        let cfg = LoggerConfig::default();

        let failed = guard.init_with(&cfg, |_| Err(LoggerError::AlreadyInitialized));
        assert!(matches!(failed, Err(LoggerError::AlreadyInitialized)));
        assert!(!guard.is_initialized());

        assert!(guard.init_with(&cfg, |_| Ok(())).unwrap());
    }

    #[test]
    fn reset_allows_reinitialization() {
        let guard = LoggerGuard::new();
        let cfg = LoggerConfig::default();

        assert!(guard.init_with(&cfg, |_| Ok(())).unwrap());
        guard.reset();
        assert!(!guard.is_initialized());
        assert!(guard.init_with(&cfg, |_| Ok(())).unwrap());
    }
}
