// src/logging.rs

//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the configured level. The console layer writes to
//! stderr so `export` output on stdout stays clean JSON.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Identity;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Owns the subscriber configuration and the file writer guard
///
/// Dropping the manager flushes and closes the log file, so keep it alive
/// for the life of the process.
#[derive(Debug)]
pub struct LoggingManager {
    config: LoggingConfig,
    _guards: Vec<WorkerGuard>,
}

impl LoggingManager {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            _guards: Vec::new(),
        }
    }

    /// Build the filter from `RUST_LOG`, falling back to the configured level
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.config.level).map_err(|e| {
                Error::config_key(
                    "logging.level",
                    format!("Invalid log level '{}': {}", self.config.level, e),
                )
            }),
        }
    }

    /// Install the global subscriber
    pub fn init(&mut self) -> Result<()> {
        let filter = self.env_filter()?;
        let registry = Registry::default().with(filter);

        let registry = if self.config.console.enabled {
            let console_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(self.config.console.colored)
                .with_target(true);
            let console_layer = match self.config.format {
                LogFormat::Json => console_layer.json().boxed(),
                LogFormat::Pretty => console_layer.pretty().boxed(),
                LogFormat::Compact => console_layer.compact().boxed(),
            };
            registry.with(console_layer)
        } else {
            registry.with(Identity::new().boxed())
        };

        let registry = if let Some(file_config) = &self.config.file {
            std::fs::create_dir_all(&file_config.directory)?;
            let file_appender =
                tracing_appender::rolling::daily(&file_config.directory, &file_config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            self._guards.push(guard);

            let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            let file_layer = match self.config.format {
                LogFormat::Json => file_layer.json().boxed(),
                LogFormat::Pretty => file_layer.pretty().boxed(),
                LogFormat::Compact => file_layer.compact().boxed(),
            };
            registry.with(file_layer)
        } else {
            registry.with(Identity::new().boxed())
        };

        registry
            .try_init()
            .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;

        tracing::debug!(level = %self.config.level, "logging initialized");
        Ok(())
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let manager = LoggingManager::new(LoggingConfig {
            level: "dealer_oxide=verbose".to_string(),
            ..LoggingConfig::default()
        });
        assert!(manager.env_filter().is_err());
    }

    #[test]
    fn test_valid_level_builds_filter() {
        let manager = LoggingManager::new(LoggingConfig {
            level: "dealer_oxide=debug,warn".to_string(),
            ..LoggingConfig::default()
        });
        assert!(manager.env_filter().is_ok());
        assert_eq!(manager.config().format, LogFormat::Compact);
    }
}
