//! # Configuration
//!
//! Validated runtime configuration for the synchronization engine, layered
//! from defaults, an optional `taskboard` config file, and `TASKBOARD_*`
//! environment variables. No silent fallbacks: a value that fails validation
//! refuses to load rather than limping along with a corrupt setting.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Deadline applied to every gateway call when none is configured.
pub const DEFAULT_GATEWAY_TIMEOUT_MS: u64 = 30_000;
/// Broadcast capacity for board change events.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;

/// Configuration errors raised during load or validation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration load failed: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Runtime configuration for the synchronization engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Deployment environment (`development`, `test`, `production`).
    pub environment: String,
    /// Deadline for a single gateway call, in milliseconds. A call that
    /// exceeds it fails like any other gateway error and triggers the
    /// ordinary rollback path.
    pub gateway_timeout_ms: u64,
    /// Capacity of the board event broadcast channel.
    pub event_channel_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            environment: detect_environment(),
            gateway_timeout_ms: DEFAULT_GATEWAY_TIMEOUT_MS,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl SyncConfig {
    /// Load configuration with environment auto-detection.
    ///
    /// Sources, later ones overriding earlier: built-in defaults, an
    /// optional `taskboard.{toml,yaml,json}` file in the working directory,
    /// and `TASKBOARD_*` environment variables.
    pub fn load() -> ConfigResult<Self> {
        let environment = detect_environment();
        let settings = Config::builder()
            .set_default("environment", environment)?
            .set_default("gateway_timeout_ms", DEFAULT_GATEWAY_TIMEOUT_MS as i64)?
            .set_default(
                "event_channel_capacity",
                DEFAULT_EVENT_CHANNEL_CAPACITY as i64,
            )?
            .add_source(File::with_name("taskboard").required(false))
            .add_source(Environment::with_prefix("TASKBOARD"))
            .build()?;
        let config: SyncConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded values.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.gateway_timeout_ms == 0 {
            return Err(ConfigurationError::Invalid(
                "gateway_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err(ConfigurationError::Invalid(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The gateway deadline as a [`Duration`].
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }
}

/// Detect the deployment environment from `TASKBOARD_ENV`, falling back to
/// `APP_ENV` and then `development`.
pub fn detect_environment() -> String {
    env::var("TASKBOARD_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SyncConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway_timeout(), Duration::from_millis(30_000));
        assert_eq!(config.event_channel_capacity, 256);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = SyncConfig {
            gateway_timeout_ms: 0,
            ..SyncConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let config = SyncConfig {
            event_channel_capacity: 0,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
