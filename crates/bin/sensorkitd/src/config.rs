//! Configuration loading: TOML file with environment variable overrides.
//!
//! Reads `sensorkit.toml` from the working directory, or the file named by
//! `SENSORKIT_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use serde::Deserialize;

use sensorkit_adapter_nt160e::Nt160eConfig;
use sensorkit_adapter_virtual_light::VirtualLightConfig;

const DEFAULT_PATH: &str = "sensorkit.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub virtual_light: VirtualLightSection,
    pub thermostat: ThermostatSection,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// `[virtual_light]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VirtualLightSection {
    pub enabled: bool,
    #[serde(flatten)]
    pub driver: VirtualLightConfig,
}

/// `[thermostat]` table. Disabled unless configured.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThermostatSection {
    pub enabled: bool,
    #[serde(flatten)]
    pub device: Nt160eConfig,
}

impl Config {
    /// Load configuration from disk (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SENSORKIT_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SENSORKIT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        let device = &mut self.thermostat.device;
        if let Some(val) = var("SENSORKIT_THERMOSTAT_URL") {
            device.url = val;
        }
        if let Some(val) = var("SENSORKIT_THERMOSTAT_LOGIN") {
            device.login = val;
        }
        if let Some(val) = var("SENSORKIT_THERMOSTAT_PASSWORD") {
            device.password = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.virtual_light.enabled && self.virtual_light.driver.period().is_none() {
            return Err(ConfigError::Validation(
                "virtual_light.read_period must be a positive number of seconds".to_string(),
            ));
        }
        if self.thermostat.enabled {
            let device = &self.thermostat.device;
            if device.url.trim().is_empty() {
                return Err(ConfigError::Validation("thermostat.url is required".to_string()));
            }
            if device.login.trim().is_empty() {
                return Err(ConfigError::Validation("thermostat.login is required".to_string()));
            }
            if device.poll_interval_secs == 0 {
                return Err(ConfigError::Validation(
                    "thermostat.poll_interval_secs must be non-zero".to_string(),
                ));
            }
            if device.request_timeout_secs == Some(0) {
                return Err(ConfigError::Validation(
                    "thermostat.request_timeout_secs must be non-zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sensorkitd=info,sensorkit=info".to_string(),
        }
    }
}

impl Default for VirtualLightSection {
    fn default() -> Self {
        Self {
            enabled: true,
            driver: VirtualLightConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
