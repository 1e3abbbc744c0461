//! Virtual light configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the virtual light driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualLightConfig {
    /// Seconds between two polls. `ReadPeriod` is accepted as an alias.
    #[serde(alias = "ReadPeriod")]
    pub read_period: f64,
}

impl Default for VirtualLightConfig {
    fn default() -> Self {
        Self { read_period: 0.5 }
    }
}

impl VirtualLightConfig {
    /// The poll period, or `None` when `read_period` is not a positive,
    /// finite number of seconds.
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.read_period)
            .ok()
            .filter(|period| !period.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_half_a_second() {
        let config = VirtualLightConfig::default();
        assert_eq!(config.period(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: VirtualLightConfig = toml::from_str("read_period = 2.0").unwrap();
        assert_eq!(config.period(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn should_accept_read_period_alias() {
        let config: VirtualLightConfig = toml::from_str("ReadPeriod = 0.25").unwrap();
        assert_eq!(config.period(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: VirtualLightConfig = toml::from_str("").unwrap();
        assert!((config.read_period - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_non_positive_periods() {
        for read_period in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = VirtualLightConfig { read_period };
            assert!(config.period().is_none(), "{read_period} should be rejected");
        }
    }
}
