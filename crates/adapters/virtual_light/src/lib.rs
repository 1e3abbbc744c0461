//! # sensorkit-adapter-virtual-light
//!
//! Simulated light for exercising a host without hardware.
//!
//! ## Streams and actuators
//!
//! | Stream | Unit | Default | Actuator | Capability |
//! |--------|------|---------|----------|------------|
//! | `/on` | On/Off | 0 | `/on_act` | binary |
//! | `/bri` | Brightness | 100 | `/bri_act` | continuous 0–100 |
//! | `/hue` | Hue | 5000 | `/hue_act` | continuous 0–65535 |
//! | `/sat` | Saturation | 80 | none | |
//!
//! Every poll reports all four values.
//!
//! ## Dependency rule
//!
//! Depends on `sensorkit-app` (port traits) and `sensorkit-domain` only.

mod actuators;
mod config;
mod state;

pub use actuators::LightActuator;
pub use config::VirtualLightConfig;
pub use state::{LightProperty, LightState, SharedLightState};

use std::time::Duration;

use sensorkit_app::ports::{Driver, Host};
use sensorkit_domain::actuator::ActuatorSpec;
use sensorkit_domain::error::DriverError;
use sensorkit_domain::path::StreamPath;
use sensorkit_domain::reading::Reading;
use sensorkit_domain::stream::{DataType, TimeseriesSpec};
use sensorkit_domain::time::Timestamp;

const DEFAULT_READ_PERIOD: Duration = Duration::from_millis(500);

/// Virtual light driver.
#[derive(Debug, Default)]
pub struct VirtualLightDriver {
    config: VirtualLightConfig,
    state: SharedLightState,
}

impl VirtualLightDriver {
    /// Create a light with default state.
    #[must_use]
    pub fn new(config: VirtualLightConfig) -> Self {
        Self {
            config,
            state: SharedLightState::default(),
        }
    }

    /// Copy of the light's current values.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        self.state.snapshot()
    }
}

impl Driver for VirtualLightDriver {
    fn name(&self) -> &'static str {
        "virtual_light"
    }

    fn poll_interval(&self) -> Duration {
        self.config.period().unwrap_or(DEFAULT_READ_PERIOD)
    }

    async fn setup(&mut self, host: &impl Host) -> Result<(), DriverError> {
        for property in LightProperty::ALL {
            let stream = StreamPath::new(property.key());
            host.add_timeseries(TimeseriesSpec::new(
                stream.clone(),
                property.unit(),
                DataType::Long,
            ))
            .await?;

            if let Some((name, kind)) = actuators::actuator_for(property) {
                let spec = ActuatorSpec::new(name, property.unit(), DataType::Long, kind)
                    .attached_to(stream);
                host.add_actuator(
                    spec,
                    Box::new(LightActuator::new(self.state.clone(), property)),
                )
                .await?;
            }
        }

        tracing::info!(driver = self.name(), "virtual light ready");
        Ok(())
    }

    async fn poll(&self, host: &impl Host, at: Timestamp) -> Result<usize, DriverError> {
        let snapshot = self.state.snapshot();
        for property in LightProperty::ALL {
            let path = StreamPath::new(property.key());
            host.add(&path, Reading::new(at, snapshot.get(property)))
                .await?;
        }
        Ok(LightProperty::ALL.len())
    }
}
