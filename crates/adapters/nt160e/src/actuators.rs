//! Thermostat actuators.
//!
//! Every write drives the settings form through a [`SettingApplier`]. The
//! form automation currently submits one fixed cool setting whatever state
//! was requested; the requested value is logged and dropped.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use sensorkit_app::ports::Actuator;
use sensorkit_domain::actuator::ActuatorKind;
use sensorkit_domain::error::DriverError;
use sensorkit_domain::stream::DataType;
use sensorkit_domain::value::StateValue;

use crate::error::Nt160eError;
use crate::webdriver::{FormSetting, SettingApplier};

/// Form field and value every write submits.
pub const APPLIED_FIELD: &str = "OID4.1.6";
pub const APPLIED_VALUE: &str = "820";

/// Control style of a thermostat actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorClass {
    /// Mode selector; any integer code.
    Discrete,
    /// Unbounded set point.
    Continuous,
}

impl ActuatorClass {
    #[must_use]
    pub fn kind(self) -> ActuatorKind {
        match self {
            Self::Discrete => ActuatorKind::Discrete { states: Vec::new() },
            Self::Continuous => ActuatorKind::Continuous { bounds: None },
        }
    }
}

/// One actuator exposed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorDescriptor {
    pub name: &'static str,
    /// Form field (`name=` attribute) controlling this setting.
    pub target: &'static str,
    pub unit: &'static str,
    pub data_type: DataType,
    pub class: ActuatorClass,
}

pub static ACTUATORS: [ActuatorDescriptor; 5] = [
    ActuatorDescriptor {
        name: "fan_mode",
        target: "OID4.1.3",
        unit: "mode",
        data_type: DataType::Long,
        class: ActuatorClass::Discrete,
    },
    ActuatorDescriptor {
        name: "hvac_mode",
        target: "OID4.1.1",
        unit: "mode",
        data_type: DataType::Long,
        class: ActuatorClass::Discrete,
    },
    ActuatorDescriptor {
        name: "hold",
        target: "holdmode",
        unit: "mode",
        data_type: DataType::Long,
        class: ActuatorClass::Discrete,
    },
    ActuatorDescriptor {
        name: "cool_setting",
        target: "OID4.1.6",
        unit: "F",
        data_type: DataType::Double,
        class: ActuatorClass::Continuous,
    },
    ActuatorDescriptor {
        name: "heat_setting",
        target: "OID4.1.5",
        unit: "F",
        data_type: DataType::Double,
        class: ActuatorClass::Continuous,
    },
];

/// Actuator submitting the thermostat's settings form.
pub struct ThermostatActuator<A> {
    descriptor: &'static ActuatorDescriptor,
    applier: Arc<A>,
    device_url: Url,
}

impl<A> ThermostatActuator<A> {
    #[must_use]
    pub fn new(descriptor: &'static ActuatorDescriptor, applier: Arc<A>, device_url: Url) -> Self {
        Self {
            descriptor,
            applier,
            device_url,
        }
    }
}

#[async_trait]
impl<A: SettingApplier + 'static> Actuator for ThermostatActuator<A> {
    /// The current setting is not read back.
    async fn read(&self) -> Result<Option<StateValue>, DriverError> {
        Ok(None)
    }

    async fn write(&self, state: StateValue) -> Result<Option<StateValue>, DriverError> {
        tracing::warn!(
            actuator = self.descriptor.name,
            target = self.descriptor.target,
            requested = %state,
            applied = APPLIED_VALUE,
            "requested state ignored, submitting fixed cool setting"
        );
        let setting = FormSetting::new(APPLIED_FIELD, APPLIED_VALUE);
        self.applier
            .apply(&self.device_url, &setting)
            .await
            .map_err(|err| Nt160eError::Apply(err).into_domain())?;
        Ok(None)
    }
}
