//! Light actuators: on/off, brightness and hue.
//!
//! Each actuator owns a handle to the light's state and the property it
//! controls. Saturation is reported but has no actuator.

use async_trait::async_trait;

use sensorkit_app::ports::Actuator;
use sensorkit_domain::actuator::ActuatorKind;
use sensorkit_domain::error::DriverError;
use sensorkit_domain::value::StateValue;

use crate::state::{LightProperty, SharedLightState};

/// Path suffix and capability of the actuator controlling `property`, if any.
#[must_use]
pub fn actuator_for(property: LightProperty) -> Option<(&'static str, ActuatorKind)> {
    match property {
        LightProperty::On => Some(("on_act", ActuatorKind::Binary)),
        LightProperty::Brightness => Some(("bri_act", ActuatorKind::bounded(0.0, 100.0))),
        LightProperty::Hue => Some(("hue_act", ActuatorKind::bounded(0.0, 65535.0))),
        LightProperty::Saturation => None,
    }
}

/// Reads and writes one property of the virtual light.
pub struct LightActuator {
    state: SharedLightState,
    property: LightProperty,
}

impl LightActuator {
    #[must_use]
    pub fn new(state: SharedLightState, property: LightProperty) -> Self {
        Self { state, property }
    }
}

#[async_trait]
impl Actuator for LightActuator {
    async fn read(&self) -> Result<Option<StateValue>, DriverError> {
        Ok(Some(StateValue::Int(self.state.snapshot().get(self.property))))
    }

    /// Coerce `state` to an integer and store it verbatim.
    ///
    /// Ranges are not enforced here; the host checks the capability first.
    async fn write(&self, state: StateValue) -> Result<Option<StateValue>, DriverError> {
        let value = state.coerce_int()?;
        let stored = self.state.store(self.property, value);
        tracing::debug!(property = self.property.key(), value = stored, "light property set");
        Ok(Some(StateValue::Int(stored)))
    }
}
