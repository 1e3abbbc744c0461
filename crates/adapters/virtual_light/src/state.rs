//! Light state: the four scalar properties of the simulated light.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One named property of the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightProperty {
    On,
    Brightness,
    Hue,
    Saturation,
}

impl LightProperty {
    /// Every property, in the order readings are emitted.
    pub const ALL: [Self; 4] = [Self::On, Self::Brightness, Self::Hue, Self::Saturation];

    /// Short key, also used as the stream name (`/on`, `/bri`, …).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Brightness => "bri",
            Self::Hue => "hue",
            Self::Saturation => "sat",
        }
    }

    /// Unit label registered with the stream.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::On => "On/Off",
            Self::Brightness => "Brightness",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
        }
    }
}

/// Current values of the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    /// `0` or `1`.
    pub on: i64,
    /// `0..=100`.
    pub bri: i64,
    /// `0..=65535`.
    pub hue: i64,
    /// `0..=100`.
    pub sat: i64,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: 0,
            bri: 100,
            hue: 5000,
            sat: 80,
        }
    }
}

impl LightState {
    #[must_use]
    pub fn get(&self, property: LightProperty) -> i64 {
        match property {
            LightProperty::On => self.on,
            LightProperty::Brightness => self.bri,
            LightProperty::Hue => self.hue,
            LightProperty::Saturation => self.sat,
        }
    }

    pub fn set(&mut self, property: LightProperty, value: i64) {
        match property {
            LightProperty::On => self.on = value,
            LightProperty::Brightness => self.bri = value,
            LightProperty::Hue => self.hue = value,
            LightProperty::Saturation => self.sat = value,
        }
    }
}

/// State shared between the driver and its actuators.
///
/// The mutex makes the sharing sound; it does not order a poll against an
/// actuator write. That ordering is the host's serialisation contract.
#[derive(Debug, Clone, Default)]
pub struct SharedLightState(Arc<Mutex<LightState>>);

impl SharedLightState {
    /// Copy of the current values.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        *self.lock()
    }

    /// Store `value` for `property`, returning what was stored.
    pub fn store(&self, property: LightProperty, value: i64) -> i64 {
        let mut state = self.lock();
        state.set(property, value);
        state.get(property)
    }

    fn lock(&self) -> MutexGuard<'_, LightState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_with_fixed_defaults() {
        let state = LightState::default();
        assert_eq!(state.on, 0);
        assert_eq!(state.bri, 100);
        assert_eq!(state.hue, 5000);
        assert_eq!(state.sat, 80);
    }

    #[test]
    fn should_get_what_was_set() {
        let mut state = LightState::default();
        for (i, property) in LightProperty::ALL.into_iter().enumerate() {
            let value = i64::try_from(i).unwrap() + 7;
            state.set(property, value);
            assert_eq!(state.get(property), value);
        }
    }

    #[test]
    fn should_use_short_keys_as_stream_names() {
        let keys: Vec<_> = LightProperty::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["on", "bri", "hue", "sat"]);
    }

    #[test]
    fn should_share_updates_between_clones() {
        let shared = SharedLightState::default();
        let other = shared.clone();
        assert_eq!(other.store(LightProperty::Hue, 12_000), 12_000);
        assert_eq!(shared.snapshot().hue, 12_000);
    }
}
