//! In-process host backed by a registry and a tokio broadcast channel.
//!
//! This is the minimal host `sensorkitd` and the tests run drivers against.
//! It keeps registrations and the latest reading per stream in memory and
//! fans every accepted reading out to subscribers. Nothing is persisted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use sensorkit_domain::actuator::{ActuatorKind, ActuatorSpec};
use sensorkit_domain::error::{DriverError, NotFoundError, ValidationError};
use sensorkit_domain::path::StreamPath;
use sensorkit_domain::reading::Reading;
use sensorkit_domain::stream::{Metadata, TimeseriesSpec};
use sensorkit_domain::value::StateValue;

use crate::ports::{Actuator, Host};

/// A reading accepted by the host, as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingEvent {
    pub path: StreamPath,
    pub reading: Reading,
}

struct RegisteredActuator {
    spec: ActuatorSpec,
    actuator: Arc<dyn Actuator>,
}

#[derive(Default)]
struct Registry {
    streams: HashMap<StreamPath, TimeseriesSpec>,
    actuators: HashMap<StreamPath, RegisteredActuator>,
    metadata: HashMap<StreamPath, Metadata>,
    latest: HashMap<StreamPath, Reading>,
}

/// In-process [`Host`] implementation.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessHost {
    registry: Mutex<Registry>,
    sender: broadcast::Sender<ReadingEvent>,
}

impl InProcessHost {
    /// Create a new host whose reading channel buffers `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            registry: Mutex::new(Registry::default()),
            sender,
        }
    }

    /// Subscribe to readings accepted *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReadingEvent> {
        self.sender.subscribe()
    }

    /// Most recent reading on `path`.
    #[must_use]
    pub fn latest(&self, path: &StreamPath) -> Option<Reading> {
        self.lock().latest.get(path).copied()
    }

    /// Registered descriptor for the stream at `path`.
    #[must_use]
    pub fn timeseries(&self, path: &StreamPath) -> Option<TimeseriesSpec> {
        self.lock().streams.get(path).cloned()
    }

    /// Registered descriptor for the actuator at `path`.
    #[must_use]
    pub fn actuator_spec(&self, path: &StreamPath) -> Option<ActuatorSpec> {
        self.lock().actuators.get(path).map(|entry| entry.spec.clone())
    }

    /// Metadata attached to `path`.
    #[must_use]
    pub fn metadata(&self, path: &StreamPath) -> Option<Metadata> {
        self.lock().metadata.get(path).cloned()
    }

    /// All registered stream paths, sorted.
    #[must_use]
    pub fn stream_paths(&self) -> Vec<StreamPath> {
        let mut paths: Vec<_> = self.lock().streams.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// All registered actuator paths, sorted.
    #[must_use]
    pub fn actuator_paths(&self) -> Vec<StreamPath> {
        let mut paths: Vec<_> = self.lock().actuators.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Read the actuator at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] for unknown paths, or whatever the
    /// actuator's `read` returns.
    #[tracing::instrument(skip(self))]
    pub async fn read_actuator(
        &self,
        path: &StreamPath,
    ) -> Result<Option<StateValue>, DriverError> {
        let (_, actuator) = self.actuator_entry(path)?;
        actuator.read().await
    }

    /// Check `state` against the actuator's capability, then write it.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NotFound`] for unknown paths,
    /// [`DriverError::Coercion`] / [`DriverError::Validation`] when `state`
    /// is rejected by the capability, or whatever the actuator's `write`
    /// returns.
    #[tracing::instrument(skip(self))]
    pub async fn actuate(
        &self,
        path: &StreamPath,
        state: StateValue,
    ) -> Result<Option<StateValue>, DriverError> {
        let (kind, actuator) = self.actuator_entry(path)?;
        kind.check(&state)?;
        actuator.write(state).await
    }

    fn actuator_entry(
        &self,
        path: &StreamPath,
    ) -> Result<(ActuatorKind, Arc<dyn Actuator>), NotFoundError> {
        let registry = self.lock();
        let entry = registry.actuators.get(path).ok_or_else(|| NotFoundError {
            entity: "Actuator",
            path: path.clone(),
        })?;
        Ok((entry.spec.kind.clone(), Arc::clone(&entry.actuator)))
    }

    fn register_stream(&self, spec: TimeseriesSpec) -> Result<(), DriverError> {
        let mut registry = self.lock();
        if registry.streams.contains_key(&spec.path) {
            return Err(ValidationError::AlreadyRegistered { path: spec.path }.into());
        }
        tracing::debug!(
            path = %spec.path,
            unit = %spec.unit,
            data_type = %spec.data_type,
            "timeseries registered"
        );
        registry.streams.insert(spec.path.clone(), spec);
        Ok(())
    }

    fn register_actuator(
        &self,
        spec: ActuatorSpec,
        actuator: Box<dyn Actuator>,
    ) -> Result<(), DriverError> {
        let mut registry = self.lock();
        if registry.actuators.contains_key(&spec.path) {
            return Err(ValidationError::AlreadyRegistered { path: spec.path }.into());
        }
        if let Some(stream) = &spec.stream {
            if !registry.streams.contains_key(stream) {
                return Err(NotFoundError {
                    entity: "Stream",
                    path: stream.clone(),
                }
                .into());
            }
        }
        tracing::debug!(path = %spec.path, kind = ?spec.kind, "actuator registered");
        registry.actuators.insert(
            spec.path.clone(),
            RegisteredActuator {
                spec,
                actuator: Arc::from(actuator),
            },
        );
        Ok(())
    }

    fn merge_metadata(&self, path: &StreamPath, metadata: Metadata) {
        self.lock()
            .metadata
            .entry(path.clone())
            .or_default()
            .extend(metadata);
    }

    fn accept(&self, path: &StreamPath, reading: Reading) -> Result<(), DriverError> {
        {
            let mut registry = self.lock();
            let spec = registry.streams.get(path).ok_or_else(|| NotFoundError {
                entity: "Stream",
                path: path.clone(),
            })?;
            let actual = reading.value.data_type();
            if spec.data_type != actual {
                return Err(ValidationError::DataTypeMismatch {
                    path: path.clone(),
                    expected: spec.data_type,
                    actual,
                }
                .into());
            }
            registry.latest.insert(path.clone(), reading);
        }

        tracing::debug!(path = %path, value = ?reading.value, "reading accepted");
        // Zero receivers is not an error here.
        let _ = self.sender.send(ReadingEvent {
            path: path.clone(),
            reading,
        });
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Host for InProcessHost {
    fn add_timeseries(
        &self,
        spec: TimeseriesSpec,
    ) -> impl Future<Output = Result<(), DriverError>> + Send {
        let result = self.register_stream(spec);
        async move { result }
    }

    fn add_actuator(
        &self,
        spec: ActuatorSpec,
        actuator: Box<dyn Actuator>,
    ) -> impl Future<Output = Result<(), DriverError>> + Send {
        let result = self.register_actuator(spec, actuator);
        async move { result }
    }

    fn set_metadata(
        &self,
        path: &StreamPath,
        metadata: Metadata,
    ) -> impl Future<Output = Result<(), DriverError>> + Send {
        self.merge_metadata(path, metadata);
        async { Ok(()) }
    }

    fn add(
        &self,
        path: &StreamPath,
        reading: Reading,
    ) -> impl Future<Output = Result<(), DriverError>> + Send {
        let result = self.accept(path, reading);
        async move { result }
    }
}
