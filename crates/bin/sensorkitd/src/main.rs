//! # sensorkitd
//!
//! Composition root that wires the drivers to an in-process host and polls
//! them until shutdown.
//!
//! ## Responsibilities
//! - Load configuration (file, then environment overrides)
//! - Install the tracing subscriber
//! - Set up every enabled driver against the host
//! - Start one poller per driver
//! - Log readings as the host accepts them
//! - Stop the pollers on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no driver logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::EnvFilter;

use sensorkit_adapter_nt160e::Nt160eDriver;
use sensorkit_adapter_virtual_light::VirtualLightDriver;
use sensorkit_app::host::{InProcessHost, ReadingEvent};
use sensorkit_app::poller::PeriodicPoller;
use sensorkit_app::ports::Driver;

use crate::config::Config;

/// Readings buffered for slow subscribers before they start lagging.
const EVENT_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sensorkitd starting");

    let host = Arc::new(InProcessHost::new(EVENT_CAPACITY));
    let readings = tokio::spawn(log_readings(host.subscribe()));
    let mut pollers = Vec::new();

    if config.virtual_light.enabled {
        let driver = VirtualLightDriver::new(config.virtual_light.driver.clone());
        pollers.push(launch(driver, &host).await?);
    } else {
        tracing::info!("virtual light disabled");
    }

    if config.thermostat.enabled {
        let driver = Nt160eDriver::new(config.thermostat.device.clone())
            .context("failed to build thermostat driver")?;
        pollers.push(launch(driver, &host).await?);
    } else {
        tracing::info!("thermostat disabled");
    }

    if pollers.is_empty() {
        tracing::warn!("no driver enabled, nothing to poll");
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    tracing::info!("shutting down");

    for poller in &mut pollers {
        poller.stop();
    }
    readings.abort();
    Ok(())
}

/// Register `driver` with the host and start polling it.
async fn launch<D: Driver + 'static>(
    mut driver: D,
    host: &Arc<InProcessHost>,
) -> anyhow::Result<PeriodicPoller> {
    let name = driver.name();
    driver
        .setup(host.as_ref())
        .await
        .with_context(|| format!("{name} setup failed"))?;
    let period = driver.poll_interval();
    Ok(PeriodicPoller::start(
        Arc::new(driver),
        Arc::clone(host),
        period,
    ))
}

async fn log_readings(mut events: broadcast::Receiver<ReadingEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::info!(
                path = %event.path,
                value = ?event.reading.value,
                at = %event.reading.timestamp,
                "reading"
            ),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "reading log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
