//! Presence sampling task
//!
//! The control loop: samples the vehicle sensor every tick, debounces it and
//! reports changes and heartbeats to the host. Never blocks on the link.

use defmt::*;
use embassy_time::{Duration, Ticker};

use gatekeeper_core::config::ControllerConfig;
use gatekeeper_core::presence::PresenceMonitor;
use gatekeeper_core::traits::Clock;

use crate::collaborators::{ChannelLink, SensorInput, UptimeClock};

/// Sampling interval in milliseconds
pub const SAMPLE_INTERVAL_MS: u64 = 1;

/// Presence task - debounced car detection and heartbeat
#[embassy_executor::task]
pub async fn presence_task(mut sensor: SensorInput<'static>, config: ControllerConfig) {
    info!("Presence task started");

    let clock = UptimeClock;
    let mut link = ChannelLink;
    let mut monitor = PresenceMonitor::new(&config, clock.now_ms());
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));

    loop {
        ticker.next().await;

        let outcome = monitor.poll(&mut sensor, &clock, &mut link);
        if outcome.report.is_empty() {
            continue;
        }

        if let Some(present) = outcome.report.change {
            info!("Car detected: {}", present);
        }
        if outcome.report.heartbeat.is_some() {
            trace!("Presence heartbeat");
        }
        if outcome.failed > 0 {
            warn!("{} presence report(s) not sent", outcome.failed);
        }
    }
}
