//! Presence monitor implementation

use gatekeeper_protocol::Event;

use crate::config::ControllerConfig;
use crate::engine::send_event;
use crate::traits::{Clock, Link, PresenceSensor};

/// Reports produced by one sampling tick
///
/// A change and a heartbeat can both occur in the same tick; they are sent
/// as two separate frames, change first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresenceReport {
    /// New debounced reading, if it changed this tick
    pub change: Option<bool>,
    /// Debounced reading to re-send as a heartbeat, if one is due
    pub heartbeat: Option<bool>,
}

impl PresenceReport {
    /// Car detection events to transmit, in order
    pub fn events(&self) -> impl Iterator<Item = Event> {
        self.change
            .into_iter()
            .chain(self.heartbeat)
            .map(Event::CarDetected)
    }

    /// Returns true if nothing needs to be sent
    pub fn is_empty(&self) -> bool {
        self.change.is_none() && self.heartbeat.is_none()
    }
}

/// Result of [`PresenceMonitor::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// What the tick produced
    pub report: PresenceReport,
    /// Frames handed to the link
    pub sent: u8,
    /// Frames the link refused or timed out on
    pub failed: u8,
}

/// Presence monitor
///
/// The debounced reading follows the raw reading only after the raw reading
/// has held the same value for the debounce interval.
#[derive(Debug, Clone)]
pub struct PresenceMonitor {
    debounce_ms: u64,
    heartbeat_ms: u64,
    /// Raw reading seen on the previous tick
    last_raw: bool,
    /// Accepted reading
    debounced: bool,
    /// When the raw reading last changed
    last_transition_ms: u64,
    /// When the last heartbeat was sent
    last_heartbeat_ms: u64,
}

impl PresenceMonitor {
    /// Create a monitor starting at `now_ms` with no vehicle present
    pub fn new(config: &ControllerConfig, now_ms: u64) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            heartbeat_ms: config.heartbeat_ms,
            last_raw: false,
            debounced: false,
            last_transition_ms: now_ms,
            last_heartbeat_ms: now_ms,
        }
    }

    /// Current debounced reading
    pub fn is_present(&self) -> bool {
        self.debounced
    }

    /// Advance the monitor with one raw sample
    pub fn update(&mut self, now_ms: u64, raw: bool) -> PresenceReport {
        let mut report = PresenceReport::default();

        if raw != self.last_raw {
            self.last_transition_ms = now_ms;
        }
        self.last_raw = raw;

        let stable_for = now_ms.saturating_sub(self.last_transition_ms);
        if stable_for >= self.debounce_ms && raw != self.debounced {
            self.debounced = raw;
            report.change = Some(raw);
        }

        if now_ms.saturating_sub(self.last_heartbeat_ms) >= self.heartbeat_ms {
            self.last_heartbeat_ms = now_ms;
            report.heartbeat = Some(self.debounced);
        }

        report
    }

    /// Sample the sensor, advance the monitor and send any due reports
    ///
    /// Transmission is best effort: failures are counted, not retried. The
    /// next heartbeat carries the state again.
    pub fn poll<S, C, L>(&mut self, sensor: &mut S, clock: &C, link: &mut L) -> PollOutcome
    where
        S: PresenceSensor + ?Sized,
        C: Clock + ?Sized,
        L: Link + ?Sized,
    {
        let raw = sensor.read();
        let report = self.update(clock.now_ms(), raw);
        let mut outcome = PollOutcome {
            report,
            ..PollOutcome::default()
        };

        for event in report.events() {
            match send_event(link, &event) {
                Ok(()) => outcome.sent += 1,
                Err(_) => outcome.failed += 1,
            }
        }

        outcome
    }
}
