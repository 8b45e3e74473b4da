//! Vehicle presence monitoring
//!
//! Debounces the presence sensor and reports its state to the host, both on
//! change and as a periodic heartbeat.

mod monitor;

pub use monitor::{PollOutcome, PresenceMonitor, PresenceReport};
