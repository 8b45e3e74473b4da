//! Controller configuration
//!
//! The controller has no runtime configuration surface. Everything is a
//! compile-time constant, gathered in [`ControllerConfig`] so tests can vary
//! individual values.

/// Time the raw sensor reading must hold before it is accepted (ms)
pub const DEBOUNCE_INTERVAL_MS: u64 = 50;

/// Interval between periodic presence reports (ms)
pub const HEARTBEAT_INTERVAL_MS: u64 = 1000;

/// Longest a single link transmission may wait (ms)
pub const LINK_TIMEOUT_MS: u64 = 10;

/// Barrier angle for a registered vehicle (degrees)
pub const OPEN_ANGLE: u8 = 90;

/// Barrier angle at rest (degrees)
pub const CLOSED_ANGLE: u8 = 0;

/// Text shown after boot
pub const READY_TEXT: &str = "Ready";

/// Text shown when the host reports the lot full
pub const LOT_FULL_TEXT: &str = "Lot Full";

/// Text shown when the host reports free spaces
pub const SPACES_AVAILABLE_TEXT: &str = "Spaces Available";

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Sensor debounce interval (ms)
    pub debounce_ms: u64,
    /// Presence heartbeat interval (ms)
    pub heartbeat_ms: u64,
    /// Barrier open angle (degrees)
    pub open_angle: u8,
    /// Barrier closed angle (degrees)
    pub closed_angle: u8,
    /// Boot text
    pub ready_text: &'static str,
    /// Lot full text
    pub lot_full_text: &'static str,
    /// Spaces available text
    pub spaces_available_text: &'static str,
}

impl ControllerConfig {
    /// Configuration built from the crate constants
    pub const DEFAULT: Self = Self {
        debounce_ms: DEBOUNCE_INTERVAL_MS,
        heartbeat_ms: HEARTBEAT_INTERVAL_MS,
        open_angle: OPEN_ANGLE,
        closed_angle: CLOSED_ANGLE,
        ready_text: READY_TEXT,
        lot_full_text: LOT_FULL_TEXT,
        spaces_available_text: SPACES_AVAILABLE_TEXT,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
