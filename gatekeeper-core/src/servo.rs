//! Hobby servo pulse timing
//!
//! 50 Hz PWM; pulse width maps linearly from 1 ms at 0° to 2 ms at 180°.

use gatekeeper_protocol::MAX_ANGLE;

/// PWM frequency expected by the servo
pub const SERVO_FREQUENCY_HZ: u32 = 50;

/// PWM period in microseconds
pub const SERVO_PERIOD_US: u32 = 1_000_000 / SERVO_FREQUENCY_HZ;

/// Pulse width at 0° (µs)
pub const MIN_PULSE_US: u32 = 1_000;

/// Pulse width at 180° (µs)
pub const MAX_PULSE_US: u32 = 2_000;

/// Pulse width for an angle, saturating above 180°
pub fn pulse_width_us(angle: u8) -> u32 {
    let angle = angle.min(MAX_ANGLE) as u32;
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / MAX_ANGLE as u32
}
