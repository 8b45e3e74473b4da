//! Hobby servo driver for the barrier arm

use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::timer::GeneralInstance4Channel;
use gatekeeper_core::servo::{pulse_width_us, SERVO_PERIOD_US};

/// Servo on one PWM channel
pub struct Servo<'d, T: GeneralInstance4Channel> {
    channel: SimplePwmChannel<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> Servo<'d, T> {
    /// Take over a PWM channel already running at the servo frequency
    pub fn new(mut channel: SimplePwmChannel<'d, T>) -> Self {
        channel.enable();
        Self { channel }
    }

    /// Move to an angle in degrees
    pub fn set_angle(&mut self, angle: u8) {
        // Both fit in u16: pulse <= 2000 µs, period 20000 µs
        self.channel
            .set_duty_cycle_fraction(pulse_width_us(angle) as u16, SERVO_PERIOD_US as u16);
    }
}
