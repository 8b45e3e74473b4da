//! Board implementations of the core collaborator traits
//!
//! Actuator and display writes only post to a signal; the servo and display
//! tasks do the hardware work. The link enqueues for the UART TX task.

use embassy_stm32::gpio::Input;
use embassy_time::Instant;

use gatekeeper_core::traits::{Actuator, Clock, Display, Link, LinkError, PresenceSensor};
use gatekeeper_protocol::truncate_text;

use crate::channels::{TxPacket, DISPLAY_TEXT, SERVO_ANGLE, TX_CHANNEL};

/// Actuator that forwards angles to the servo task
pub struct SignalActuator;

impl Actuator for SignalActuator {
    fn set_angle(&mut self, angle: u8) {
        SERVO_ANGLE.signal(angle);
    }
}

/// Display that forwards text to the display task
pub struct SignalDisplay;

impl Display for SignalDisplay {
    fn show(&mut self, text: &str) {
        DISPLAY_TEXT.signal(truncate_text(text));
    }
}

/// Link that queues packets for the UART TX task
///
/// Never waits: a full queue fails immediately with [`LinkError::Busy`].
/// The transmit timeout is applied by the TX task.
pub struct ChannelLink;

impl Link for ChannelLink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        let packet = TxPacket::from_slice(bytes).map_err(|_| LinkError::Busy)?;
        TX_CHANNEL.try_send(packet).map_err(|_| LinkError::Busy)
    }
}

/// Presence sensor on a GPIO input, high when a vehicle is present
pub struct SensorInput<'d> {
    pin: Input<'d>,
}

impl<'d> SensorInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl PresenceSensor for SensorInput<'_> {
    fn read(&mut self) -> bool {
        self.pin.is_high()
    }
}

/// Uptime clock from the embassy time driver
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
