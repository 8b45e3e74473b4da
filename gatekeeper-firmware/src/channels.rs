//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use gatekeeper_protocol::{DisplayText, MAX_FRAME_SIZE};

/// Channel capacity for outbound packets
const TX_CHANNEL_SIZE: usize = 8;

/// One outbound transmission: an encoded frame or a reply line
pub type TxPacket = Vec<u8, MAX_FRAME_SIZE>;

/// Outbound packets, drained by the UART TX task
///
/// Both the receive path (replies) and the presence task (car detection)
/// send through here, so the UART has a single writer.
pub static TX_CHANNEL: Channel<CriticalSectionRawMutex, TxPacket, TX_CHANNEL_SIZE> =
    Channel::new();

/// Latest text to show on the display
pub static DISPLAY_TEXT: Signal<CriticalSectionRawMutex, DisplayText> = Signal::new();

/// Latest barrier angle (degrees)
pub static SERVO_ANGLE: Signal<CriticalSectionRawMutex, u8> = Signal::new();
