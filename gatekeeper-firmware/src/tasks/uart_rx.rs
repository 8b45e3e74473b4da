//! Host UART receive task
//!
//! Receives bytes from the host and runs them through the protocol engine.
//! This task is the only owner of the decoder session.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use gatekeeper_core::config::ControllerConfig;
use gatekeeper_core::dispatch::Action;
use gatekeeper_core::engine::{ByteOutcome, ProtocolEngine};

use crate::collaborators::{ChannelLink, SignalActuator, SignalDisplay};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// UART RX task - decodes host frames, dispatches them and queues replies
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx<'static>, config: ControllerConfig) {
    info!("UART RX task started");

    let mut engine = ProtocolEngine::new(config);
    let mut actuator = SignalActuator;
    let mut display = SignalDisplay;
    let mut link = ChannelLink;
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);

                // Bytes are handled strictly in arrival order
                for &byte in &buf[..n] {
                    let outcome = engine.on_byte(byte, &mut actuator, &mut display, &mut link);
                    log_outcome(&outcome);
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn log_outcome(outcome: &ByteOutcome) {
    match outcome {
        ByteOutcome::Pending => {}
        ByteOutcome::Dropped(e) => {
            warn!("Frame dropped: {:?}", e);
        }
        ByteOutcome::Dispatched { dispatch, sent } => {
            match &dispatch.action {
                Action::Rejected => warn!("Checksum mismatch, frame rejected"),
                Action::Ignored => debug!("Frame acknowledged, no action"),
                Action::Actuator(angle) => debug!("Barrier to {} degrees", angle),
                Action::Display(text) => debug!("Display: {}", text.as_str()),
            }
            if let Err(e) = sent {
                warn!("Reply {:?} not sent: {:?}", dispatch.reply, e);
            }
        }
    }
}
