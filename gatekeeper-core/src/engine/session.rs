//! Byte-arrival session: decoder, dispatcher and reply transmission

use gatekeeper_protocol::{Event, FrameDecoder, FrameError};

use crate::config::ControllerConfig;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::traits::{Actuator, Display, Link, LinkError};

/// Errors from sending an event to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Event could not be framed
    Frame(FrameError),
    /// Link refused or timed out
    Link(LinkError),
}

impl From<FrameError> for SendError {
    fn from(e: FrameError) -> Self {
        SendError::Frame(e)
    }
}

impl From<LinkError> for SendError {
    fn from(e: LinkError) -> Self {
        SendError::Link(e)
    }
}

/// Encode an event as a complete frame and hand it to the link
pub fn send_event<L: Link + ?Sized>(link: &mut L, event: &Event) -> Result<(), SendError> {
    let frame = event.to_frame()?.encode_to_vec()?;
    link.send(&frame)?;
    Ok(())
}

/// Result of feeding one byte to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOutcome {
    /// Frame not complete yet (or no frame in flight)
    Pending,
    /// Frame in flight dropped for its declared length; nothing was sent
    Dropped(FrameError),
    /// Frame completed, dispatched and answered
    Dispatched {
        /// Reply and local action
        dispatch: Dispatch,
        /// Result of transmitting the reply
        sent: Result<(), LinkError>,
    },
}

/// Protocol engine owning the receive session
///
/// Bytes must be fed in arrival order from a single context. The engine
/// holds all decoder state, so nothing else needs to lock it.
#[derive(Debug, Clone, Default)]
pub struct ProtocolEngine {
    decoder: FrameDecoder,
    dispatcher: Dispatcher,
}

impl ProtocolEngine {
    /// Create an engine for `config`
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            decoder: FrameDecoder::new(),
            dispatcher: Dispatcher::new(config),
        }
    }

    /// Returns true when no frame is in flight
    pub fn is_idle(&self) -> bool {
        self.decoder.is_idle()
    }

    /// Handle one received byte
    ///
    /// On frame completion the frame is dispatched and exactly one reply is
    /// sent, synchronously, before returning.
    pub fn on_byte<A, D, L>(
        &mut self,
        byte: u8,
        actuator: &mut A,
        display: &mut D,
        link: &mut L,
    ) -> ByteOutcome
    where
        A: Actuator + ?Sized,
        D: Display + ?Sized,
        L: Link + ?Sized,
    {
        let frame = match self.decoder.feed(byte) {
            Ok(Some(frame)) => frame,
            Ok(None) => return ByteOutcome::Pending,
            Err(e) => return ByteOutcome::Dropped(e),
        };

        let dispatch = self.dispatcher.dispatch(&frame, actuator, display);
        let sent = link.send(dispatch.reply.as_bytes());

        ByteOutcome::Dispatched { dispatch, sent }
    }
}
