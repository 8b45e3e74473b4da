//! Protocol engine
//!
//! The byte-arrival path: every received byte advances the frame decoder,
//! and a completed frame is dispatched and answered before the next byte is
//! looked at.

mod session;

pub use session::{send_event, ByteOutcome, ProtocolEngine, SendError};
