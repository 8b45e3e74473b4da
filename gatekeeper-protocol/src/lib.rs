//! Barrier Controller Serial Protocol
//!
//! This crate defines the UART protocol between the barrier controller
//! (STM32) and the host computer that runs plate recognition. The host
//! drives the barrier and the display; the controller reports vehicle
//! presence.
//!
//! # Protocol Overview
//!
//! Host-bound and controller-bound packets share one binary frame format:
//! ```text
//! ┌───────┬────────┬───────┬─────────────┬──────────┐
//! │ START │ LENGTH │ EVENT │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B    │ 0–28B       │ 1B       │
//! └───────┴────────┴───────┴─────────────┴──────────┘
//! ```
//!
//! `LENGTH` counts the event byte plus the payload. The checksum is CRC-8
//! (poly 0x07) over `LENGTH`, `EVENT` and `PAYLOAD`.
//!
//! Every frame the controller receives is answered on the same link with an
//! unframed ASCII reply, `OK\n` or `ERR\n`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod crc;
pub mod events;
pub mod frame;
pub mod reply;

pub use crc::{crc8, Crc8};
pub use events::{truncate_text, DisplayText, Event, EventId, MAX_ANGLE, MAX_TEXT_LEN};
pub use frame::{
    encode, Frame, FrameDecoder, FrameError, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
};
pub use reply::{Reply, ReplyError, ReplyParser};
