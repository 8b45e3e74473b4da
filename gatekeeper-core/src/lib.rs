//! Board-agnostic core logic for the barrier controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (actuator, display, presence sensor, link, clock)
//! - Event dispatcher for frames received from the host
//! - Presence monitor (debounce and heartbeat reporting)
//! - Servo pulse timing for the barrier arm
//! - Protocol engine tying the frame decoder to the dispatcher
//! - Compile-time configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod presence;
pub mod servo;
pub mod traits;
