//! Collaborator traits
//!
//! These traits define the interface between the protocol logic and the
//! board-specific peripherals. Implementations are assumed infallible except
//! for the link, which may time out.

pub mod actuator;
pub mod clock;
pub mod display;
pub mod link;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;

pub use actuator::Actuator;
pub use clock::Clock;
pub use display::Display;
pub use link::{Link, LinkError};
pub use sensor::PresenceSensor;
