//! Vehicle presence sensor trait

/// Digital presence sensor, polled once per control-loop tick
pub trait PresenceSensor {
    /// Raw reading, `true` when a vehicle is detected
    fn read(&mut self) -> bool;
}
