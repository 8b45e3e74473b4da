//! Barrier arm actuator trait

/// Position-controlled actuator (servo) driving the barrier arm
pub trait Actuator {
    /// Move to an angle in degrees (0-180)
    ///
    /// Values above 180 saturate in the driver.
    fn set_angle(&mut self, angle: u8);
}
