//! Recording collaborators for host tests

use std::string::String;
use std::vec::Vec;

use super::{Actuator, Clock, Display, Link, LinkError, PresenceSensor};

#[derive(Debug, Default)]
pub struct MockActuator {
    pub angles: Vec<u8>,
}

impl Actuator for MockActuator {
    fn set_angle(&mut self, angle: u8) {
        self.angles.push(angle);
    }
}

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub texts: Vec<String>,
}

impl Display for MockDisplay {
    fn show(&mut self, text: &str) {
        self.texts.push(text.into());
    }
}

/// Records every transmission; fails with `fail_with` when set
#[derive(Debug, Default)]
pub struct MockLink {
    pub sent: Vec<Vec<u8>>,
    pub fail_with: Option<LinkError>,
}

impl Link for MockLink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockSensor {
    pub level: bool,
}

impl PresenceSensor for MockSensor {
    fn read(&mut self) -> bool {
        self.level
    }
}

#[derive(Debug, Default)]
pub struct MockClock {
    pub now: u64,
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}
