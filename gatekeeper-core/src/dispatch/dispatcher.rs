//! Event dispatcher
//!
//! Turns a decoded frame into at most one actuator write, at most one display
//! write, and exactly one reply.

use gatekeeper_protocol::{truncate_text, DisplayText, Event, Frame, Reply, MAX_ANGLE};

use crate::config::ControllerConfig;
use crate::traits::{Actuator, Display};

/// Effect of a dispatched frame on the collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Checksum mismatch; nothing was done
    Rejected,
    /// Valid frame with no local effect (unknown id, host-bound event or
    /// missing argument)
    Ignored,
    /// Actuator moved to this angle
    Actuator(u8),
    /// Display now shows this text
    Display(DisplayText),
}

/// Outcome of dispatching one frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// Reply to transmit to the host
    pub reply: Reply,
    /// What was done locally
    pub action: Action,
}

/// Maps decoded frames to collaborator actions
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: ControllerConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ControllerConfig::DEFAULT)
    }
}

impl Dispatcher {
    /// Create a dispatcher using the angles and texts of `config`
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Put the collaborators in their power-on state
    ///
    /// Shows the ready text and closes the barrier.
    pub fn boot<A, D>(&self, actuator: &mut A, display: &mut D)
    where
        A: Actuator + ?Sized,
        D: Display + ?Sized,
    {
        display.show(self.config.ready_text);
        actuator.set_angle(self.config.closed_angle.min(MAX_ANGLE));
    }

    /// Dispatch a decoded frame
    ///
    /// The checksum is checked here regardless of what the decoder saw;
    /// invalid frames get [`Reply::Err`] and no action. Valid frames are
    /// acknowledged even when their event is not acted on.
    pub fn dispatch<A, D>(&self, frame: &Frame, actuator: &mut A, display: &mut D) -> Dispatch
    where
        A: Actuator + ?Sized,
        D: Display + ?Sized,
    {
        if !frame.is_valid() {
            return Dispatch {
                reply: Reply::Err,
                action: Action::Rejected,
            };
        }

        let action = match Event::from_frame(frame) {
            Some(Event::Display(text)) => {
                display.show(&text);
                Action::Display(text)
            }
            Some(Event::SetActuator(angle)) => Self::move_to(actuator, angle),
            Some(Event::LicensePlateStatus(registered)) => {
                let angle = if registered {
                    self.config.open_angle
                } else {
                    self.config.closed_angle
                };
                Self::move_to(actuator, angle)
            }
            Some(Event::LotFull(full)) => {
                let text = if full {
                    self.config.lot_full_text
                } else {
                    self.config.spaces_available_text
                };
                display.show(text);
                Action::Display(truncate_text(text))
            }
            // Car detection only travels towards the host
            Some(Event::CarDetected(_)) | None => Action::Ignored,
        };

        Dispatch {
            reply: Reply::Ok,
            action,
        }
    }

    fn move_to<A: Actuator + ?Sized>(actuator: &mut A, angle: u8) -> Action {
        let angle = angle.min(MAX_ANGLE);
        actuator.set_angle(angle);
        Action::Actuator(angle)
    }
}
