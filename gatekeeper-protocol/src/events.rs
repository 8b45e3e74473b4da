//! Events carried by protocol frames
//!
//! Event ids are shared by both directions. The host sends display, actuator,
//! plate status and lot status events; the controller sends car detection.

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

/// Largest actuator angle in degrees
pub const MAX_ANGLE: u8 = 180;

/// Longest text a display event can carry
pub const MAX_TEXT_LEN: usize = MAX_PAYLOAD_SIZE;

/// Text payload of a display event
pub type DisplayText = String<MAX_TEXT_LEN>;

// Wire format values
const EVENT_DISPLAY: u8 = 0x01;
const EVENT_SET_ACTUATOR: u8 = 0x02;
const EVENT_CAR_DETECTED: u8 = 0x03;
const EVENT_LICENSE_PLATE_STATUS: u8 = 0x04;
const EVENT_LOT_FULL: u8 = 0x05;

/// Known event identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventId {
    Display,
    SetActuator,
    CarDetected,
    LicensePlateStatus,
    LotFull,
}

impl EventId {
    /// Parse an event id from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_DISPLAY => Some(EventId::Display),
            EVENT_SET_ACTUATOR => Some(EventId::SetActuator),
            EVENT_CAR_DETECTED => Some(EventId::CarDetected),
            EVENT_LICENSE_PLATE_STATUS => Some(EventId::LicensePlateStatus),
            EVENT_LOT_FULL => Some(EventId::LotFull),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            EventId::Display => EVENT_DISPLAY,
            EventId::SetActuator => EVENT_SET_ACTUATOR,
            EventId::CarDetected => EVENT_CAR_DETECTED,
            EventId::LicensePlateStatus => EVENT_LICENSE_PLATE_STATUS,
            EventId::LotFull => EVENT_LOT_FULL,
        }
    }
}

/// A typed protocol event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Show text on the display
    Display(DisplayText),
    /// Move the barrier arm to an angle in degrees
    SetActuator(u8),
    /// Vehicle presence at the barrier (controller to host)
    CarDetected(bool),
    /// Whether the recognized plate is registered
    LicensePlateStatus(bool),
    /// Whether the lot has no free spaces
    LotFull(bool),
}

impl Event {
    /// Build a display event, failing if the text does not fit in a frame
    pub fn display(text: &str) -> Result<Self, FrameError> {
        let text = DisplayText::try_from(text).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Event::Display(text))
    }

    /// Identifier of this event
    pub fn id(&self) -> EventId {
        match self {
            Event::Display(_) => EventId::Display,
            Event::SetActuator(_) => EventId::SetActuator,
            Event::CarDetected(_) => EventId::CarDetected,
            Event::LicensePlateStatus(_) => EventId::LicensePlateStatus,
            Event::LotFull(_) => EventId::LotFull,
        }
    }

    /// Parse an event from a frame's id and payload
    ///
    /// Returns `None` for unknown ids and for known ids whose payload is too
    /// short to carry the argument. The checksum is not looked at.
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        let id = EventId::from_byte(frame.event_id)?;
        let payload = frame.payload.as_slice();

        match id {
            EventId::Display => Some(Event::Display(decode_text(payload))),
            EventId::SetActuator => payload.first().map(|&angle| Event::SetActuator(angle)),
            EventId::CarDetected => payload.first().map(|&b| Event::CarDetected(decode_flag(b))),
            EventId::LicensePlateStatus => payload
                .first()
                .map(|&b| Event::LicensePlateStatus(decode_flag(b))),
            EventId::LotFull => payload.first().map(|&b| Event::LotFull(decode_flag(b))),
        }
    }

    /// Encode this event into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let id = self.id().to_byte();
        match self {
            Event::Display(text) => Frame::new(id, text.as_bytes()),
            Event::SetActuator(angle) => Frame::new(id, &[*angle]),
            Event::CarDetected(flag) | Event::LicensePlateStatus(flag) | Event::LotFull(flag) => {
                Frame::new(id, &[*flag as u8])
            }
        }
    }
}

/// Display text holding the longest prefix of `text` that fits
///
/// Cuts on a char boundary, never inside a multi-byte character.
pub fn truncate_text(text: &str) -> DisplayText {
    let mut line = DisplayText::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}

/// Flags are true only for the exact value 1
fn decode_flag(byte: u8) -> bool {
    byte == 1
}

/// Longest valid UTF-8 prefix of the payload
fn decode_text(payload: &[u8]) -> DisplayText {
    let valid = match core::str::from_utf8(payload) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&payload[..e.valid_up_to()]).unwrap_or_default(),
    };
    // payload is at most MAX_TEXT_LEN bytes
    DisplayText::try_from(valid).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_roundtrip() {
        let ids = [
            EventId::Display,
            EventId::SetActuator,
            EventId::CarDetected,
            EventId::LicensePlateStatus,
            EventId::LotFull,
        ];

        for id in ids {
            assert_eq!(EventId::from_byte(id.to_byte()), Some(id));
        }
    }

    #[test]
    fn test_unknown_event_id() {
        assert!(EventId::from_byte(0x00).is_none());
        assert!(EventId::from_byte(0x06).is_none());
        assert!(EventId::from_byte(0xFF).is_none());
    }

    #[test]
    fn test_display_frame() {
        let frame = Event::display("Ready").unwrap().to_frame().unwrap();
        assert_eq!(frame.event_id, 0x01);
        assert_eq!(frame.payload.as_slice(), b"Ready");
        assert_eq!(frame.checksum, 0xA7);
    }

    #[test]
    fn test_display_text_too_long() {
        let text = "This message is far too long to fit";
        assert_eq!(Event::display(text), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_flag_encoding() {
        let frame = Event::CarDetected(true).to_frame().unwrap();
        assert_eq!(frame.event_id, 0x03);
        assert_eq!(frame.payload.as_slice(), &[1]);

        let frame = Event::LotFull(false).to_frame().unwrap();
        assert_eq!(frame.payload.as_slice(), &[0]);
    }

    #[test]
    fn test_flag_decoding_only_one_is_true() {
        let frame = Frame::new(0x04, &[1]).unwrap();
        assert_eq!(Event::from_frame(&frame), Some(Event::LicensePlateStatus(true)));

        let frame = Frame::new(0x04, &[2]).unwrap();
        assert_eq!(Event::from_frame(&frame), Some(Event::LicensePlateStatus(false)));
    }

    #[test]
    fn test_set_actuator_keeps_raw_angle() {
        // Clamping is the dispatcher's job
        let frame = Frame::new(0x02, &[200]).unwrap();
        assert_eq!(Event::from_frame(&frame), Some(Event::SetActuator(200)));
    }

    #[test]
    fn test_missing_argument() {
        let frame = Frame::new(0x02, &[]).unwrap();
        assert_eq!(Event::from_frame(&frame), None);

        let frame = Frame::new(0x05, &[]).unwrap();
        assert_eq!(Event::from_frame(&frame), None);
    }

    #[test]
    fn test_empty_display_text() {
        let frame = Frame::new(0x01, &[]).unwrap();
        assert_eq!(Event::from_frame(&frame), Some(Event::display("").unwrap()));
    }

    #[test]
    fn test_invalid_utf8_truncated() {
        let frame = Frame::new(0x01, &[b'O', b'k', 0xFF, b'!']).unwrap();
        assert_eq!(Event::from_frame(&frame), Some(Event::display("Ok").unwrap()));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Lot Full").as_str(), "Lot Full");

        let long = "Spaces Available On Level Two";
        assert_eq!(truncate_text(long).as_str(), &long[..MAX_TEXT_LEN]);

        // "é" is two bytes; it must not be split at the limit
        let text = "Spaces Available On Level 2é";
        assert_eq!(text.len(), 29);
        assert_eq!(truncate_text(text).as_str(), "Spaces Available On Level 2");
    }

    #[test]
    fn test_unknown_id_has_no_event() {
        let frame = Frame::new(0x7F, &[1, 2, 3]).unwrap();
        assert_eq!(Event::from_frame(&frame), None);
    }
}
