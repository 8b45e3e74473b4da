//! Frame encoding and decoding for the barrier controller protocol.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): event byte + payload length (1-29)
//! - EVENT (1 byte): event identifier
//! - PAYLOAD (0-28 bytes): event-specific data
//! - CHECKSUM (1 byte): CRC-8 of LENGTH, EVENT and all PAYLOAD bytes

use heapless::Vec;

use crate::crc::{crc8, Crc8};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum complete frame size, and the capacity of every frame buffer
pub const MAX_FRAME_SIZE: usize = 32;

/// Maximum payload size (START + LENGTH + EVENT + CHECKSUM overhead)
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - 4;

/// Errors that can occur during frame decoding or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Declared length of zero (no room for the event byte)
    InvalidLength,
    /// Declared length does not fit in the frame buffer
    Overflow,
}

/// A decoded or constructed frame
///
/// `checksum` is the checksum carried by the frame. For frames built with
/// [`Frame::new`] it is always correct; for decoded frames it is whatever
/// arrived on the wire, see [`Frame::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Event identifier
    pub event_id: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Checksum carried by the frame
    pub checksum: u8,
}

impl Frame {
    /// Create a new frame with the given event and payload
    pub fn new(event_id: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        let checksum = Self::calculate_checksum(payload.len() as u8 + 1, event_id, &payload);

        Ok(Self {
            event_id,
            payload,
            checksum,
        })
    }

    /// Value of the LENGTH field for this frame
    pub fn length(&self) -> u8 {
        self.payload.len() as u8 + 1
    }

    /// Checksum computed over this frame's length-prefixed region
    pub fn expected_checksum(&self) -> u8 {
        Self::calculate_checksum(self.length(), self.event_id, &self.payload)
    }

    /// Whether the carried checksum matches the frame contents
    pub fn is_valid(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// Size of the encoded frame in bytes
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    fn calculate_checksum(length: u8, event_id: u8, payload: &[u8]) -> u8 {
        let mut crc = Crc8::new();
        crc.update(&[length, event_id]);
        crc.update(payload);
        crc.finish()
    }

    /// Encode this frame into a byte buffer
    ///
    /// The checksum is always recomputed. Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let end = 3 + self.payload.len();
        buffer[0] = FRAME_START;
        buffer[1] = self.length();
        buffer[2] = self.event_id;
        buffer[3..end].copy_from_slice(&self.payload);
        buffer[end] = crc8(&buffer[1..end]);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Build a complete wire frame for an event and payload
pub fn encode(event_id: u8, payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    Frame::new(event_id, payload)?.encode_to_vec()
}

/// Byte-at-a-time state machine for decoding incoming frames
///
/// The decoder counts positions; it does not rescan for START inside a
/// frame. A 0xAA byte in the length or payload position is taken as data,
/// and a dropped byte leaves the decoder out of step until the declared
/// length has been consumed.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: DecodeState,
    buffer: Vec<u8, MAX_FRAME_SIZE>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Waiting for START byte
    Idle,
    /// Got START, waiting for LENGTH
    ReadingLength,
    /// Reading event, payload and checksum bytes
    ReadingPayload { remaining: u8 },
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a new frame decoder
    pub const fn new() -> Self {
        Self {
            state: DecodeState::Idle,
            buffer: Vec::new(),
        }
    }

    /// Drop any frame in flight and wait for the next START byte
    pub fn reset(&mut self) {
        self.state = DecodeState::Idle;
        self.buffer.clear();
    }

    /// Returns true when no frame is in flight
    pub fn is_idle(&self) -> bool {
        self.state == DecodeState::Idle
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(frame))` when a frame is complete, whether or not its
    /// checksum matches. `Ok(None)` means more bytes are needed. `Err` means
    /// the frame in flight was dropped because of its declared length; the
    /// decoder is back in the idle state.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            DecodeState::Idle => {
                // Silently ignore non-START bytes while idle
                if byte == FRAME_START {
                    self.buffer.clear();
                    self.push(byte)?;
                    self.state = DecodeState::ReadingLength;
                }
                Ok(None)
            }
            DecodeState::ReadingLength => {
                if byte == 0 {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                // START + LENGTH are already buffered
                if byte as usize + 1 > MAX_FRAME_SIZE - 2 {
                    self.reset();
                    return Err(FrameError::Overflow);
                }
                self.push(byte)?;
                self.state = DecodeState::ReadingPayload {
                    remaining: byte + 1,
                };
                Ok(None)
            }
            DecodeState::ReadingPayload { remaining } => {
                self.push(byte)?;
                let remaining = remaining - 1;
                if remaining > 0 {
                    self.state = DecodeState::ReadingPayload { remaining };
                    return Ok(None);
                }

                let frame = self.take_frame();
                self.reset();
                frame.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn push(&mut self, byte: u8) -> Result<(), FrameError> {
        if self.buffer.push(byte).is_err() {
            self.reset();
            return Err(FrameError::Overflow);
        }
        Ok(())
    }

    /// Split the completed buffer into its fields
    fn take_frame(&self) -> Result<Frame, FrameError> {
        let last = self.buffer.len() - 1;
        let payload = Vec::from_slice(&self.buffer[3..last]).map_err(|_| FrameError::Overflow)?;

        Ok(Frame {
            event_id: self.buffer[2],
            payload,
            checksum: self.buffer[last],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode_all(decoder: &mut FrameDecoder, bytes: &[u8]) -> std::vec::Vec<Frame> {
        let mut frames = std::vec::Vec::new();
        for &byte in bytes {
            if let Ok(Some(frame)) = decoder.feed(byte) {
                frames.push(frame);
            }
        }
        frames
    }

    #[test]
    fn test_encode_display_ready() {
        let encoded = encode(0x01, b"Ready").unwrap();
        assert_eq!(
            encoded.as_slice(),
            &[0xAA, 0x06, 0x01, 0x52, 0x65, 0x61, 0x64, 0x79, 0xA7]
        );
    }

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::new(0x42, &[]).unwrap();
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 1); // length counts the event byte
        assert_eq!(buffer[2], 0x42);
        assert_eq!(buffer[3], 0xDC);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x01, b"Ready").unwrap();
        let mut buffer = [0u8; 8];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(encode(0x01, &large_payload), Err(FrameError::PayloadTooLarge));

        let max_payload = [0u8; MAX_PAYLOAD_SIZE];
        let encoded = encode(0x01, &max_payload).unwrap();
        assert_eq!(encoded.len(), MAX_FRAME_SIZE);
    }

    #[test]
    fn test_decode_display_ready() {
        let mut decoder = FrameDecoder::new();
        let frame = decoder
            .feed_bytes(&[0xAA, 0x06, 0x01, 0x52, 0x65, 0x61, 0x64, 0x79, 0xA7])
            .unwrap()
            .unwrap();

        assert_eq!(frame.event_id, 0x01);
        assert_eq!(frame.payload.as_slice(), b"Ready");
        assert!(frame.is_valid());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_decode_wrong_checksum_still_emits() {
        let mut decoder = FrameDecoder::new();
        let frame = decoder
            .feed_bytes(&[0xAA, 0x02, 0x03, 0x01, 0x00])
            .unwrap()
            .unwrap();

        assert_eq!(frame.event_id, 0x03);
        assert_eq!(frame.payload.as_slice(), &[0x01]);
        assert!(!frame.is_valid());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_resync_after_garbage() {
        let encoded = encode(0x05, &[1]).unwrap();

        let mut data = Vec::<u8, 40>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut decoder = FrameDecoder::new();
        let frame = decoder.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(frame.event_id, 0x05);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_overflow_length_resets() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(FRAME_START), Ok(None));
        assert_eq!(decoder.feed(30), Err(FrameError::Overflow));
        assert!(decoder.is_idle());

        // A fresh START is accepted immediately
        let encoded = encode(0x02, &[45]).unwrap();
        let frame = decoder.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(frame.event_id, 0x02);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_largest_length_accepted() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(FRAME_START).unwrap();
        assert_eq!(decoder.feed(29), Ok(None));
        assert!(!decoder.is_idle());
    }

    #[test]
    fn test_zero_length_resets() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(FRAME_START).unwrap();
        assert_eq!(decoder.feed(0), Err(FrameError::InvalidLength));
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_start_byte_inside_payload_is_data() {
        // 0xAA as the servo angle is payload, not a new frame
        let encoded = encode(0x02, &[FRAME_START]).unwrap();
        let mut decoder = FrameDecoder::new();
        let frame = decoder.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(frame.payload.as_slice(), &[FRAME_START]);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_dropped_byte_desynchronizes_until_count_expires() {
        let first = encode(0x04, &[1]).unwrap();
        let second = encode(0x05, &[1]).unwrap();

        // Drop the event byte of the first frame
        let mut stream = std::vec::Vec::new();
        stream.extend_from_slice(&first[..2]);
        stream.extend_from_slice(&first[3..]);
        stream.extend_from_slice(&second);

        let mut decoder = FrameDecoder::new();
        let frames = decode_all(&mut decoder, &stream);

        // The truncated frame swallows the START of the next one and fails
        // its checksum; the remainder of the second frame is discarded
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].is_valid());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_stalled_frame_stays_in_flight() {
        let encoded = encode(0x01, b"Hi").unwrap();
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed_bytes(&encoded[..3]), Ok(None));
        assert!(!decoder.is_idle());

        decoder.reset();
        assert!(decoder.is_idle());
        let frame = decoder.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(frame.payload.as_slice(), b"Hi");
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut stream = std::vec::Vec::new();
        stream.extend_from_slice(&encode(0x04, &[1]).unwrap());
        stream.extend_from_slice(&encode(0x01, b"Welcome").unwrap());
        stream.extend_from_slice(&encode(0x05, &[0]).unwrap());

        let mut decoder = FrameDecoder::new();
        let frames = decode_all(&mut decoder, &stream);
        let ids: std::vec::Vec<u8> = frames.iter().map(|f| f.event_id).collect();
        assert_eq!(ids, [0x04, 0x01, 0x05]);
        assert!(frames.iter().all(Frame::is_valid));
    }

    proptest! {
        #[test]
        fn roundtrip_one_byte_at_a_time(
            event_id in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let encoded = encode(event_id, &payload).unwrap();
            let mut decoder = FrameDecoder::new();
            let frames = decode_all(&mut decoder, &encoded);

            prop_assert_eq!(frames.len(), 1);
            prop_assert_eq!(frames[0].event_id, event_id);
            prop_assert_eq!(frames[0].payload.as_slice(), payload.as_slice());
            prop_assert!(frames[0].is_valid());
        }

        #[test]
        fn single_bit_flip_detected(
            event_id in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
            bit in any::<usize>(),
        ) {
            let mut encoded = encode(event_id, &payload).unwrap();
            // Covered region: event byte, payload and checksum. The length
            // byte is excluded because changing it reframes the stream.
            let covered_bits = (encoded.len() - 2) * 8;
            let bit = bit % covered_bits;
            encoded[2 + bit / 8] ^= 1 << (bit % 8);

            let mut decoder = FrameDecoder::new();
            let frames = decode_all(&mut decoder, &encoded);
            prop_assert_eq!(frames.len(), 1);
            prop_assert!(!frames[0].is_valid());
        }

        #[test]
        fn overflowing_length_never_emits(len in 30u8..=255, tail in proptest::collection::vec(0u8..0xAA, 0..64)) {
            let mut decoder = FrameDecoder::new();
            decoder.feed(FRAME_START).unwrap();
            prop_assert_eq!(decoder.feed(len), Err(FrameError::Overflow));
            prop_assert!(decoder.is_idle());

            // Without a START byte nothing more is ever produced
            let frames = decode_all(&mut decoder, &tail);
            prop_assert!(frames.is_empty());
            prop_assert!(decoder.is_idle());
        }
    }
}
