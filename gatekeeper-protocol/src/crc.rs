//! CRC-8 checksum used by the frame layer
//!
//! Polynomial 0x07, initial value 0x00, no reflection, MSB first.

const POLYNOMIAL: u8 = 0x07;

/// Lookup table, one entry per possible byte value
const TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Incremental CRC-8 accumulator
///
/// Feeding a span in several pieces gives the same result as [`crc8`] over
/// the concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crc8 {
    crc: u8,
}

impl Crc8 {
    /// Start a new checksum
    pub const fn new() -> Self {
        Self { crc: 0 }
    }

    /// Add bytes to the running checksum
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.crc = TABLE[(self.crc ^ byte) as usize];
        }
    }

    /// Current checksum value
    pub fn finish(&self) -> u8 {
        self.crc
    }
}

/// Compute the CRC-8 of a byte span
pub fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = Crc8::new();
    crc.update(bytes);
    crc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Bit-by-bit reference, straight from the polynomial definition
    fn crc8_bitwise(bytes: &[u8]) -> u8 {
        let mut crc = 0u8;
        for &byte in bytes {
            crc ^= byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 {
                    (crc << 1) ^ POLYNOMIAL
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    #[test]
    fn test_check_value() {
        // Standard CRC-8 check input
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_empty_span() {
        assert_eq!(crc8(&[]), 0x00);
    }

    #[test]
    fn test_known_frame_regions() {
        assert_eq!(crc8(&[0x06, 0x01, b'R', b'e', b'a', b'd', b'y']), 0xA7);
        assert_eq!(crc8(&[0x02, 0x03, 0x01]), 0xEE);
    }

    proptest! {
        #[test]
        fn table_matches_bitwise(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(crc8(&bytes), crc8_bitwise(&bytes));
        }

        #[test]
        fn incremental_matches_whole_span(
            a in proptest::collection::vec(any::<u8>(), 0..32),
            b in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let mut incremental = Crc8::new();
            incremental.update(&a);
            incremental.update(&b);

            let mut whole = a.clone();
            whole.extend_from_slice(&b);

            prop_assert_eq!(incremental.finish(), crc8(&whole));
        }

        #[test]
        fn deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(crc8(&bytes), crc8(&bytes));
        }
    }
}
