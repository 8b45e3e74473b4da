//! Acknowledgement replies
//!
//! The controller answers every complete frame with an unframed ASCII line
//! on the same link: `OK\n` when the checksum matched, `ERR\n` otherwise.

use heapless::Vec;

const REPLY_OK: &[u8] = b"OK\n";
const REPLY_ERR: &[u8] = b"ERR\n";

/// Longest line the reply parser buffers (without the newline)
const MAX_LINE_LEN: usize = 8;

/// Reply to a received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Frame checksum matched
    Ok,
    /// Frame checksum mismatch
    Err,
}

impl Reply {
    /// Wire representation of the reply
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Reply::Ok => REPLY_OK,
            Reply::Err => REPLY_ERR,
        }
    }
}

/// Errors reported by [`ReplyParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// A complete line that is neither `OK` nor `ERR`
    Unrecognized,
    /// Line longer than any valid reply; discarded up to the next newline
    LineTooLong,
}

/// Line parser for the reply stream, for host-side tools and tests
#[derive(Debug, Clone, Default)]
pub struct ReplyParser {
    line: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl ReplyParser {
    /// Create a new reply parser
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(reply))` at the end of a recognized line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Reply>, ReplyError> {
        if byte != b'\n' {
            if self.line.push(byte).is_err() {
                self.overflowed = true;
            }
            return Ok(None);
        }

        let overflowed = core::mem::replace(&mut self.overflowed, false);
        let line = trim_cr(&self.line);
        let reply = match line {
            _ if overflowed => Err(ReplyError::LineTooLong),
            b"OK" => Ok(Some(Reply::Ok)),
            b"ERR" => Ok(Some(Reply::Err)),
            _ => Err(ReplyError::Unrecognized),
        };
        self.line.clear();
        reply
    }
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
