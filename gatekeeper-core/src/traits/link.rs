//! Serial link to the host

/// Errors from a link transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Transmission did not complete within the link timeout
    Timeout,
    /// Transmit path busy, bytes not accepted
    Busy,
}

/// Transmit side of the point-to-point link
pub trait Link {
    /// Send bytes to the host
    ///
    /// Waits at most the link timeout. Callers treat failures as best
    /// effort and never retry.
    fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError>;
}
