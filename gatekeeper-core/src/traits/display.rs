//! Status display trait

/// Text display showing one status message at a time
pub trait Display {
    /// Replace the shown text
    ///
    /// Text wider than the display is the implementation's concern
    /// (truncated or wrapped as it sees fit).
    fn show(&mut self, text: &str);
}
