//! Polyline decoding errors.

/// The encoded string is not a valid polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// Input ended while a group still had its continuation bit set.
    #[error("polyline truncated mid-value at index {index}")]
    Truncated { index: usize },

    /// A byte outside the printable range `'?'..='~'`.
    #[error("invalid polyline character {byte:#04x} at index {index}")]
    InvalidCharacter { index: usize, byte: u8 },

    /// A single value spans more groups than a 32-bit delta can need.
    #[error("polyline value starting at index {index} is too long")]
    Overflow { index: usize },
}
