//! Error types shared across the display stack

/// Errors surfaced by drawing, refresh and construction operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Coordinates outside the current geometry on a write primitive
    OutOfBounds,
    /// The underlying bus transfer failed
    Transport,
    /// A supplied pixel buffer does not match the panel geometry
    BufferSize,
}
