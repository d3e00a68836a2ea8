//! Touch data types

/// One raw acquisition triple from the analog front end
///
/// Transient: produced per sampling cycle, consumed by the filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Raw X channel reading (12-bit)
    pub x: u16,
    /// Raw Y channel reading (12-bit)
    pub y: u16,
    /// Computed pressure value (can be negative for open readings)
    pub pressure: i32,
}

/// Calibrated touch state as seen by application code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Screen X coordinate
    pub x: u16,
    /// Screen Y coordinate
    pub y: u16,
    /// Whether the panel is currently pressed
    pub pressed: bool,
    /// Milliseconds timestamp of the last accepted sample
    pub timestamp_ms: u64,
}
