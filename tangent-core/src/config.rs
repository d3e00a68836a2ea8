//! Display configuration record

use crate::geometry::Rotation;

/// Configuration supplied at display initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Panel SPI clock in Hz
    pub spi_speed: u32,
    /// Panel SPI mode (0-3)
    pub spi_mode: u8,
    /// Initial rotation
    pub rotation: Rotation,
    /// Maintain separate draw and transmit buffers
    pub double_buffer: bool,
    /// Target refresh rate hint in Hz (not enforced by the driver)
    pub refresh_rate: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spi_speed: 80_000_000,
            spi_mode: 0,
            rotation: Rotation::Deg0,
            double_buffer: true,
            refresh_rate: 60,
        }
    }
}
