//! XPT2046 resistive touch controller front end
//!
//! The XPT2046 is a 4-wire resistive touch screen controller with a
//! 12-bit ADC, addressed over SPI with a dedicated chip-select line.
//!
//! # Protocol
//!
//! Each channel read is a 3-byte full-duplex exchange: a control byte
//! (start bit | channel select) followed by two clocking bytes. The
//! 12-bit result straddles the response:
//!
//! ```text
//! result = ((rx[1] & 0x7F) << 5) | (rx[2] >> 3)
//! ```
//!
//! Acquisition runs at high frequency while the panel is pressed, so a
//! transient bus fault yields a sentinel `None` reading that the cycle
//! skips rather than an error that would tear down the sampling loop.

use heapless::Vec;

use tangent_core::filter::median;
use tangent_core::touch::TouchSample;
use tangent_hal::{OutputPin, SpiBus};

/// Control byte fields
#[allow(dead_code)]
pub mod cmd {
    /// Start bit, set on every control byte
    pub const START: u8 = 0x80;
    /// Measure X position
    pub const MEASURE_X: u8 = 0x50;
    /// Measure Y position
    pub const MEASURE_Y: u8 = 0x10;
    /// Measure Z1 (pressure)
    pub const MEASURE_Z1: u8 = 0x30;
    /// Measure Z2 (pressure)
    pub const MEASURE_Z2: u8 = 0x40;
    /// Temperature 0
    pub const TEMP0: u8 = 0x00;
    /// Temperature 1
    pub const TEMP1: u8 = 0x70;
    /// Battery voltage
    pub const VBAT: u8 = 0x20;
    /// Auxiliary voltage
    pub const VAUX: u8 = 0x60;
}

/// Triples attempted per acquisition cycle
pub const SAMPLES_PER_CYCLE: usize = 5;

/// Minimum pressure for a triple to be accepted
pub const PRESSURE_THRESHOLD: i32 = 400;

/// XPT2046 driver
///
/// Generic over the SPI bus and the chip-select output pin. The CS line
/// is toggled around every transfer because the touch controller shares
/// its bus wiring with other devices on some boards.
pub struct Xpt2046<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Xpt2046<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver; the chip-select line is parked high
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high();
        Self { spi, cs }
    }

    /// Release the bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Read one ADC channel
    ///
    /// Returns `None` on a bus fault; the chip-select line is released
    /// either way.
    pub fn read_channel(&mut self, channel: u8) -> Option<u16> {
        let tx = [cmd::START | channel, 0x00, 0x00];
        let mut rx = [0u8; 3];

        self.cs.set_low();
        let result = self.spi.transfer(&mut rx, &tx);
        self.cs.set_high();

        result.ok()?;
        Some((((rx[1] & 0x7F) as u16) << 5) | ((rx[2] >> 3) as u16))
    }

    /// Raw X position
    pub fn read_raw_x(&mut self) -> Option<u16> {
        self.read_channel(cmd::MEASURE_X)
    }

    /// Raw Y position
    pub fn read_raw_y(&mut self) -> Option<u16> {
        self.read_channel(cmd::MEASURE_Y)
    }

    /// Touch pressure from the two Z channels
    ///
    /// `(z2 - z1) * 1000 / z1` per the datasheet; a zero Z1 reads as
    /// zero pressure rather than dividing by zero.
    pub fn read_pressure(&mut self) -> Option<i32> {
        let z1 = self.read_channel(cmd::MEASURE_Z1)? as i32;
        let z2 = self.read_channel(cmd::MEASURE_Z2)? as i32;

        if z1 == 0 {
            return Some(0);
        }
        Some((z2 - z1) * 1000 / z1)
    }

    /// Read one (x, y, pressure) triple
    pub fn sample_once(&mut self) -> Option<TouchSample> {
        let x = self.read_raw_x()?;
        let y = self.read_raw_y()?;
        let pressure = self.read_pressure()?;
        Some(TouchSample { x, y, pressure })
    }
}

/// Accumulator for one multi-sample acquisition cycle
///
/// Collects up to [`SAMPLES_PER_CYCLE`] triples, discarding any with a
/// zeroed coordinate or pressure at or below the threshold. The cycle
/// concludes with the per-axis median of the accepted raw values, or
/// "no touch" when nothing passed the gate.
#[derive(Debug, Default)]
pub struct AcquisitionCycle {
    xs: Vec<u16, SAMPLES_PER_CYCLE>,
    ys: Vec<u16, SAMPLES_PER_CYCLE>,
}

impl AcquisitionCycle {
    /// Start an empty cycle
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample, keeping it only if it passes the pressure gate
    pub fn feed(&mut self, sample: TouchSample) {
        if sample.x == 0 || sample.y == 0 || sample.pressure <= PRESSURE_THRESHOLD {
            return;
        }
        let _ = self.xs.push(sample.x);
        let _ = self.ys.push(sample.y);
    }

    /// Number of accepted triples so far
    pub fn accepted(&self) -> usize {
        self.xs.len()
    }

    /// Conclude the cycle with the median accepted raw point
    pub fn finish(mut self) -> Option<(u16, u16)> {
        if self.xs.is_empty() {
            return None;
        }
        Some((median(&mut self.xs), median(&mut self.ys)))
    }
}
