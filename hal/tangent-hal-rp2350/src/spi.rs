//! Blocking SPI port over embassy-rp

use embassy_rp::spi::{Blocking, Config, Instance, Phase, Polarity, Spi};

use tangent_hal::SpiConfig;

/// Blocking SPI master implementing `tangent_hal::SpiBus`
pub struct SpiPort<'d, T: Instance> {
    inner: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> SpiPort<'d, T> {
    /// Wrap a configured embassy-rp SPI peripheral
    pub fn new(inner: Spi<'d, T, Blocking>) -> Self {
        Self { inner }
    }
}

/// Translate a HAL-level SPI config into the embassy-rp config
pub fn spi_config(config: &SpiConfig) -> Config {
    let (polarity, phase) = config.mode.into();
    let mut out = Config::default();
    out.frequency = config.frequency;
    out.polarity = match polarity {
        tangent_hal::Polarity::IdleLow => Polarity::IdleLow,
        tangent_hal::Polarity::IdleHigh => Polarity::IdleHigh,
    };
    out.phase = match phase {
        tangent_hal::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
        tangent_hal::Phase::CaptureOnSecondTransition => Phase::CaptureOnSecondTransition,
    };
    out
}

impl<T: Instance> tangent_hal::SpiBus for SpiPort<'_, T> {
    type Error = embassy_rp::spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_transfer(read, write)
    }
}
