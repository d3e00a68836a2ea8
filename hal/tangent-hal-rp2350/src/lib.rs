//! RP2350-specific HAL for the Tangent display stack
//!
//! Implements the `tangent-hal` traits on top of embassy-rp:
//! - Blocking SPI ports for the panel and touch buses
//! - GPIO output lines (DC, RST, CS, backlight)
//! - GPIO input lines with edge wait (touch interrupt)

#![no_std]

pub mod gpio;
pub mod spi;

pub use gpio::{InputLine, OutputLine};
pub use spi::SpiPort;
