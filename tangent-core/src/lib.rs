//! Board-agnostic core for the Tangent display stack
//!
//! Everything in this crate is pure data and arithmetic: pixel buffers,
//! dirty-region tracking, RGB565 color handling, the 8x8 bitmap font,
//! touch noise filtering and calibration. No I/O happens here; the
//! drivers in `tangent-drivers` combine these pieces with the bus traits
//! from `tangent-hal`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod calibration;
pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod touch;

// Re-export key types
pub use calibration::{apply_calibration, CalibrationConfig, RAW_MAX};
pub use config::DisplayConfig;
pub use error::DisplayError;
pub use filter::NoiseFilter;
pub use framebuffer::FrameBuffer;
pub use geometry::{DirtyRegion, Geometry, Rect, Rotation};
pub use touch::{TouchPoint, TouchSample};
