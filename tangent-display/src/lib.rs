//! Display facade and shared touch state
//!
//! This crate ties the drivers together for concurrent use:
//!
//! - [`Display`] wraps the panel driver in a blocking mutex and exposes
//!   the drawing/refresh API; every call holds the lock for its full
//!   duration, including the bus transfer, serializing drawing against
//!   refresh.
//! - [`TouchShared`] holds the latest calibrated touch point and the
//!   calibration config behind an independent lock, so touch reads
//!   never block on a display refresh or vice versa.
//! - [`TouchSampler`] is the filter/calibrate stage the sampling loop
//!   runs between raw acquisition and publication.
//!
//! Both locks are generic over `RawMutex`: the firmware instantiates
//! them with `CriticalSectionRawMutex`, host tests with `NoopRawMutex`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod sampler;
pub mod touch_state;

// Re-export key types
pub use display::Display;
pub use sampler::TouchSampler;
pub use touch_state::TouchShared;
