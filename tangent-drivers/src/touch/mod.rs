//! Touch controller drivers

pub mod xpt2046;

pub use xpt2046::{AcquisitionCycle, Xpt2046, PRESSURE_THRESHOLD, SAMPLES_PER_CYCLE};
