//! Hardware driver implementations
//!
//! This crate provides the device drivers of the Tangent display stack,
//! written against the traits in `tangent-hal`:
//!
//! - ILI9486 panel controller (pixel buffers, dirty-region tracking,
//!   window-addressed transfers)
//! - XPT2046 resistive touch front end (channel sampling, pressure
//!   gating, acquisition cycles)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod panel;
pub mod touch;
