//! Tangent Hardware Abstraction Layer
//!
//! This crate defines the bus and digital-line traits the display stack
//! is written against, so the same driver code runs on different chips
//! (and against in-memory mocks in host tests).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (tangent-drivers, -display)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tangent-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tangent-hal-  │       │  test mocks   │
//! │    rp2350     │       │  (host only)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - synchronous SPI transfers (panel, touch)
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - control lines
//! - [`gpio::WaitInput`] - edge wait on the touch interrupt line

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin, WaitInput};
pub use spi::{Mode, Phase, Polarity, SpiBus, SpiConfig};
