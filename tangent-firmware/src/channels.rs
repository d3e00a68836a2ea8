//! Shared state and signals between Embassy tasks

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use tangent_display::TouchShared;

/// Latest calibrated touch state, published by the sampling task
pub static TOUCH_STATE: TouchShared<CriticalSectionRawMutex> = TouchShared::new();

/// Ask the touch sampling task to stop
///
/// The task observes this within its bounded interrupt wait and exits
/// its loop, after which the touch handles it owns go quiet.
pub static TOUCH_STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
