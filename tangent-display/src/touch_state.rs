//! Shared touch state
//!
//! The sampling loop publishes here; application reads copy out. The
//! lock is held only for the copy in either direction, independent of
//! the display lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use tangent_core::calibration::CalibrationConfig;
use tangent_core::touch::TouchPoint;

struct TouchChannel {
    point: TouchPoint,
    calibration: CalibrationConfig,
    touch_count: u32,
}

/// Latest calibrated touch state plus the active calibration
///
/// Writes come exclusively from the touch sampling loop; everyone else
/// gets copies. A display without a working touch front end simply
/// never publishes, and reads report the default not-pressed state
/// (degraded display-only operation).
pub struct TouchShared<M: RawMutex> {
    inner: Mutex<M, RefCell<TouchChannel>>,
}

impl<M: RawMutex> TouchShared<M> {
    /// Create with default calibration and no touch recorded
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(TouchChannel {
                point: TouchPoint {
                    x: 0,
                    y: 0,
                    pressed: false,
                    timestamp_ms: 0,
                },
                calibration: CalibrationConfig::new(),
                touch_count: 0,
            })),
        }
    }

    /// Copy out the latest touch point
    pub fn read_touch(&self) -> TouchPoint {
        self.inner.lock(|c| c.borrow().point)
    }

    /// Whether the panel is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.inner.lock(|c| c.borrow().point.pressed)
    }

    /// Number of accepted acquisition cycles since startup
    pub fn touch_count(&self) -> u32 {
        self.inner.lock(|c| c.borrow().touch_count)
    }

    /// Replace the calibration used for subsequent cycles
    pub fn set_calibration(&self, calibration: CalibrationConfig) {
        self.inner.lock(|c| c.borrow_mut().calibration = calibration);
    }

    /// Copy of the active calibration
    pub fn calibration(&self) -> CalibrationConfig {
        self.inner.lock(|c| c.borrow().calibration)
    }

    /// Publish a new calibrated point (sampling loop only)
    pub fn publish(&self, x: u16, y: u16, timestamp_ms: u64) {
        self.inner.lock(|c| {
            let mut channel = c.borrow_mut();
            channel.point = TouchPoint {
                x,
                y,
                pressed: true,
                timestamp_ms,
            };
            channel.touch_count += 1;
        });
    }

    /// Mark the touch released (sampling loop only)
    pub fn release_touch(&self) {
        self.inner.lock(|c| c.borrow_mut().point.pressed = false);
    }
}

impl<M: RawMutex> Default for TouchShared<M> {
    fn default() -> Self {
        Self::new()
    }
}
