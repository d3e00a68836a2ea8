//! Lock-guarded drawing and refresh API

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::delay::DelayNs;

use tangent_core::error::DisplayError;
use tangent_core::geometry::{Geometry, Rotation};
use tangent_drivers::panel::Ili9486;
use tangent_hal::{OutputPin, SpiBus};

/// Concurrent-safe display handle
///
/// Owns the panel driver behind a single mutual-exclusion lock scoped
/// to this instance. Drawing, `refresh` and `refresh_rect` each acquire
/// the lock for their full duration; on single-display hardware the bus
/// is the throughput bound, not this lock.
pub struct Display<'b, M: RawMutex, SPI, DC, RST> {
    panel: Mutex<M, RefCell<Ili9486<'b, SPI, DC, RST>>>,
}

impl<'b, M, SPI, DC, RST> Display<'b, M, SPI, DC, RST>
where
    M: RawMutex,
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Wrap a constructed panel driver
    pub fn new(panel: Ili9486<'b, SPI, DC, RST>) -> Self {
        Self {
            panel: Mutex::new(RefCell::new(panel)),
        }
    }

    /// Reset and configure the panel hardware
    pub fn init(&self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().init(delay))
    }

    /// Current logical geometry
    pub fn geometry(&self) -> Geometry {
        self.panel.lock(|p| p.borrow().geometry())
    }

    /// Current width in pixels
    pub fn width(&self) -> u16 {
        self.geometry().width
    }

    /// Current height in pixels
    pub fn height(&self) -> u16 {
        self.geometry().height
    }

    /// Overwrite every pixel in the write buffer
    pub fn clear(&self, color: u16) {
        self.panel.lock(|p| p.borrow_mut().clear(color));
    }

    /// Write a single pixel
    pub fn set_pixel(&self, x: i32, y: i32, color: u16) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().set_pixel(x, y, color))
    }

    /// Read a pixel from the active write buffer
    pub fn get_pixel(&self, x: i32, y: i32) -> u16 {
        self.panel.lock(|p| p.borrow().get_pixel(x, y))
    }

    /// Fill a rectangle, clipped to screen bounds
    pub fn fill_rect(&self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        self.panel.lock(|p| p.borrow_mut().fill_rect(x, y, w, h, color));
    }

    /// Draw a line between two points
    pub fn draw_line(&self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        self.panel
            .lock(|p| p.borrow_mut().draw_line(x0, y0, x1, y1, color));
    }

    /// Draw a circle outline
    pub fn draw_circle(&self, cx: i32, cy: i32, radius: i32, color: u16) {
        self.panel
            .lock(|p| p.borrow_mut().draw_circle(cx, cy, radius, color));
    }

    /// Draw text with the fixed 8x8 font
    pub fn draw_text(&self, x: i32, y: i32, text: &str, color: u16) {
        self.panel.lock(|p| p.borrow_mut().draw_text(x, y, text, color));
    }

    /// Blit an external RGB565 buffer into the write buffer
    pub fn copy_rect(&self, src: &[u16], x: i32, y: i32, w: i32, h: i32) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().copy_rect(src, x, y, w, h))
    }

    /// Transfer pending changes to the panel
    pub fn refresh(&self) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().refresh())
    }

    /// Force a transfer of an explicit rectangle
    pub fn refresh_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().refresh_rect(x, y, w, h))
    }

    /// Change rotation; callers redraw afterwards
    pub fn set_rotation(&self, rotation: Rotation) -> Result<(), DisplayError> {
        self.panel.lock(|p| p.borrow_mut().set_rotation(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::vec;
    use tangent_core::color;
    use tangent_core::config::DisplayConfig;
    use tangent_core::geometry::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    struct OkSpi;

    impl SpiBus for OkSpi {
        type Error = ();

        fn write(&mut self, _data: &[u8]) -> Result<(), ()> {
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], _write: &[u8]) -> Result<(), ()> {
            read.fill(0);
            Ok(())
        }
    }

    struct NoPin;

    impl OutputPin for NoPin {
        fn set_high(&mut self) {}
        fn set_low(&mut self) {}
    }

    #[test]
    fn test_facade_serializes_draw_and_read() {
        let mut front = vec![0u16; DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize];
        let config = DisplayConfig {
            double_buffer: false,
            ..Default::default()
        };
        let panel = Ili9486::new(OkSpi, NoPin, NoPin, &mut front, None, &config).unwrap();
        let display: Display<'_, NoopRawMutex, _, _, _> = Display::new(panel);

        display.clear(color::BLACK);
        display.fill_rect(5, 5, 10, 10, color::GREEN);
        assert_eq!(display.get_pixel(5, 5), color::GREEN);
        assert_eq!(display.get_pixel(4, 5), color::BLACK);

        assert_eq!(
            display.set_pixel(-1, 0, color::RED),
            Err(DisplayError::OutOfBounds)
        );

        display.refresh().unwrap();
        // Dirty region drained: a second refresh is a no-op.
        display.refresh().unwrap();
    }

    #[test]
    fn test_facade_rotation_swaps_dimensions() {
        let mut front = vec![0u16; DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize];
        let config = DisplayConfig {
            double_buffer: false,
            ..Default::default()
        };
        let panel = Ili9486::new(OkSpi, NoPin, NoPin, &mut front, None, &config).unwrap();
        let display: Display<'_, NoopRawMutex, _, _, _> = Display::new(panel);

        assert_eq!((display.width(), display.height()), (320, 480));
        display.set_rotation(Rotation::Deg90).unwrap();
        assert_eq!((display.width(), display.height()), (480, 320));
    }
}
