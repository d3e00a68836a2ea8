//! Demo UI task
//!
//! Draws a small touch-test screen: a header, and a trail of dots with
//! a live coordinate readout while the panel is pressed. Mostly here to
//! exercise the drawing and touch APIs end to end on hardware.

use core::fmt::Write;

use defmt::*;
use embassy_rp::peripherals::SPI0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker};

use tangent_core::color;
use tangent_display::{Display, TouchShared};
use tangent_hal_rp2350::gpio::OutputLine;
use tangent_hal_rp2350::spi::SpiPort;

/// Concrete facade type for this board
pub type PanelDisplay = Display<
    'static,
    CriticalSectionRawMutex,
    SpiPort<'static, SPI0>,
    OutputLine<'static>,
    OutputLine<'static>,
>;

/// Demo UI task
///
/// `frame_ms` comes from the configured refresh-rate hint.
#[embassy_executor::task]
pub async fn ui_task(
    display: &'static PanelDisplay,
    touch: &'static TouchShared<CriticalSectionRawMutex>,
    frame_ms: u64,
) {
    info!("UI task started");

    display.clear(color::BLACK);
    display.draw_text(8, 8, "TOUCH TEST", color::WHITE);
    display.draw_line(
        0,
        20,
        display.width() as i32 - 1,
        20,
        color::WHITE,
    );
    if display.refresh().is_err() {
        warn!("Initial refresh failed");
    }

    let mut ticker = Ticker::every(Duration::from_millis(frame_ms));
    loop {
        if touch.is_pressed() {
            let point = touch.read_touch();
            display.draw_circle(point.x as i32, point.y as i32, 2, color::GREEN);

            let mut label: heapless::String<24> = heapless::String::new();
            let _ = write!(label, "X:{} Y:{}", point.x, point.y);
            display.fill_rect(8, 28, 160, 8, color::BLACK);
            display.draw_text(8, 28, &label, color::CYAN);

            if display.refresh().is_err() {
                warn!("Refresh failed");
            }
        }

        ticker.next().await;
    }
}
