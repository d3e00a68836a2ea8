//! Tangent - SPI TFT panel and resistive touch firmware
//!
//! Main firmware binary for RP2350-based control panels: an ILI9486
//! 320x480 TFT on SPI0 and an XPT2046 resistive touch controller on
//! SPI1 with a dedicated pen interrupt line.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::{Delay, Timer};
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use tangent_core::config::DisplayConfig;
use tangent_core::geometry::{Geometry, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use tangent_display::{Display, TouchSampler};
use tangent_drivers::panel::Ili9486;
use tangent_drivers::touch::Xpt2046;
use tangent_hal::{Mode, SpiConfig};
use tangent_hal_rp2350::gpio::{InputLine, OutputLine};
use tangent_hal_rp2350::spi::{spi_config, SpiPort};

mod channels;
mod tasks;

/// Touch controller SPI clock (the XPT2046 tops out around 2.5 MHz)
const TOUCH_SPI_HZ: u32 = 2_000_000;

const PIXEL_COUNT: usize = DISPLAY_WIDTH as usize * DISPLAY_HEIGHT as usize;

// Frame storage must live forever for the task references and is far
// too large to pass through the stack. One full frame is 300 KiB;
// RP2350 RAM fits it once but not twice, so the panel runs
// single-buffered here.
static FRAME: ConstStaticCell<[u16; PIXEL_COUNT]> = ConstStaticCell::new([0; PIXEL_COUNT]);
static DISPLAY: StaticCell<tasks::PanelDisplay> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tangent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = DisplayConfig {
        // RP2350 SPI taps out at sysclk/2; 62.5 MHz is the practical
        // ceiling for the panel.
        spi_speed: 62_500_000,
        double_buffer: false,
        ..Default::default()
    };

    // Panel on SPI0, transmit only
    let panel_spi_config = spi_config(&SpiConfig {
        frequency: config.spi_speed,
        mode: Mode::from_number(config.spi_mode),
    });
    let panel_spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, panel_spi_config);
    let panel_spi = SpiPort::new(panel_spi);

    let dc = OutputLine::new(Output::new(p.PIN_20, Level::Low));
    let rst = OutputLine::new(Output::new(p.PIN_21, Level::High));

    // The panel is the only device on SPI0: keep its select asserted
    let _panel_cs = Output::new(p.PIN_17, Level::Low);
    let _backlight = Output::new(p.PIN_22, Level::High);

    let frame = FRAME.take();
    let panel = unwrap!(Ili9486::new(panel_spi, dc, rst, frame, None, &config));
    let display = DISPLAY.init(Display::new(panel));

    if display.init(&mut Delay).is_err() {
        error!("Panel initialization failed");
    } else {
        info!("Panel initialized");
    }

    // Touch controller on SPI1, full duplex
    let touch_spi_config = spi_config(&SpiConfig {
        frequency: TOUCH_SPI_HZ,
        mode: Mode::Mode0,
    });
    let touch_spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_spi_config);
    let touch_cs = OutputLine::new(Output::new(p.PIN_13, Level::High));
    let frontend = Xpt2046::new(SpiPort::new(touch_spi), touch_cs);

    // Pen interrupt: low while touched, falling edge on pen down
    let irq = InputLine::new(Input::new(p.PIN_14, Pull::Up));

    let sampler = TouchSampler::new(Geometry::for_rotation(config.rotation));

    unwrap!(spawner.spawn(tasks::touch_task(
        frontend,
        irq,
        &channels::TOUCH_STATE,
        &channels::TOUCH_STOP,
        sampler,
    )));
    let frame_ms = 1000 / config.refresh_rate.max(1) as u64;
    unwrap!(spawner.spawn(tasks::ui_task(display, &channels::TOUCH_STATE, frame_ms)));

    info!("All tasks spawned, firmware running");

    // All work happens in the spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
