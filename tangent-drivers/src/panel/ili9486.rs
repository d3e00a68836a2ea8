//! ILI9486 TFT panel controller driver
//!
//! Owns the pixel buffer(s) and translates buffer writes into the
//! controller's wire protocol over SPI, with a shared data/command (DC)
//! line selecting between the two byte classes.
//!
//! # Window-addressed transfers
//!
//! To push a rectangle, the driver programs an addressing window and
//! streams pixel data into it:
//!
//! - `CASET` with big-endian 16-bit start/end column
//! - `PASET` with big-endian 16-bit start/end row
//! - `RAMWR`, then `w * h` pixels row-major, high byte first
//!
//! Pixel bytes always go out big-endian regardless of host endianness.
//!
//! # Dirty-region tracking
//!
//! Every drawing primitive expands a minimal bounding box over the
//! pixels it wrote. `refresh` transfers exactly that rectangle and
//! clears it; an empty region means nothing is transferred.

use embedded_hal::delay::DelayNs;

use tangent_core::config::DisplayConfig;
use tangent_core::error::DisplayError;
use tangent_core::font;
use tangent_core::framebuffer::FrameBuffer;
use tangent_core::geometry::{ClippedRect, DirtyRegion, Geometry, Rect, Rotation, DISPLAY_HEIGHT};
use tangent_hal::{OutputPin, SpiBus};

/// ILI9486 command bytes
#[allow(dead_code)]
pub mod cmd {
    /// Sleep Out
    pub const SLPOUT: u8 = 0x11;
    /// Display On
    pub const DISPON: u8 = 0x29;
    /// Column Address Set
    pub const CASET: u8 = 0x2A;
    /// Page Address Set
    pub const PASET: u8 = 0x2B;
    /// Memory Write
    pub const RAMWR: u8 = 0x2C;
    /// Memory Read
    pub const RAMRD: u8 = 0x2E;
    /// Memory Access Control
    pub const MADCTL: u8 = 0x36;
    /// Interface Pixel Format
    pub const PIXFMT: u8 = 0x3A;
    /// Frame Rate Control (Normal Mode)
    pub const FRMCTR1: u8 = 0xB1;
    /// Display Function Control
    pub const DFUNCTR: u8 = 0xB6;
    /// Power Control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power Control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM Control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM Control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Positive Gamma Correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative Gamma Correction
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL register bits
#[allow(dead_code)]
mod madctl {
    /// Row Address Order
    pub const MY: u8 = 0x80;
    /// Column Address Order
    pub const MX: u8 = 0x40;
    /// Row/Column Exchange
    pub const MV: u8 = 0x20;
    /// Vertical Refresh Order
    pub const ML: u8 = 0x10;
    /// BGR Order
    pub const BGR: u8 = 0x08;
    /// Horizontal Refresh Order
    pub const MH: u8 = 0x04;
}

/// Positive gamma correction curve
const GAMMA_POSITIVE: [u8; 15] = [
    0x0F, 0x24, 0x1C, 0x0A, 0x0F, 0x08, 0x43, 0x88, 0x32, 0x0F, 0x10, 0x06, 0x0F, 0x07, 0x00,
];

/// Negative gamma correction curve
const GAMMA_NEGATIVE: [u8; 15] = [
    0x0F, 0x38, 0x30, 0x09, 0x0F, 0x0F, 0x4E, 0x77, 0x3C, 0x07, 0x10, 0x05, 0x23, 0x1B, 0x00,
];

/// Scratch capacity: one serialized row at the widest rotation
const ROW_BYTES: usize = DISPLAY_HEIGHT as usize * 2;

/// Which buffer a transfer reads from
#[derive(Clone, Copy)]
enum TransferSource {
    /// The transmit buffer (post-swap content on a refresh)
    Front,
    /// The active write buffer (out-of-band partial updates)
    Draw,
}

/// ILI9486 panel driver
///
/// Generic over the SPI bus and the DC/RST output pins. Pixel storage is
/// supplied by the caller; with double buffering enabled the two buffer
/// identities are swapped (not copied) on refresh.
pub struct Ili9486<'b, SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    front: FrameBuffer<'b>,
    back: Option<FrameBuffer<'b>>,
    dirty: DirtyRegion,
    rotation: Rotation,
    scratch: [u8; ROW_BYTES],
}

impl<'b, SPI, DC, RST> Ili9486<'b, SPI, DC, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver over the given bus, control pins and buffers
    ///
    /// Buffer lengths must match the configured rotation's geometry.
    /// With `config.double_buffer` set, a back buffer is required;
    /// without it, `back` is ignored.
    pub fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        front: &'b mut [u16],
        back: Option<&'b mut [u16]>,
        config: &DisplayConfig,
    ) -> Result<Self, DisplayError> {
        let geometry = Geometry::for_rotation(config.rotation);
        let front = FrameBuffer::new(front, geometry)?;
        let back = if config.double_buffer {
            let pixels = back.ok_or(DisplayError::BufferSize)?;
            Some(FrameBuffer::new(pixels, geometry)?)
        } else {
            None
        };

        Ok(Self {
            spi,
            dc,
            rst,
            front,
            back,
            dirty: DirtyRegion::new(),
            rotation: config.rotation,
            scratch: [0; ROW_BYTES],
        })
    }

    /// Release the bus and control pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    /// Current logical geometry
    pub fn geometry(&self) -> Geometry {
        self.front.geometry()
    }

    /// Current width in pixels
    pub fn width(&self) -> u16 {
        self.geometry().width
    }

    /// Current height in pixels
    pub fn height(&self) -> u16 {
        self.geometry().height
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Whether a separate back buffer is in use
    pub fn is_double_buffered(&self) -> bool {
        self.back.is_some()
    }

    /// Bounds of the pending dirty region, if any
    pub fn dirty_bounds(&self) -> Option<(u16, u16, u16, u16)> {
        self.dirty.bounds()
    }

    /// Hardware reset pulse followed by the configuration sequence
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.reset(delay);
        self.configure(delay)
    }

    /// Pulse the reset line
    pub fn reset(&mut self, delay: &mut impl DelayNs) {
        self.rst.set_low();
        delay.delay_ms(10);
        self.rst.set_high();
        delay.delay_ms(120);
    }

    /// Send the panel configuration sequence and turn the display on
    fn configure(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.write_command(cmd::SLPOUT)?;
        delay.delay_ms(120);

        // 16-bit RGB565 pixel format
        self.command_with_data(cmd::PIXFMT, &[0x55])?;

        self.command_with_data(cmd::PWCTR1, &[0x0F, 0x0F])?;
        self.command_with_data(cmd::PWCTR2, &[0x41])?;
        self.command_with_data(cmd::VMCTR1, &[0x00, 0x35, 0x80])?;
        self.command_with_data(cmd::VMCTR2, &[0x00])?;
        self.command_with_data(cmd::FRMCTR1, &[0x00, 0x1B])?;
        self.command_with_data(cmd::DFUNCTR, &[0x00, 0x02, 0x3B])?;
        self.command_with_data(cmd::GMCTRP1, &GAMMA_POSITIVE)?;
        self.command_with_data(cmd::GMCTRN1, &GAMMA_NEGATIVE)?;

        self.write_madctl(self.rotation)?;

        self.write_command(cmd::DISPON)?;
        delay.delay_ms(100);

        Ok(())
    }

    /// Overwrite every pixel in the write buffer
    pub fn clear(&mut self, color: u16) {
        self.draw_buffer().fill(color);
        let geometry = self.geometry();
        self.dirty.mark_rect(ClippedRect {
            x: 0,
            y: 0,
            w: geometry.width,
            h: geometry.height,
        });
    }

    /// Write a single pixel
    ///
    /// Out-of-range coordinates return `OutOfBounds` without touching
    /// buffer or dirty state.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), DisplayError> {
        if !self.geometry().contains(x, y) {
            return Err(DisplayError::OutOfBounds);
        }
        let (x, y) = (x as u16, y as u16);
        self.draw_buffer().set(x, y, color);
        self.dirty.mark_pixel(x, y);
        Ok(())
    }

    /// Read a pixel from the active write buffer
    ///
    /// Out-of-range coordinates read as 0 (read-only query semantics).
    pub fn get_pixel(&self, x: i32, y: i32) -> u16 {
        if !self.geometry().contains(x, y) {
            return 0;
        }
        self.draw_buffer_ref().get(x as u16, y as u16)
    }

    /// Fill a rectangle, clipped to screen bounds
    ///
    /// A rectangle that clips to nothing is a successful no-op.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let geometry = self.geometry();
        if let Some(rect) = Rect::new(x, y, w, h).clip(geometry) {
            self.draw_buffer().fill_rect(rect, color);
            self.dirty.mark_rect(rect);
        }
    }

    /// Draw a line with integer Bresenham stepping
    ///
    /// Every point goes through `set_pixel`, so dirty tracking and
    /// clipping are automatic; off-screen points are simply dropped.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        let (mut x, mut y) = (x0, y0);
        loop {
            let _ = self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a circle outline with the midpoint algorithm
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u16) {
        let mut x = 0;
        let mut y = radius;
        let mut d = 3 - 2 * radius;

        while y >= x {
            // Eight-way symmetric points
            let _ = self.set_pixel(cx + x, cy + y, color);
            let _ = self.set_pixel(cx - x, cy + y, color);
            let _ = self.set_pixel(cx + x, cy - y, color);
            let _ = self.set_pixel(cx - x, cy - y, color);
            let _ = self.set_pixel(cx + y, cy + x, color);
            let _ = self.set_pixel(cx - y, cy + x, color);
            let _ = self.set_pixel(cx + y, cy - x, color);
            let _ = self.set_pixel(cx - y, cy - x, color);

            x += 1;
            if d > 0 {
                y -= 1;
                d += 4 * (x - y) + 10;
            } else {
                d += 4 * x + 6;
            }
        }
    }

    /// Draw text with the fixed 8x8 font
    ///
    /// Glyphs advance 8 pixels; `\n` returns to the start column and
    /// advances 8 pixels down. Unsupported code points render blank.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u16) {
        let start_x = x;
        let (mut x, mut y) = (x, y);

        for ch in text.chars() {
            if ch == '\n' {
                x = start_x;
                y += font::GLYPH_HEIGHT as i32;
                continue;
            }

            let glyph = font::glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if font::glyph_pixel(bits, col) {
                        let _ = self.set_pixel(x + col as i32, y + row as i32, color);
                    }
                }
            }
            x += font::GLYPH_WIDTH as i32;
        }
    }

    /// Blit an external RGB565 buffer into the write buffer
    ///
    /// `src` holds `w * h` pixels row-major. The rectangle is clipped
    /// like `fill_rect`; off-screen rows and columns are dropped from
    /// the source as well.
    pub fn copy_rect(
        &mut self,
        src: &[u16],
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<(), DisplayError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        if src.len() < w as usize * h as usize {
            return Err(DisplayError::BufferSize);
        }
        if let Some(written) = self.draw_buffer().blit(src, Rect::new(x, y, w, h)) {
            self.dirty.mark_rect(written);
        }
        Ok(())
    }

    /// Transfer pending changes to the panel
    ///
    /// With double buffering the front/back identities are swapped
    /// first, then exactly the dirty rectangle is transferred and the
    /// region cleared. An empty dirty region transfers nothing (and
    /// skips the swap, keeping the buffer roles consistent).
    pub fn refresh(&mut self) -> Result<(), DisplayError> {
        let Some((x_min, y_min, x_max, y_max)) = self.dirty.bounds() else {
            return Ok(());
        };

        if let Some(back) = self.back.as_mut() {
            core::mem::swap(&mut self.front, back);
        }

        let rect = ClippedRect {
            x: x_min,
            y: y_min,
            w: x_max - x_min + 1,
            h: y_max - y_min + 1,
        };
        self.transfer_rect(rect, TransferSource::Front)?;
        self.dirty.clear();
        Ok(())
    }

    /// Force a transfer of an explicit rectangle from the write buffer
    ///
    /// Bypasses dirty tracking in both directions: the region is sent
    /// regardless of pending changes and the dirty region is left
    /// untouched.
    pub fn refresh_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), DisplayError> {
        let geometry = self.geometry();
        if w <= 0
            || h <= 0
            || x < 0
            || y < 0
            || x + w > geometry.width as i32
            || y + h > geometry.height as i32
        {
            return Err(DisplayError::OutOfBounds);
        }

        let rect = ClippedRect {
            x: x as u16,
            y: y as u16,
            w: w as u16,
            h: h as u16,
        };
        self.transfer_rect(rect, TransferSource::Draw)
    }

    /// Change the rotation and reprogram the memory access order
    ///
    /// Buffer contents are not reflowed; callers redraw after rotating.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        let geometry = Geometry::for_rotation(rotation);
        self.front.set_geometry(geometry)?;
        if let Some(back) = self.back.as_mut() {
            back.set_geometry(geometry)?;
        }
        self.rotation = rotation;
        // Stale bounds could reference coordinates outside the new
        // geometry.
        self.dirty.clear();
        self.write_madctl(rotation)
    }

    /// Send a command byte (DC low)
    pub fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.dc.set_low();
        self.spi
            .write(&[command])
            .map_err(|_| DisplayError::Transport)
    }

    /// Send data bytes (DC high)
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high();
        self.spi.write(data).map_err(|_| DisplayError::Transport)
    }

    fn command_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.write_command(command)?;
        self.write_data(data)
    }

    /// Program the addressing window for a rectangle
    fn set_window(&mut self, rect: ClippedRect) -> Result<(), DisplayError> {
        let (x0, x1) = (rect.x, rect.x_max());
        let (y0, y1) = (rect.y, rect.y_max());

        self.write_command(cmd::CASET)?;
        self.write_data(&[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8])?;

        self.write_command(cmd::PASET)?;
        self.write_data(&[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8])?;

        self.write_command(cmd::RAMWR)
    }

    /// Stream a rectangle's pixels through the addressing window
    ///
    /// Rows are serialized big-endian into the scratch buffer one at a
    /// time; the resulting byte stream is identical to one contiguous
    /// write.
    fn transfer_rect(&mut self, rect: ClippedRect, source: TransferSource) -> Result<(), DisplayError> {
        self.set_window(rect)?;
        self.dc.set_high();

        for row in rect.y..=rect.y_max() {
            let buffer = match source {
                TransferSource::Front => &self.front,
                TransferSource::Draw => match &self.back {
                    Some(back) => back,
                    None => &self.front,
                },
            };
            let pixels = buffer.row(row, rect.x, rect.w);
            let byte_count = pixels.len() * 2;
            for (i, &pixel) in pixels.iter().enumerate() {
                self.scratch[2 * i] = (pixel >> 8) as u8;
                self.scratch[2 * i + 1] = pixel as u8;
            }
            self.spi
                .write(&self.scratch[..byte_count])
                .map_err(|_| DisplayError::Transport)?;
        }

        Ok(())
    }

    fn write_madctl(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        let value = madctl::BGR
            | match rotation {
                Rotation::Deg0 => madctl::MX,
                Rotation::Deg90 => madctl::MV,
                Rotation::Deg180 => madctl::MY,
                Rotation::Deg270 => madctl::MX | madctl::MY | madctl::MV,
            };
        self.command_with_data(cmd::MADCTL, &[value])
    }

    fn draw_buffer(&mut self) -> &mut FrameBuffer<'b> {
        match self.back.as_mut() {
            Some(back) => back,
            None => &mut self.front,
        }
    }

    fn draw_buffer_ref(&self) -> &FrameBuffer<'b> {
        match self.back.as_ref() {
            Some(back) => back,
            None => &self.front,
        }
    }
}
