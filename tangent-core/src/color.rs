//! RGB565 color handling
//!
//! Colors are stored as 16-bit packed values: 5 bits red, 6 bits green,
//! 5 bits blue. Conversion to and from 8-bit-per-channel RGB is lossy
//! only in the bit-depth-reduction direction.

/// Black (all channels zero)
pub const BLACK: u16 = 0x0000;
/// White (all channels full)
pub const WHITE: u16 = 0xFFFF;
/// Pure red
pub const RED: u16 = 0xF800;
/// Pure green
pub const GREEN: u16 = 0x07E0;
/// Pure blue
pub const BLUE: u16 = 0x001F;
/// Yellow (red + green)
pub const YELLOW: u16 = 0xFFE0;
/// Cyan (green + blue)
pub const CYAN: u16 = 0x07FF;
/// Magenta (red + blue)
pub const MAGENTA: u16 = 0xF81F;

/// Pack 8-bit RGB channels into an RGB565 value
///
/// The low 3/2/3 bits of each channel are discarded.
pub const fn rgb_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

/// Unpack an RGB565 value into 8-bit RGB channels
///
/// Channels are shifted up to their 8-bit position; the low bits are
/// zero. Exact inverse of [`rgb_to_rgb565`] for channel values that are
/// multiples of 8 (red, blue) or 4 (green).
pub const fn rgb565_to_rgb(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 11) as u8) << 3;
    let g = (((color >> 5) & 0x3F) as u8) << 2;
    let b = ((color & 0x1F) as u8) << 3;
    (r, g, b)
}
