//! Off-screen pixel buffer
//!
//! A `FrameBuffer` is a dense row-major slice of RGB565 values with a
//! fixed geometry. The buffer storage is supplied by the caller (a
//! `StaticCell` on target, a plain array in tests) so the same type works
//! on the heap-less firmware and on the host.
//!
//! Coordinates here are unsigned and assumed in bounds; bounds checking
//! and dirty-region accounting live in the panel driver.

use crate::error::DisplayError;
use crate::geometry::{ClippedRect, Geometry, Rect};

/// Row-major RGB565 pixel buffer
pub struct FrameBuffer<'b> {
    pixels: &'b mut [u16],
    geometry: Geometry,
}

impl<'b> FrameBuffer<'b> {
    /// Wrap a pixel slice
    ///
    /// The slice length must match `geometry.pixel_count()` exactly.
    pub fn new(pixels: &'b mut [u16], geometry: Geometry) -> Result<Self, DisplayError> {
        if pixels.len() != geometry.pixel_count() {
            return Err(DisplayError::BufferSize);
        }
        Ok(Self { pixels, geometry })
    }

    /// Buffer geometry
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Reinterpret the buffer under a new geometry
    ///
    /// Used on rotation changes; the pixel count must stay the same.
    /// Contents are not reflowed.
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), DisplayError> {
        if self.pixels.len() != geometry.pixel_count() {
            return Err(DisplayError::BufferSize);
        }
        self.geometry = geometry;
        Ok(())
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    /// Write a single pixel (coordinates must be in bounds)
    pub fn set(&mut self, x: u16, y: u16, color: u16) {
        debug_assert!(self.geometry.contains(x as i32, y as i32));
        let idx = y as usize * self.geometry.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Read a single pixel (coordinates must be in bounds)
    pub fn get(&self, x: u16, y: u16) -> u16 {
        debug_assert!(self.geometry.contains(x as i32, y as i32));
        let idx = y as usize * self.geometry.width as usize + x as usize;
        self.pixels[idx]
    }

    /// Fill a clipped rectangle with `color`
    pub fn fill_rect(&mut self, rect: ClippedRect, color: u16) {
        let width = self.geometry.width as usize;
        for row in rect.y..=rect.y_max() {
            let start = row as usize * width + rect.x as usize;
            self.pixels[start..start + rect.w as usize].fill(color);
        }
    }

    /// Blit an external row-major buffer into the frame buffer
    ///
    /// `src` holds `rect.w * rect.h` pixels. The rectangle is clipped
    /// against the geometry; rows and columns that fall off screen are
    /// dropped from the source as well. Returns the written region, or
    /// `None` when nothing was visible.
    pub fn blit(&mut self, src: &[u16], rect: Rect) -> Option<ClippedRect> {
        let clipped = rect.clip(self.geometry)?;
        debug_assert!(src.len() >= (rect.w * rect.h) as usize);

        let src_stride = rect.w as usize;
        let x_skip = (clipped.x as i32 - rect.x) as usize;
        let y_skip = (clipped.y as i32 - rect.y) as usize;
        let width = self.geometry.width as usize;

        for row in 0..clipped.h as usize {
            let src_start = (y_skip + row) * src_stride + x_skip;
            let dst_start = (clipped.y as usize + row) * width + clipped.x as usize;
            self.pixels[dst_start..dst_start + clipped.w as usize]
                .copy_from_slice(&src[src_start..src_start + clipped.w as usize]);
        }

        Some(clipped)
    }

    /// Borrow a horizontal run of pixels (used by the refresh path)
    pub fn row(&self, y: u16, x: u16, w: u16) -> &[u16] {
        let start = y as usize * self.geometry.width as usize + x as usize;
        &self.pixels[start..start + w as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_8x4(pixels: &mut [u16; 32]) -> FrameBuffer<'_> {
        FrameBuffer::new(pixels, Geometry::new(8, 4)).unwrap()
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut pixels = [0u16; 31];
        assert_eq!(
            FrameBuffer::new(&mut pixels, Geometry::new(8, 4)).err(),
            Some(DisplayError::BufferSize)
        );
    }

    #[test]
    fn test_set_get() {
        let mut pixels = [0u16; 32];
        let mut fb = buffer_8x4(&mut pixels);
        fb.set(3, 2, 0xABCD);
        assert_eq!(fb.get(3, 2), 0xABCD);
        assert_eq!(fb.get(2, 3), 0x0000);
    }

    #[test]
    fn test_fill_rect() {
        let mut pixels = [0u16; 32];
        let mut fb = buffer_8x4(&mut pixels);
        fb.fill_rect(
            ClippedRect {
                x: 1,
                y: 1,
                w: 2,
                h: 2,
            },
            0xFFFF,
        );
        for y in 0..4u16 {
            for x in 0..8u16 {
                let expected = if (1..=2).contains(&x) && (1..=2).contains(&y) {
                    0xFFFF
                } else {
                    0x0000
                };
                assert_eq!(fb.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_blit_clips_source_with_negative_origin() {
        let mut pixels = [0u16; 32];
        let mut fb = buffer_8x4(&mut pixels);

        // 3x3 source, values 1..=9 row-major, placed at (-1, -1):
        // only the bottom-right 2x2 quadrant lands on screen.
        let src = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let written = fb.blit(&src, Rect::new(-1, -1, 3, 3)).unwrap();
        assert_eq!(
            written,
            ClippedRect {
                x: 0,
                y: 0,
                w: 2,
                h: 2,
            }
        );
        assert_eq!(fb.get(0, 0), 5);
        assert_eq!(fb.get(1, 0), 6);
        assert_eq!(fb.get(0, 1), 8);
        assert_eq!(fb.get(1, 1), 9);
    }

    #[test]
    fn test_blit_off_screen_is_none() {
        let mut pixels = [0u16; 32];
        let mut fb = buffer_8x4(&mut pixels);
        let src = [1, 2, 3, 4];
        assert!(fb.blit(&src, Rect::new(8, 0, 2, 2)).is_none());
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_row_access() {
        let mut pixels = [0u16; 32];
        let mut fb = buffer_8x4(&mut pixels);
        fb.set(2, 1, 0x1111);
        fb.set(3, 1, 0x2222);
        assert_eq!(fb.row(1, 2, 2), &[0x1111, 0x2222]);
    }
}
