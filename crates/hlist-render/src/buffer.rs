#![forbid(unsafe_code)]

//! Off-screen pixel buffer.
//!
//! `PixelBuffer` is a row-major grid of [`PackedRgba`] pixels. It starts
//! fully transparent, implements [`Surface`] so data sources can paint into
//! it exactly as they paint on screen, and can be composited onto another
//! buffer with an extra opacity factor. The list box uses it to build drag
//! images from the cells currently on screen.

use crate::color::PackedRgba;
use crate::surface::Surface;
use hlist_core::geometry::Rect;

/// A 2D grid of RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl PixelBuffer {
    /// Create a transparent buffer of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![PackedRgba::TRANSPARENT; len],
        }
    }

    /// Buffer width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the buffer has no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw pixel storage, row-major.
    #[inline]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite the pixel at `(x, y)` without blending.
    pub fn set(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite `src` onto this buffer with its top-left at `(dx, dy)`,
    /// scaling every source pixel's alpha by `opacity`.
    ///
    /// Source pixels that land outside this buffer are dropped.
    pub fn composite(&mut self, src: &PixelBuffer, dx: i32, dy: i32, opacity: f32) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "pixel_buffer.composite",
            src_width = src.width,
            src_height = src.height,
            dx,
            dy,
            opacity
        );
        let target = Rect::new(dx, dy, src.width, src.height);
        let Some(clipped) = target.intersection_opt(&self.bounds()) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                if let Some(pixel) = src.get(x - dx, y - dy) {
                    self.blend_pixel(x, y, pixel.with_opacity(opacity));
                }
            }
        }
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }
}
