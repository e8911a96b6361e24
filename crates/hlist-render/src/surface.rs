#![forbid(unsafe_code)]

//! The paint-context abstraction.
//!
//! A [`Surface`] is whatever the host draws into: a window backbuffer, a
//! GPU texture, or an off-screen [`PixelBuffer`](crate::PixelBuffer). The
//! list box never draws cell pixels itself; it hands a surface sized to the
//! cell to the data source and lets it paint.
//!
//! Coordinates are local to the surface. Drawing outside `bounds()` is
//! clipped silently.

use crate::color::PackedRgba;
use hlist_core::geometry::Rect;

/// A 2D paint target.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Composite a single pixel (source-over). Out-of-bounds writes are ignored.
    fn blend_pixel(&mut self, x: i32, y: i32, color: PackedRgba);

    /// The surface rectangle in its own coordinates.
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::from_size(width, height)
    }

    /// Fill a rectangle, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        let Some(clipped) = rect.intersection_opt(&self.bounds()) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Fill the whole surface.
    fn fill_all(&mut self, color: PackedRgba) {
        let bounds = self.bounds();
        self.fill_rect(bounds, color);
    }

    /// Draw a rectangle outline of the given thickness, inside `rect`.
    fn draw_outline(&mut self, rect: Rect, thickness: u32, color: PackedRgba) {
        if thickness == 0 || rect.is_empty() {
            return;
        }
        let t = thickness.min(rect.width).min(rect.height);
        let ti = t as i32;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(
            Rect::new(rect.x, rect.bottom() - ti, rect.width, t),
            color,
        );
        let side_height = rect.height.saturating_sub(2 * t);
        self.fill_rect(Rect::new(rect.x, rect.y + ti, t, side_height), color);
        self.fill_rect(
            Rect::new(rect.right() - ti, rect.y + ti, t, side_height),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelBuffer;

    #[test]
    fn fill_rect_is_clipped() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(Rect::new(-2, -2, 4, 4), PackedRgba::WHITE);
        assert_eq!(buf.get(0, 0), Some(PackedRgba::WHITE));
        assert_eq!(buf.get(1, 1), Some(PackedRgba::WHITE));
        assert_eq!(buf.get(2, 2), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn outline_leaves_interior() {
        let mut buf = PixelBuffer::new(5, 5);
        buf.draw_outline(buf.bounds(), 1, PackedRgba::BLACK);
        assert_eq!(buf.get(0, 0), Some(PackedRgba::BLACK));
        assert_eq!(buf.get(4, 4), Some(PackedRgba::BLACK));
        assert_eq!(buf.get(0, 2), Some(PackedRgba::BLACK));
        assert_eq!(buf.get(4, 2), Some(PackedRgba::BLACK));
        assert_eq!(buf.get(2, 2), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn zero_thickness_outline_is_noop() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.draw_outline(buf.bounds(), 0, PackedRgba::BLACK);
        assert!(buf.pixels().iter().all(|p| *p == PackedRgba::TRANSPARENT));
    }
}
