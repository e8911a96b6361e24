#![forbid(unsafe_code)]

//! Colours and outline used when painting the list box.
//!
//! The theme is a read-only snapshot handed to the list; the list never
//! looks colours up anywhere else. Replace it wholesale with
//! [`HorizontalListBox::set_theme`](crate::HorizontalListBox::set_theme).

use hlist_render::PackedRgba;

/// Paint parameters for a list box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListTheme {
    /// Fill behind the columns.
    pub background: PackedRgba,
    /// Outline around the whole list.
    pub outline: PackedRgba,
    /// Outline thickness in pixels. The viewport is inset by this much on
    /// every side.
    pub outline_thickness: u32,
    /// Opacity of drag images, in `[0, 1]` (default: 0.6).
    pub snapshot_opacity: f32,
}

impl Default for ListTheme {
    fn default() -> Self {
        Self {
            background: PackedRgba::WHITE,
            outline: PackedRgba::rgb(128, 128, 128),
            outline_thickness: 0,
            snapshot_opacity: 0.6,
        }
    }
}

impl ListTheme {
    #[must_use]
    pub fn with_background(mut self, color: PackedRgba) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn with_outline(mut self, color: PackedRgba, thickness: u32) -> Self {
        self.outline = color;
        self.outline_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_snapshot_opacity(mut self, opacity: f32) -> Self {
        self.snapshot_opacity = opacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let theme = ListTheme::default();
        assert_eq!(theme.background, PackedRgba::WHITE);
        assert_eq!(theme.outline_thickness, 0);
        assert!((theme.snapshot_opacity - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn builders_set_every_painted_field() {
        let theme = ListTheme::default()
            .with_background(PackedRgba::BLACK)
            .with_outline(PackedRgba::WHITE, 3)
            .with_snapshot_opacity(0.25);
        assert_eq!(
            theme,
            ListTheme {
                background: PackedRgba::BLACK,
                outline: PackedRgba::WHITE,
                outline_thickness: 3,
                snapshot_opacity: 0.25,
            }
        );
    }
}
