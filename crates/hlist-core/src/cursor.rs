#![forbid(unsafe_code)]

//! Mouse cursor shapes.

/// The mouse cursor a cell asks the host to display while hovered.
///
/// The host maps each variant onto its native cursor set; unknown shapes
/// should fall back to [`CursorKind::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorKind {
    /// The platform's normal arrow.
    #[default]
    Default,
    /// Pointing hand, for clickable content.
    Pointer,
    /// Text insertion beam.
    Text,
    /// Open hand, for draggable content.
    Grab,
    /// Closed hand, while dragging.
    Grabbing,
    /// Horizontal resize arrows.
    ResizeHorizontal,
    /// Operation not permitted.
    NotAllowed,
    /// No cursor.
    Hidden,
}

impl CursorKind {
    /// Whether the cursor suggests the content can be dragged.
    #[must_use]
    pub const fn is_drag_hint(self) -> bool {
        matches!(self, Self::Grab | Self::Grabbing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_arrow() {
        assert_eq!(CursorKind::default(), CursorKind::Default);
    }

    #[test]
    fn drag_hints() {
        assert!(CursorKind::Grab.is_drag_hint());
        assert!(CursorKind::Grabbing.is_drag_hint());
        assert!(!CursorKind::Pointer.is_drag_hint());
    }
}
