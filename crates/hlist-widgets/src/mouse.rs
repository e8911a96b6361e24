#![forbid(unsafe_code)]

//! Outcomes of pointer handling.

/// What [`HorizontalListBox::handle_mouse`](crate::HorizontalListBox::handle_mouse) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseResult {
    /// The event was not for the list.
    Ignored,
    /// A column was hit; the selection may or may not have changed.
    Selected(usize),
    /// A column was double-clicked and activated.
    Activated(usize),
    /// The press was on a selected column; selection waits for mouse-up.
    Deferred(usize),
    /// A drag session started.
    DragStarted,
    /// The background (no column) was clicked.
    Background,
    /// The wheel scrolled the list.
    Scrolled,
}

impl MouseResult {
    /// Whether the list consumed the event.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// A pointer event already resolved to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    MouseDown,
    MouseUp,
    DoubleClick,
}
