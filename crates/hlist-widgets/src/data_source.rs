#![forbid(unsafe_code)]

//! Collaborator traits: where rows come from and where drags go.
//!
//! [`DataSource`] supplies the row count, paints rows, and receives
//! selection and activation notifications. Only [`DataSource::row_count`]
//! and [`DataSource::render_cell`] are required; every notification has an
//! empty default body.
//!
//! [`DragHost`] is the drag-and-drop container the list lives in. A list
//! without one can still select, but never starts a drag.

use hlist_core::cursor::CursorKind;
use hlist_core::event::MouseEvent;
use hlist_render::{PixelBuffer, Surface};

use crate::cell::CellContent;
use crate::selection::SelectionSet;

/// Opaque description of what is being dragged. An empty payload means
/// "these rows cannot be dragged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DragPayload(String);

impl DragPayload {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DragPayload {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DragPayload {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Supplies rows to a [`HorizontalListBox`](crate::HorizontalListBox).
pub trait DataSource {
    /// Number of columns. May change at any time; the list re-reads it on
    /// `update_content`.
    fn row_count(&self) -> usize;

    /// Paint column `index` onto a surface of `width` x `height` pixels.
    fn render_cell(
        &mut self,
        index: usize,
        surface: &mut dyn Surface,
        width: u32,
        height: u32,
        selected: bool,
    );

    /// Cursor to show while hovering column `index`.
    fn cursor_for_row(&self, _index: usize) -> CursorKind {
        CursorKind::Default
    }

    /// Tooltip for column `index`. `None` shows nothing.
    fn tooltip_for_row(&self, _index: usize) -> Option<String> {
        None
    }

    /// Describe a drag of `rows`. `None` or an empty payload prevents the
    /// drag.
    fn drag_payload_for(&self, _rows: &SelectionSet) -> Option<DragPayload> {
        None
    }

    /// The selection changed. `last_selected` is the anchor, if any.
    fn on_selection_changed(&mut self, _last_selected: Option<usize>) {}

    /// Column `index` was activated (double click or Return).
    fn on_activate(&mut self, _index: usize) {}

    /// Delete or Backspace was pressed with `index` as the anchor.
    fn on_delete_requested(&mut self, _index: usize) {}

    /// A mouse-up landed outside every column.
    fn on_background_clicked(&mut self, _event: &MouseEvent) {}

    /// A mouse press or release landed on column `index`, after the
    /// selection was updated.
    fn on_cell_clicked(&mut self, _index: usize, _event: &MouseEvent) {}

    /// The list scrolled.
    fn on_scrolled(&mut self) {}

    /// Build or update embedded content for column `index`.
    ///
    /// `previous` is whatever the cell held before; return it (possibly
    /// updated) to keep it, or `None` to drop it. The default drops it.
    fn refresh_custom_content(
        &mut self,
        _index: usize,
        _selected: bool,
        _previous: Option<Box<dyn CellContent>>,
    ) -> Option<Box<dyn CellContent>> {
        None
    }
}

/// The drag-and-drop container hosting the list.
pub trait DragHost {
    /// Begin a drag session carrying `payload`, showing `image` with its
    /// top-left at `offset` relative to the pointer.
    fn start_dragging(&mut self, payload: DragPayload, image: PixelBuffer, offset: (i32, i32));
}
