#![forbid(unsafe_code)]

//! Pooled cells.
//!
//! A [`Cell`] is a reusable on-screen slot. The viewport rebinds cells to
//! different row indices as the user scrolls, so a cell's identity
//! ([`CellId`]) is stable while its bound row changes.

use std::fmt;

use hlist_core::cursor::CursorKind;
use hlist_core::geometry::Rect;
use hlist_render::Surface;

/// Identity of a pooled cell. Ids are never reused within one list box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u64);

impl CellId {
    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Embedded content a data source places inside a cell, such as a nested
/// control. The list box positions it but never inspects it.
pub trait CellContent {
    /// Place the content within the cell. `bounds` is cell-local.
    fn set_bounds(&mut self, bounds: Rect);

    /// Paint the content. The surface is sized to the cell.
    fn paint(&mut self, surface: &mut dyn Surface);
}

/// One recycled slot of the list.
pub struct Cell {
    id: CellId,
    pub(crate) bound: Option<usize>,
    pub(crate) selected: bool,
    pub(crate) bounds: Rect,
    pub(crate) cursor: CursorKind,
    pub(crate) needs_repaint: bool,
    pub(crate) custom: Option<Box<dyn CellContent>>,
}

impl Cell {
    pub(crate) fn new(id: CellId) -> Self {
        Self {
            id,
            bound: None,
            selected: false,
            bounds: Rect::default(),
            cursor: CursorKind::Default,
            needs_repaint: true,
            custom: None,
        }
    }

    /// Stable identity of this slot.
    #[inline]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// The row this cell currently shows, or `None` when it sits past the
    /// last row.
    #[inline]
    pub const fn bound_index(&self) -> Option<usize> {
        self.bound
    }

    /// Whether the bound row is selected.
    #[inline]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Cell rectangle in content coordinates (x from the start of the
    /// content, y from the top of the viewport).
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cursor the data source asked for on this cell's row.
    #[inline]
    pub const fn cursor(&self) -> CursorKind {
        self.cursor
    }

    /// Whether the cell changed since the host last painted it.
    #[inline]
    pub const fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Embedded content, if the data source supplied any.
    pub fn custom_content(&self) -> Option<&dyn CellContent> {
        self.custom.as_deref()
    }

    /// Mutable access to the embedded content.
    pub fn custom_content_mut(&mut self) -> Option<&mut (dyn CellContent + 'static)> {
        self.custom.as_deref_mut()
    }

    /// Paint embedded content onto a cell-sized surface. Row content itself
    /// is painted by the data source.
    pub(crate) fn paint_custom(&mut self, surface: &mut dyn Surface) {
        if let Some(content) = self.custom.as_deref_mut() {
            let (width, height) = surface.size();
            content.set_bounds(Rect::from_size(width, height));
            content.paint(surface);
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.id)
            .field("bound", &self.bound)
            .field("selected", &self.selected)
            .field("bounds", &self.bounds)
            .field("cursor", &self.cursor)
            .field("needs_repaint", &self.needs_repaint)
            .field("has_custom", &self.custom.is_some())
            .finish()
    }
}
