#![forbid(unsafe_code)]

//! Virtualized, recycling viewport.
//!
//! The viewport keeps a pool of `2 + viewport_width / column_width` cells.
//! Slot `i` always shows column `first_visible + i`, where
//! `first_visible = scroll_offset / column_width`. Scrolling rotates the
//! pool so cells that stay on screen keep their binding; only the cells that
//! wrap around get a new index and a repaint request.
//!
//! The viewport knows nothing about the data source. Each remap receives a
//! [`PoolBinding`] with the current row count and selection, and the owning
//! controller refreshes per-row state (cursor, embedded content) afterwards.

#[cfg(feature = "tracing")]
use web_time::Instant;

use hlist_core::geometry::Rect;

use crate::cell::{Cell, CellId};
use crate::selection::SelectionSet;

/// What the pool is bound against during a remap.
#[derive(Debug, Clone, Copy)]
pub struct PoolBinding<'a> {
    /// Selected rows, for each cell's selected flag.
    pub selection: &'a SelectionSet,
    /// Rows the data source currently reports.
    pub total_count: usize,
}

impl<'a> PoolBinding<'a> {
    /// Bind against `total_count` rows with `selection`.
    #[must_use]
    pub const fn new(selection: &'a SelectionSet, total_count: usize) -> Self {
        Self {
            selection,
            total_count,
        }
    }
}

/// Geometry inputs for [`RecyclingViewport::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportLayout {
    /// Width of every column in pixels. Clamped to at least 1.
    pub column_width: u32,
    /// Visible width in pixels.
    pub viewport_width: u32,
    /// Visible height in pixels; every cell is this tall.
    pub viewport_height: u32,
    /// Lower bound for the scrollable content width.
    pub min_content_width: u32,
}

/// The recycling cell pool plus scroll state.
#[derive(Debug)]
pub struct RecyclingViewport {
    cells: Vec<Cell>,
    next_id: u64,
    column_width: u32,
    viewport_width: u32,
    viewport_height: u32,
    min_content_width: u32,
    content_width: u32,
    scroll_offset: u32,
    total_count: usize,
    first_visible: usize,
    repaint_queue: Vec<CellId>,
}

impl Default for RecyclingViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecyclingViewport {
    /// An empty viewport with a 1 px column width and zero size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            next_id: 0,
            column_width: 1,
            viewport_width: 0,
            viewport_height: 0,
            min_content_width: 0,
            content_width: 0,
            scroll_offset: 0,
            total_count: 0,
            first_visible: 0,
            repaint_queue: Vec::new(),
        }
    }

    /// Recompute content width from new geometry and row count, clamp the
    /// scroll offset if the content shrank, and remap the pool.
    ///
    /// Returns whether the scroll offset changed.
    pub fn layout(&mut self, layout: ViewportLayout, binding: PoolBinding<'_>) -> bool {
        let column_width = layout.column_width.max(1);
        if column_width != self.column_width || layout.viewport_height != self.viewport_height {
            // Every cell's bounds move; repaint the lot.
            self.mark_all_dirty();
        }
        self.column_width = column_width;
        self.viewport_width = layout.viewport_width;
        self.viewport_height = layout.viewport_height;
        self.min_content_width = layout.min_content_width;
        self.total_count = binding.total_count;
        self.content_width = self.compute_content_width();

        let clamped = self.scroll_offset.min(self.max_scroll_offset());
        let changed = clamped != self.scroll_offset;
        self.scroll_offset = clamped;
        if changed {
            self.log_scroll();
        }
        self.remap_pool(binding);
        changed
    }

    /// Scroll to `offset`, clamped to `[0, max_scroll_offset()]`, and remap.
    ///
    /// Returns whether the offset changed.
    pub fn set_scroll_offset(&mut self, offset: u32, binding: PoolBinding<'_>) -> bool {
        let clamped = offset.min(self.max_scroll_offset());
        let changed = clamped != self.scroll_offset;
        self.scroll_offset = clamped;
        if changed {
            self.log_scroll();
        }
        self.remap_pool(binding);
        changed
    }

    /// Scroll by a signed pixel delta. Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: i64, binding: PoolBinding<'_>) -> bool {
        let target = (i64::from(self.scroll_offset) + delta).clamp(0, i64::from(u32::MAX));
        self.set_scroll_offset(u32::try_from(target).unwrap_or(u32::MAX), binding)
    }

    /// Scroll the minimum amount that makes column `index` wholly visible.
    ///
    /// Columns left of the view are aligned to the left edge, columns right
    /// of it to the right edge. A zero-width viewport never scrolls, and
    /// neither does an index past the last row.
    /// Returns whether the offset changed.
    pub fn scroll_to_reveal(&mut self, index: usize, binding: PoolBinding<'_>) -> bool {
        if self.viewport_width == 0 || index >= binding.total_count {
            return false;
        }
        let w = u64::from(self.column_width);
        let target = if index < self.first_wholly_visible() {
            (index as u64).saturating_mul(w)
        } else if index >= self.last_wholly_visible() {
            (index as u64)
                .saturating_add(1)
                .saturating_mul(w)
                .saturating_sub(u64::from(self.viewport_width))
        } else {
            return false;
        };
        let target = u32::try_from(target).unwrap_or(u32::MAX);
        self.set_scroll_offset(target, binding)
    }

    /// Rebind the pool onto the columns the current offset exposes.
    ///
    /// Grows by appending fresh cells and shrinks by dropping the tail.
    /// A cell whose bound index or selected flag changes is queued for
    /// repaint. Slots past the last row are positioned but unbound.
    pub fn remap_pool(&mut self, binding: PoolBinding<'_>) {
        #[cfg(feature = "tracing")]
        let remap_start = Instant::now();
        #[cfg(feature = "tracing")]
        let remap_span = tracing::debug_span!(
            "hlist.remap",
            pool_size = tracing::field::Empty,
            first_visible = tracing::field::Empty,
            dirty = tracing::field::Empty,
            remap_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _remap_guard = remap_span.enter();

        self.total_count = binding.total_count;
        let new_first = (self.scroll_offset / self.column_width) as usize;
        self.rotate_pool(new_first);
        self.first_visible = new_first;
        self.resize_pool(self.pool_size());

        let column_width = self.column_width;
        let viewport_height = self.viewport_height;
        let mut dirty = 0usize;
        for (slot, cell) in self.cells.iter_mut().enumerate() {
            let index = new_first.saturating_add(slot);
            let bound = (index < binding.total_count).then_some(index);
            let selected = bound.is_some_and(|i| binding.selection.contains(i));
            cell.bounds = column_rect(index, column_width, viewport_height);
            if cell.bound != bound || cell.selected != selected {
                cell.bound = bound;
                cell.selected = selected;
                cell.needs_repaint = true;
                self.repaint_queue.push(cell.id());
                dirty += 1;
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = dirty;

        #[cfg(feature = "tracing")]
        {
            remap_span.record("pool_size", self.cells.len());
            remap_span.record("first_visible", self.first_visible);
            remap_span.record("dirty", dirty);
            remap_span.record(
                "remap_duration_us",
                remap_start.elapsed().as_micros() as u64,
            );
        }
    }

    /// Move cells so that those still on screen keep their slot's index.
    fn rotate_pool(&mut self, new_first: usize) {
        let len = self.cells.len();
        if new_first > self.first_visible {
            let shift = new_first - self.first_visible;
            if shift < len {
                self.cells.rotate_left(shift);
            }
        } else if new_first < self.first_visible {
            let shift = self.first_visible - new_first;
            if shift < len {
                self.cells.rotate_right(shift);
            }
        }
    }

    fn resize_pool(&mut self, size: usize) {
        self.cells.truncate(size);
        while self.cells.len() < size {
            let id = CellId(self.next_id);
            self.next_id += 1;
            self.cells.push(Cell::new(id));
            self.repaint_queue.push(id);
        }
    }

    fn mark_all_dirty(&mut self) {
        for cell in &mut self.cells {
            cell.needs_repaint = true;
            self.repaint_queue.push(cell.id());
        }
    }

    fn compute_content_width(&self) -> u32 {
        let columns = u64::try_from(self.total_count).unwrap_or(u64::MAX);
        let natural = columns.saturating_mul(u64::from(self.column_width));
        let natural = u32::try_from(natural).unwrap_or(u32::MAX);
        natural
            .max(self.min_content_width)
            .max(self.viewport_width)
    }

    #[cfg(feature = "tracing")]
    fn log_scroll(&self) {
        tracing::debug!(
            message = "hlist.scroll",
            offset = self.scroll_offset,
            content_width = self.content_width,
            viewport_width = self.viewport_width,
        );
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn log_scroll(&self) {}

    // --- queries ---------------------------------------------------------

    /// The cell showing column `index`, if it is in the pool.
    pub fn find_cell_for_index(&self, index: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.bound == Some(index))
    }

    /// Mutable access to the cell showing column `index`.
    pub fn find_cell_for_index_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.bound == Some(index))
    }

    /// The column bound to the cell with identity `id`.
    pub fn index_of_cell(&self, id: CellId) -> Option<usize> {
        self.cell(id).and_then(Cell::bound_index)
    }

    /// The pooled cell with identity `id`.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id() == id)
    }

    /// Mutable access to the pooled cell with identity `id`.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.id() == id)
    }

    /// The pool in slot order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable pool in slot order.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Queue a repaint for whichever cell shows `index`. Returns whether
    /// such a cell exists.
    pub fn repaint_index(&mut self, index: usize) -> bool {
        let Some(cell) = self.cells.iter_mut().find(|c| c.bound == Some(index)) else {
            return false;
        };
        cell.needs_repaint = true;
        let id = cell.id();
        self.repaint_queue.push(id);
        true
    }

    /// Queue a repaint for every cell.
    pub fn repaint_all(&mut self) {
        self.mark_all_dirty();
    }

    /// Drain the ids of cells queued for repaint, ascending and deduplicated.
    pub fn take_repaint_requests(&mut self) -> Vec<CellId> {
        let mut ids = std::mem::take(&mut self.repaint_queue);
        ids.sort_unstable();
        ids.dedup();
        ids.retain(|id| self.cells.iter().any(|c| c.id() == *id));
        ids
    }

    /// Number of cells the current geometry needs.
    #[inline]
    pub fn pool_size(&self) -> usize {
        2 + (self.viewport_width / self.column_width) as usize
    }

    /// Columns that fit wholly in the viewport.
    #[inline]
    pub fn num_cols_on_screen(&self) -> usize {
        (self.viewport_width / self.column_width) as usize
    }

    /// First column with any pixel on screen.
    #[inline]
    pub const fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// First column whose left edge is on screen.
    #[inline]
    pub fn first_wholly_visible(&self) -> usize {
        self.scroll_offset.div_ceil(self.column_width) as usize
    }

    /// One past the last column whose right edge is on screen.
    #[inline]
    pub fn last_wholly_visible(&self) -> usize {
        let right = u64::from(self.scroll_offset) + u64::from(self.viewport_width);
        (right / u64::from(self.column_width)) as usize
    }

    /// Largest valid scroll offset.
    #[inline]
    pub fn max_scroll_offset(&self) -> u32 {
        self.content_width.saturating_sub(self.viewport_width)
    }

    #[inline]
    pub const fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    #[inline]
    pub const fn content_width(&self) -> u32 {
        self.content_width
    }

    #[inline]
    pub const fn column_width(&self) -> u32 {
        self.column_width
    }

    #[inline]
    pub const fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    #[inline]
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[inline]
    pub const fn min_content_width(&self) -> u32 {
        self.min_content_width
    }

    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// The current geometry, for feeding back into [`layout`](Self::layout).
    pub const fn current_layout(&self) -> ViewportLayout {
        ViewportLayout {
            column_width: self.column_width,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            min_content_width: self.min_content_width,
        }
    }
}

/// Rectangle of column `index` in content coordinates.
pub(crate) fn column_rect(index: usize, column_width: u32, height: u32) -> Rect {
    let x = (index as u64).saturating_mul(u64::from(column_width));
    Rect::new(i32::try_from(x).unwrap_or(i32::MAX), 0, column_width, height)
}
