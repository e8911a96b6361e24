#![forbid(unsafe_code)]

//! The horizontal list box controller.
//!
//! [`HorizontalListBox`] owns the [`SelectionModel`] and the
//! [`RecyclingViewport`] and keeps them in step: every selection change
//! rebinds the pool's selected flags, every keyboard or programmatic
//! selection reveals the anchored column, and every content change clamps
//! the selection before the pool is remapped.
//!
//! # Coordinates
//!
//! Pointer coordinates are local to the widget, `(0, 0)` at its top-left.
//! The viewport sits inside the outline, inset by
//! [`ListTheme::outline_thickness`] on every side. Cell bounds are in
//! content coordinates; [`column_position`](HorizontalListBox::column_position)
//! converts to widget coordinates.
//!
//! # Redraws
//!
//! Nothing is painted synchronously. Mutations queue cell repaints and set
//! a redraw flag; the host drains both after the input turn with
//! [`take_repaint_requests`](HorizontalListBox::take_repaint_requests) and
//! [`take_redraw_request`](HorizontalListBox::take_redraw_request).

use std::fmt;

use hlist_core::cursor::CursorKind;
use hlist_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseEvent, MouseEventKind};
use hlist_core::geometry::{Rect, Sides};
use hlist_render::{PixelBuffer, Surface};

use crate::cell::{Cell, CellContent, CellId};
use crate::config::ListBoxConfig;
use crate::data_source::{DataSource, DragHost, DragPayload};
use crate::mouse::{CellEvent, MouseResult};
use crate::selection::{SelectionModel, SelectionOutcome, SelectionSet};
use crate::theme::ListTheme;
use crate::viewport::{PoolBinding, RecyclingViewport, ViewportLayout};

/// Horizontal scrollbar parameters for the host to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollbarState {
    /// Whether the content overflows the viewport.
    pub visible: bool,
    /// Total content width.
    pub range: u32,
    /// Visible width.
    pub page_size: u32,
    /// Current scroll offset.
    pub position: u32,
}

/// A drag image of on-screen columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub image: PixelBuffer,
    /// Left edge of the image in widget coordinates.
    pub origin_x: i32,
    /// Top edge of the image in widget coordinates.
    pub origin_y: i32,
}

/// Pointer press in progress.
#[derive(Debug, Clone, Copy)]
struct Press {
    /// Pressed column, `None` for the background.
    target: Option<usize>,
    /// Selection waits for the mouse-up.
    deferred: bool,
    /// A drag session started from this press.
    dragging: bool,
    /// The pointer moved past the host's drag threshold.
    moved: bool,
}

/// A horizontally scrolling list of equal-width columns.
pub struct HorizontalListBox {
    config: ListBoxConfig,
    theme: ListTheme,
    width: u32,
    height: u32,
    viewport: RecyclingViewport,
    selection: SelectionModel,
    source: Option<Box<dyn DataSource>>,
    drag_host: Option<Box<dyn DragHost>>,
    total_count: usize,
    press: Option<Press>,
    redraw_requested: bool,
}

impl Default for HorizontalListBox {
    fn default() -> Self {
        Self::new(ListBoxConfig::default())
    }
}

impl fmt::Debug for HorizontalListBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalListBox")
            .field("config", &self.config)
            .field("size", &(self.width, self.height))
            .field("total_count", &self.total_count)
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .field("has_source", &self.source.is_some())
            .field("has_drag_host", &self.drag_host.is_some())
            .finish()
    }
}

impl HorizontalListBox {
    /// An empty list with no data source and zero size.
    #[must_use]
    pub fn new(config: ListBoxConfig) -> Self {
        let config = ListBoxConfig {
            column_width: config.column_width.max(1),
            ..config
        };
        let mut selection = SelectionModel::new();
        selection.set_multiple_selection(config.multiple_selection);
        selection.set_clicking_toggles(config.clicking_toggles_selection);
        let mut list = Self {
            config,
            theme: ListTheme::default(),
            width: 0,
            height: 0,
            viewport: RecyclingViewport::new(),
            selection,
            source: None,
            drag_host: None,
            total_count: 0,
            press: None,
            redraw_requested: true,
        };
        list.relayout();
        list
    }

    /// Builder form of [`set_data_source`](Self::set_data_source).
    #[must_use]
    pub fn with_data_source(mut self, source: Box<dyn DataSource>) -> Self {
        self.set_data_source(Some(source));
        self
    }

    /// Builder form of [`set_drag_host`](Self::set_drag_host).
    #[must_use]
    pub fn with_drag_host(mut self, host: Box<dyn DragHost>) -> Self {
        self.set_drag_host(Some(host));
        self
    }

    /// Builder form of [`set_size`](Self::set_size).
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.set_size(width, height);
        self
    }

    /// Builder form of [`set_theme`](Self::set_theme).
    #[must_use]
    pub fn with_theme(mut self, theme: ListTheme) -> Self {
        self.set_theme(theme);
        self
    }

    // --- collaborators ---------------------------------------------------

    /// Replace the data source and re-read its row count.
    ///
    /// Returns the previous source.
    pub fn set_data_source(
        &mut self,
        source: Option<Box<dyn DataSource>>,
    ) -> Option<Box<dyn DataSource>> {
        let previous = std::mem::replace(&mut self.source, source);
        // Content built by the old source is meaningless to the new one.
        for cell in self.viewport.cells_mut() {
            cell.custom = None;
        }
        self.viewport.repaint_all();
        self.update_content();
        previous
    }

    pub fn data_source(&self) -> Option<&dyn DataSource> {
        self.source.as_deref()
    }

    pub fn data_source_mut(&mut self) -> Option<&mut (dyn DataSource + 'static)> {
        self.source.as_deref_mut()
    }

    /// Replace the drag host. Returns the previous one.
    pub fn set_drag_host(&mut self, host: Option<Box<dyn DragHost>>) -> Option<Box<dyn DragHost>> {
        std::mem::replace(&mut self.drag_host, host)
    }

    pub fn drag_host(&self) -> Option<&dyn DragHost> {
        self.drag_host.as_deref()
    }

    // --- configuration ---------------------------------------------------

    #[inline]
    pub const fn config(&self) -> &ListBoxConfig {
        &self.config
    }

    /// Replace every behaviour switch at once and re-layout.
    pub fn set_config(&mut self, config: ListBoxConfig) {
        self.config = ListBoxConfig {
            column_width: config.column_width.max(1),
            ..config
        };
        self.selection
            .set_multiple_selection(self.config.multiple_selection);
        self.selection
            .set_clicking_toggles(self.config.clicking_toggles_selection);
        self.update_content();
    }

    /// Set the column width (clamped to 1) and re-read the content.
    pub fn set_column_width(&mut self, width: u32) {
        self.config.column_width = width.max(1);
        self.update_content();
    }

    #[inline]
    pub const fn column_width(&self) -> u32 {
        self.config.column_width
    }

    /// Set the lower bound for the scrollable content width.
    pub fn set_min_content_width(&mut self, width: u32) {
        self.config.min_content_width = width;
        self.update_content();
    }

    #[inline]
    pub const fn min_content_width(&self) -> u32 {
        self.config.min_content_width
    }

    pub fn set_multiple_selection(&mut self, enabled: bool) {
        self.config.multiple_selection = enabled;
        self.selection.set_multiple_selection(enabled);
    }

    pub fn set_clicking_toggles_selection(&mut self, enabled: bool) {
        self.config.clicking_toggles_selection = enabled;
        self.selection.set_clicking_toggles(enabled);
    }

    pub fn set_select_on_mouse_down(&mut self, enabled: bool) {
        self.config.select_on_mouse_down = enabled;
    }

    pub fn set_mouse_move_selects(&mut self, enabled: bool) {
        self.config.mouse_move_selects = enabled;
    }

    #[inline]
    pub const fn theme(&self) -> &ListTheme {
        &self.theme
    }

    /// Replace the theme. The outline thickness moves the viewport, so this
    /// re-layouts and repaints everything.
    pub fn set_theme(&mut self, theme: ListTheme) {
        self.theme = theme;
        self.viewport.repaint_all();
        let scrolled = self.relayout();
        self.notify_scrolled(scrolled);
    }

    /// Resize the widget.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        let scrolled = self.relayout();
        self.notify_scrolled(scrolled);
    }

    /// Widget rectangle in its own coordinates.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// The viewport rectangle in widget coordinates (inside the outline).
    pub fn viewport_rect(&self) -> Rect {
        self.bounds().inner(Sides::all(self.theme.outline_thickness))
    }

    // --- content ---------------------------------------------------------

    /// Re-read the row count from the data source (zero without one).
    pub fn update_content(&mut self) {
        let total = self.source.as_deref().map_or(0, DataSource::row_count);
        self.on_content_changed(total);
    }

    /// Adopt a new row count: clamp the selection, re-layout, and notify
    /// the data source if the clamp removed anything.
    pub fn on_content_changed(&mut self, total: usize) {
        self.total_count = total;
        let clamped = self.selection.clamp_to(total);
        let scrolled = self.relayout();
        if clamped.changed() {
            self.notify_selection_changed();
        }
        self.notify_scrolled(scrolled);
    }

    /// Re-read the content and repaint every cell.
    pub fn refresh(&mut self) {
        self.viewport.repaint_all();
        self.update_content();
    }

    /// Rows the list currently believes the data source has.
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    fn layout_params(&self) -> ViewportLayout {
        let vp = self.viewport_rect();
        ViewportLayout {
            column_width: self.config.column_width,
            viewport_width: vp.width,
            viewport_height: vp.height,
            min_content_width: self.config.min_content_width,
        }
    }

    /// Push geometry into the viewport and resync cells. Returns whether
    /// the scroll offset moved.
    fn relayout(&mut self) -> bool {
        let params = self.layout_params();
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        let scrolled = self.viewport.layout(params, binding);
        self.sync_cells();
        self.redraw_requested = true;
        scrolled
    }

    /// Refresh cursor and embedded content of every pooled cell.
    fn sync_cells(&mut self) {
        let source = self.source.as_deref_mut();
        let Some(source) = source else {
            for cell in self.viewport.cells_mut() {
                cell.cursor = CursorKind::Default;
                cell.custom = None;
            }
            return;
        };
        for cell in self.viewport.cells_mut() {
            match cell.bound {
                Some(index) => {
                    cell.cursor = source.cursor_for_row(index);
                    let previous = cell.custom.take();
                    cell.custom = source.refresh_custom_content(index, cell.selected, previous);
                    let local = Rect::from_size(cell.bounds.width, cell.bounds.height);
                    if let Some(content) = cell.custom.as_deref_mut() {
                        content.set_bounds(local);
                    }
                }
                None => {
                    cell.cursor = CursorKind::Default;
                    cell.custom = None;
                }
            }
        }
    }

    fn remap(&mut self) {
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        self.viewport.remap_pool(binding);
        self.sync_cells();
        self.redraw_requested = true;
    }

    fn notify_selection_changed(&mut self) {
        let anchor = self.selection.last_selected();
        if let Some(source) = self.source.as_deref_mut() {
            source.on_selection_changed(anchor);
        }
    }

    fn notify_scrolled(&mut self, scrolled: bool) {
        if !scrolled {
            return;
        }
        if let Some(source) = self.source.as_deref_mut() {
            source.on_scrolled();
        }
    }

    /// Propagate a selection outcome: remap flags, reveal unless told not
    /// to, then notify.
    fn apply_selection(&mut self, outcome: SelectionOutcome, dont_scroll: bool) -> SelectionOutcome {
        if !outcome.changed() {
            return outcome;
        }
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        self.viewport.remap_pool(binding);
        let scrolled = match outcome.selected_index() {
            Some(index) if !dont_scroll => self.viewport.scroll_to_reveal(index, binding),
            _ => false,
        };
        self.sync_cells();
        self.redraw_requested = true;
        self.notify_selection_changed();
        self.notify_scrolled(scrolled);
        outcome
    }

    // --- selection commands ----------------------------------------------

    /// Select `index`, revealing it.
    pub fn select(&mut self, index: usize) -> SelectionOutcome {
        self.select_index(index, false, false)
    }

    /// Select `index`.
    ///
    /// `extend` keeps the rest of the selection (multi-selection only). An
    /// out-of-range index without `extend` clears the selection.
    pub fn select_index(&mut self, index: usize, dont_scroll: bool, extend: bool) -> SelectionOutcome {
        let outcome = self.selection.select(index, extend, self.total_count);
        self.apply_selection(outcome, dont_scroll)
    }

    pub fn deselect(&mut self, index: usize) -> SelectionOutcome {
        let outcome = self.selection.deselect(index);
        self.apply_selection(outcome, true)
    }

    pub fn deselect_all(&mut self) -> SelectionOutcome {
        let outcome = self.selection.deselect_all();
        self.apply_selection(outcome, true)
    }

    /// Flip the selection of `index`, revealing it when it becomes selected.
    pub fn toggle(&mut self, index: usize) -> SelectionOutcome {
        let outcome = self.selection.toggle(index, self.total_count);
        self.apply_selection(outcome, false)
    }

    /// Select from `first` to `last` inclusive, anchored at `last`.
    pub fn select_range(&mut self, first: usize, last: usize, dont_scroll: bool) -> SelectionOutcome {
        let outcome = self.selection.select_range(first, last, self.total_count);
        self.apply_selection(outcome, dont_scroll)
    }

    /// Select every row (multi-selection only).
    pub fn select_all(&mut self) -> SelectionOutcome {
        let outcome = self.selection.select_all(self.total_count);
        self.apply_selection(outcome, false)
    }

    /// Replace the whole selection without scrolling.
    pub fn set_selected(&mut self, rows: SelectionSet) -> SelectionOutcome {
        let outcome = self.selection.set_selected(rows, self.total_count);
        self.apply_selection(outcome, true)
    }

    // --- selection queries -----------------------------------------------

    #[inline]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[inline]
    pub fn selected_rows(&self) -> &SelectionSet {
        self.selection.set()
    }

    pub fn num_selected(&self) -> usize {
        self.selection.len()
    }

    /// The `n`-th selected row, ascending.
    pub fn selected_row(&self, n: usize) -> Option<usize> {
        self.selection.nth(n)
    }

    pub fn last_selected(&self) -> Option<usize> {
        self.selection.last_selected()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.is_selected(index)
    }

    // --- scrolling ---------------------------------------------------------

    #[inline]
    pub fn viewport(&self) -> &RecyclingViewport {
        &self.viewport
    }

    #[inline]
    pub const fn scroll_offset(&self) -> u32 {
        self.viewport.scroll_offset()
    }

    /// Scroll to an absolute pixel offset (clamped).
    pub fn set_scroll_offset(&mut self, offset: u32) -> bool {
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        let scrolled = self.viewport.set_scroll_offset(offset, binding);
        self.after_scroll(scrolled)
    }

    /// Scroll the minimum amount that shows column `index` wholly.
    pub fn scroll_to_reveal(&mut self, index: usize) -> bool {
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        let scrolled = self.viewport.scroll_to_reveal(index, binding);
        self.after_scroll(scrolled)
    }

    fn scroll_by(&mut self, delta: i64) -> bool {
        let binding = PoolBinding::new(self.selection.set(), self.total_count);
        let scrolled = self.viewport.scroll_by(delta, binding);
        self.after_scroll(scrolled)
    }

    fn after_scroll(&mut self, scrolled: bool) -> bool {
        if scrolled {
            self.sync_cells();
            self.redraw_requested = true;
            self.notify_scrolled(true);
        }
        scrolled
    }

    /// Scroll to a fraction of the scrollable range; 0 is the start and 1
    /// the end.
    pub fn set_horizontal_position(&mut self, proportion: f64) -> bool {
        let offscreen = f64::from(self.viewport.max_scroll_offset());
        let target = (proportion * offscreen).round();
        let target = if target.is_nan() || target <= 0.0 {
            0
        } else if target >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            target as u32
        };
        self.set_scroll_offset(target)
    }

    /// The scroll offset as a fraction of the scrollable range, 0 when the
    /// content fits.
    pub fn horizontal_position(&self) -> f64 {
        let offscreen = self.viewport.max_scroll_offset();
        if offscreen > 0 {
            f64::from(self.viewport.scroll_offset()) / f64::from(offscreen)
        } else {
            0.0
        }
    }

    pub fn scrollbar_state(&self) -> ScrollbarState {
        ScrollbarState {
            visible: self.viewport.content_width() > self.viewport.viewport_width(),
            range: self.viewport.content_width(),
            page_size: self.viewport.viewport_width(),
            position: self.viewport.scroll_offset(),
        }
    }

    // --- geometry ------------------------------------------------------------

    /// Columns that fit wholly in the viewport.
    pub fn num_cols_on_screen(&self) -> usize {
        self.viewport.num_cols_on_screen()
    }

    /// Width of the visible content area.
    pub fn visible_content_width(&self) -> u32 {
        self.viewport.viewport_width()
    }

    /// Height of every column.
    pub fn visible_column_height(&self) -> u32 {
        self.viewport.viewport_height()
    }

    /// The column under widget point `(x, y)`.
    pub fn index_at_position(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let content_x = i64::from(self.viewport.scroll_offset()) + i64::from(x)
            - i64::from(self.viewport_rect().x);
        if content_x < 0 {
            return None;
        }
        let col = usize::try_from(content_x / i64::from(self.config.column_width)).ok()?;
        (col < self.total_count).then_some(col)
    }

    /// Where a drop at widget point `(x, y)` would insert, in `0..=total`.
    /// `None` outside the widget.
    pub fn insertion_index_at_position(&self, x: i32, y: i32) -> Option<usize> {
        if !self.inside(x, y) {
            return None;
        }
        let w = i64::from(self.config.column_width);
        let content_x = i64::from(self.viewport.scroll_offset()) + i64::from(x) + w / 2
            - i64::from(self.viewport_rect().x);
        let index = (content_x.max(0) / w) as u64;
        let total = u64::try_from(self.total_count).unwrap_or(u64::MAX);
        usize::try_from(index.min(total)).ok()
    }

    /// Rectangle of column `index`. With `relative_to_widget` it is where
    /// the column appears on screen, otherwise where it sits in the
    /// unscrolled content.
    pub fn column_position(&self, index: usize, relative_to_widget: bool) -> Rect {
        let vp = self.viewport_rect();
        let w = i64::from(self.config.column_width);
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        let mut x = i64::from(vp.x).saturating_add(index.saturating_mul(w));
        if relative_to_widget {
            x -= i64::from(self.viewport.scroll_offset());
        }
        let x = x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Rect::new(x, vp.y, self.config.column_width, self.viewport.viewport_height())
    }

    // --- cells -----------------------------------------------------------------

    pub fn cells(&self) -> &[Cell] {
        self.viewport.cells()
    }

    /// The pooled cell showing column `index`.
    pub fn cell_for_index(&self, index: usize) -> Option<&Cell> {
        self.viewport.find_cell_for_index(index)
    }

    /// The column bound to cell `id`.
    pub fn index_of_cell(&self, id: CellId) -> Option<usize> {
        self.viewport.index_of_cell(id)
    }

    /// Embedded content of column `index`, if it is on screen and has any.
    pub fn custom_content_for_index(&self, index: usize) -> Option<&dyn CellContent> {
        self.viewport
            .find_cell_for_index(index)
            .and_then(Cell::custom_content)
    }

    pub fn tooltip_for_cell(&self, id: CellId) -> Option<String> {
        let index = self.viewport.index_of_cell(id)?;
        self.source.as_deref()?.tooltip_for_row(index)
    }

    pub fn cursor_for_cell(&self, id: CellId) -> CursorKind {
        self.viewport
            .cell(id)
            .map_or(CursorKind::Default, Cell::cursor)
    }

    /// Tooltip for whatever column is under widget point `(x, y)`.
    pub fn tooltip_at(&self, x: i32, y: i32) -> Option<String> {
        let index = self.index_at_position(x, y)?;
        self.source.as_deref()?.tooltip_for_row(index)
    }

    /// Cursor for whatever column is under widget point `(x, y)`.
    pub fn cursor_at(&self, x: i32, y: i32) -> CursorKind {
        self.index_at_position(x, y)
            .and_then(|index| self.viewport.find_cell_for_index(index))
            .map_or(CursorKind::Default, Cell::cursor)
    }

    /// Queue a repaint of column `index` if it is on screen.
    pub fn repaint_column(&mut self, index: usize) {
        if self.viewport.repaint_index(index) {
            self.redraw_requested = true;
        }
    }

    /// Drain the cells that need repainting.
    pub fn take_repaint_requests(&mut self) -> Vec<CellId> {
        self.viewport.take_repaint_requests()
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // --- painting ----------------------------------------------------------------

    /// Paint one cell onto a cell-sized surface. Returns false for an
    /// unknown id.
    pub fn paint_cell(&mut self, id: CellId, surface: &mut dyn Surface) -> bool {
        let Some(cell) = self.viewport.cells_mut().iter_mut().find(|c| c.id() == id) else {
            return false;
        };
        render_cell(&mut self.source, cell, surface);
        true
    }

    /// Fill the widget background.
    pub fn paint_background(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.theme.background);
    }

    /// Draw the outline over everything else.
    pub fn paint_outline(&self, surface: &mut dyn Surface) {
        surface.draw_outline(
            self.bounds(),
            self.theme.outline_thickness,
            self.theme.outline,
        );
    }

    /// Paint the whole widget: background, visible columns clipped to the
    /// viewport, then the outline.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        self.paint_background(surface);
        let vp = self.viewport_rect();
        let dx = i64::from(vp.x) - i64::from(self.viewport.scroll_offset());
        for cell in self.viewport.cells_mut() {
            if cell.bound.is_none() {
                cell.needs_repaint = false;
                continue;
            }
            let rect = cell.bounds;
            let x = (i64::from(rect.x) + dx).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
            let y = rect.y + vp.y;
            if Rect::new(x, y, rect.width, rect.height)
                .intersection_opt(&vp)
                .is_none()
            {
                continue;
            }
            let mut buffer = PixelBuffer::new(rect.width, rect.height);
            render_cell(&mut self.source, cell, &mut buffer);
            blit(surface, &buffer, x, y, vp, 1.0);
        }
        self.paint_outline(surface);
    }

    /// Render the on-screen columns of `rows` into one image, each column at
    /// the theme's snapshot opacity.
    ///
    /// The image covers the union of those columns in widget coordinates,
    /// clipped to the widget. Columns that are scrolled out of view are
    /// skipped.
    pub fn snapshot_selection(&mut self, rows: &SelectionSet) -> Snapshot {
        #[cfg(feature = "tracing")]
        let snapshot_span = tracing::debug_span!(
            "hlist.snapshot",
            rows = rows.len(),
            width = tracing::field::Empty,
            height = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _snapshot_guard = snapshot_span.enter();

        let vp = self.viewport_rect();
        let dx = i64::from(vp.x) - i64::from(self.viewport.scroll_offset());
        let screen_rect = |cell: &Cell| {
            let x = (i64::from(cell.bounds.x) + dx).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
            Rect::new(x as i32, cell.bounds.y + vp.y, cell.bounds.width, cell.bounds.height)
        };

        let mut area = Rect::default();
        for cell in self.viewport.cells() {
            if cell.bound.is_some_and(|i| rows.contains(i)) {
                area = area.union(&screen_rect(cell));
            }
        }
        let area = area.intersection(&self.bounds());

        #[cfg(feature = "tracing")]
        {
            snapshot_span.record("width", area.width);
            snapshot_span.record("height", area.height);
        }

        let mut image = PixelBuffer::new(area.width, area.height);
        let opacity = self.theme.snapshot_opacity;
        if !area.is_empty() {
            for cell in self.viewport.cells_mut() {
                if !cell.bound.is_some_and(|i| rows.contains(i)) {
                    continue;
                }
                let rect = screen_rect(cell);
                let mut buffer = PixelBuffer::new(rect.width, rect.height);
                render_cell(&mut self.source, cell, &mut buffer);
                image.composite(&buffer, rect.x - area.x, rect.y - area.y, opacity);
            }
        }

        Snapshot {
            image,
            origin_x: area.x,
            origin_y: area.y,
        }
    }

    /// Hand a drag of `rows` to the drag host, with a snapshot as the drag
    /// image positioned relative to `pointer` (widget coordinates).
    ///
    /// Returns whether a drag started. Calling this without a drag host is
    /// a programming error.
    pub fn start_drag(&mut self, rows: &SelectionSet, payload: DragPayload, pointer: (i32, i32)) -> bool {
        if self.drag_host.is_none() {
            #[cfg(feature = "tracing")]
            tracing::warn!(message = "hlist.drag", rows = rows.len(), has_drag_host = false);
            debug_assert!(false, "drag requested but the list has no drag host");
            return false;
        }
        let snapshot = self.snapshot_selection(rows);
        let offset = (snapshot.origin_x - pointer.0, snapshot.origin_y - pointer.1);
        if let Some(host) = self.drag_host.as_deref_mut() {
            host.start_dragging(payload, snapshot.image, offset);
        }
        true
    }

    // --- input -------------------------------------------------------------------

    /// Dispatch a host event. Returns whether the list consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse).is_handled(),
            Event::Resize { width, height } => {
                self.set_size(*width, *height);
                true
            }
            Event::Focus(_) => {
                self.redraw_requested = true;
                false
            }
        }
    }

    /// Keyboard navigation and commands. Returns whether the key was used.
    pub fn on_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let multi = self.selection.multiple_selection();
        let anchor = self.selection.last_selected();

        if let Some(target) = self.key_target(key.code, anchor) {
            let extending = multi && key.shift();
            match (extending, anchor) {
                (true, Some(anchor)) => {
                    self.select_range(anchor, target, false);
                }
                _ if self.total_count == 0 => {
                    self.deselect_all();
                }
                _ => {
                    self.select_index(target, false, false);
                }
            }
            // An unchanged selection skips the reveal in apply_selection.
            if let Some(anchor) = self.selection.last_selected() {
                self.scroll_to_reveal(anchor);
            }
            return true;
        }

        match key.code {
            KeyCode::Enter => {
                let Some(anchor) = anchor else {
                    return false;
                };
                if let Some(source) = self.source.as_deref_mut() {
                    source.on_activate(anchor);
                }
                true
            }
            KeyCode::Delete | KeyCode::Backspace => {
                let Some(anchor) = anchor else {
                    return false;
                };
                if let Some(source) = self.source.as_deref_mut() {
                    source.on_delete_requested(anchor);
                }
                true
            }
            KeyCode::Char('a' | 'A') if multi && key.command() => {
                self.select_all();
                true
            }
            _ => false,
        }
    }

    /// Where a navigation key moves the anchor, or `None` for other keys.
    fn key_target(&self, code: KeyCode, anchor: Option<usize>) -> Option<usize> {
        let last = self.total_count.saturating_sub(1);
        let page = self.num_cols_on_screen().max(1);
        let target = match code {
            KeyCode::Left | KeyCode::Up => anchor.map_or(0, |a| a.saturating_sub(1)),
            KeyCode::Right | KeyCode::Down => anchor.map_or(0, |a| a.saturating_add(1)),
            KeyCode::PageUp => anchor.unwrap_or(0).saturating_sub(page),
            KeyCode::PageDown => anchor.unwrap_or(0).saturating_add(page),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return None,
        };
        Some(target.min(last))
    }

    /// Apply a pointer event that already resolved to column `index`.
    ///
    /// Mouse-driven selection never scrolls; the column is on screen already.
    pub fn on_cell_hit(&mut self, index: usize, event: CellEvent, modifiers: Modifiers) -> SelectionOutcome {
        match event {
            CellEvent::MouseDown | CellEvent::MouseUp => {
                let is_mouse_up = event == CellEvent::MouseUp;
                let outcome =
                    self.selection
                        .interpret_click(index, modifiers, is_mouse_up, self.total_count);
                self.apply_selection(outcome, true)
            }
            CellEvent::DoubleClick => {
                if let Some(source) = self.source.as_deref_mut() {
                    source.on_activate(index);
                }
                SelectionOutcome::Unchanged
            }
        }
    }

    fn click_cell(&mut self, index: usize, event: CellEvent, mouse: &MouseEvent) {
        self.on_cell_hit(index, event, mouse.modifiers);
        if let Some(source) = self.source.as_deref_mut() {
            source.on_cell_clicked(index, mouse);
        }
    }

    fn inside(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }

    /// The full pointer pipeline: hit testing, click selection, drag start,
    /// background clicks, wheel scrolling, and hover selection.
    ///
    /// The host sends a `DoubleClick` in place of the second press's
    /// activation; the press and release around it arrive as usual.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> MouseResult {
        let (x, y) = event.position();
        match event.kind {
            MouseEventKind::Down(_) => {
                if !self.inside(x, y) {
                    self.press = None;
                    return MouseResult::Ignored;
                }
                let target = self.index_at_position(x, y);
                let mut press = Press {
                    target,
                    deferred: false,
                    dragging: false,
                    moved: false,
                };
                let result = match target {
                    Some(index)
                        if self.config.select_on_mouse_down && !self.selection.is_selected(index) =>
                    {
                        self.click_cell(index, CellEvent::MouseDown, event);
                        MouseResult::Selected(index)
                    }
                    Some(index) => {
                        press.deferred = true;
                        MouseResult::Deferred(index)
                    }
                    None => MouseResult::Ignored,
                };
                self.press = Some(press);
                result
            }
            MouseEventKind::Up(_) => {
                let Some(press) = self.press.take() else {
                    return MouseResult::Ignored;
                };
                match press.target {
                    Some(index) if press.deferred && !press.dragging => {
                        self.click_cell(index, CellEvent::MouseUp, event);
                        MouseResult::Selected(index)
                    }
                    Some(_) => MouseResult::Ignored,
                    None if !press.moved && self.inside(x, y) => {
                        if let Some(source) = self.source.as_deref_mut() {
                            source.on_background_clicked(event);
                        }
                        MouseResult::Background
                    }
                    None => MouseResult::Ignored,
                }
            }
            MouseEventKind::Drag(_) => self.handle_drag(event),
            MouseEventKind::DoubleClick(_) => match self.index_at_position(x, y) {
                Some(index) => {
                    self.on_cell_hit(index, CellEvent::DoubleClick, event.modifiers);
                    MouseResult::Activated(index)
                }
                None => MouseResult::Ignored,
            },
            MouseEventKind::Moved | MouseEventKind::Exit => {
                if !self.config.mouse_move_selects {
                    return MouseResult::Ignored;
                }
                let hovered = if event.kind == MouseEventKind::Exit {
                    None
                } else {
                    self.index_at_position(x, y)
                };
                // Out of range clears the selection.
                let index = hovered.unwrap_or(self.total_count);
                self.select_index(index, true, false);
                hovered.map_or(MouseResult::Ignored, MouseResult::Selected)
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                self.wheel(-i64::from(self.config.column_width))
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                self.wheel(i64::from(self.config.column_width))
            }
        }
    }

    fn wheel(&mut self, delta: i64) -> MouseResult {
        if self.scroll_by(delta) {
            MouseResult::Scrolled
        } else {
            MouseResult::Ignored
        }
    }

    fn handle_drag(&mut self, event: &MouseEvent) -> MouseResult {
        let Some(press) = self.press.as_mut() else {
            return MouseResult::Ignored;
        };
        press.moved = true;
        let (Some(index), false) = (press.target, press.dragging) else {
            return MouseResult::Ignored;
        };
        let rows = if self.config.select_on_mouse_down || self.selection.is_selected(index) {
            self.selection.set().clone()
        } else {
            SelectionSet::single(index)
        };
        if rows.is_empty() {
            return MouseResult::Ignored;
        }
        let payload = self
            .source
            .as_deref()
            .and_then(|source| source.drag_payload_for(&rows))
            .filter(|payload| !payload.is_empty());
        let Some(payload) = payload else {
            return MouseResult::Ignored;
        };
        if !self.start_drag(&rows, payload, event.position()) {
            return MouseResult::Ignored;
        }
        if let Some(press) = self.press.as_mut() {
            press.dragging = true;
        }
        MouseResult::DragStarted
    }
}

/// Paint `cell`'s row and embedded content onto a cell-sized surface.
fn render_cell(source: &mut Option<Box<dyn DataSource>>, cell: &mut Cell, surface: &mut dyn Surface) {
    cell.needs_repaint = false;
    let Some(index) = cell.bound else {
        return;
    };
    let (width, height) = surface.size();
    if let Some(source) = source.as_deref_mut() {
        source.render_cell(index, surface, width, height, cell.selected);
    }
    cell.paint_custom(surface);
}

/// Composite `image` onto `surface` at `(x, y)`, clipped to `clip`.
fn blit(surface: &mut dyn Surface, image: &PixelBuffer, x: i32, y: i32, clip: Rect, opacity: f32) {
    let target = Rect::new(x, y, image.width(), image.height());
    let Some(area) = target.intersection_opt(&clip) else {
        return;
    };
    for py in area.top()..area.bottom() {
        for px in area.left()..area.right() {
            if let Some(pixel) = image.get(px - x, py - y) {
                surface.blend_pixel(px, py, pixel.with_opacity(opacity));
            }
        }
    }
}
