#![forbid(unsafe_code)]

//! Selection state for the list box.
//!
//! [`SelectionSet`] stores selected indices as sorted, disjoint,
//! non-adjacent half-open ranges, so memory grows with the number of
//! contiguous runs rather than the number of selected columns.
//!
//! [`SelectionModel`] adds the anchor (`last_selected`) and the policies
//! that turn clicks, shift-extends, and toggles into set mutations. Every
//! operation takes the current row count, because the data source may
//! change it at any time.

use std::ops::Range;

/// A set of column indices stored as sorted, non-touching ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionSet {
    ranges: Vec<Range<usize>>,
}

impl SelectionSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// A set holding one index.
    #[must_use]
    pub fn single(index: usize) -> Self {
        let mut set = Self::new();
        set.add(index);
        set
    }

    /// A set holding every index in `range`.
    #[must_use]
    pub fn from_range(range: Range<usize>) -> Self {
        let mut set = Self::new();
        set.add_range(range);
        set
    }

    /// Whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.end - r.start).sum()
    }

    /// The underlying ranges, ascending.
    #[inline]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Whether `index` is in the set. O(log runs).
    pub fn contains(&self, index: usize) -> bool {
        let pos = self.ranges.partition_point(|r| r.end <= index);
        self.ranges.get(pos).is_some_and(|r| r.start <= index)
    }

    /// The `n`-th selected index in ascending order.
    pub fn nth(&self, mut n: usize) -> Option<usize> {
        for r in &self.ranges {
            let len = r.end - r.start;
            if n < len {
                return Some(r.start + n);
            }
            n -= len;
        }
        None
    }

    /// Smallest selected index.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.ranges.first().map(|r| r.start)
    }

    /// Largest selected index.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.ranges.last().map(|r| r.end - 1)
    }

    /// Iterate selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Add one index.
    pub fn add(&mut self, index: usize) {
        self.add_range(index..index.saturating_add(1));
    }

    /// Remove one index.
    pub fn remove(&mut self, index: usize) {
        self.remove_range(index..index.saturating_add(1));
    }

    /// Add every index in `range`, merging with overlapping or touching runs.
    pub fn add_range(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        // Runs that overlap or touch `range` sit in `lo..hi`.
        let lo = self.ranges.partition_point(|r| r.end < range.start);
        let hi = self.ranges.partition_point(|r| r.start <= range.end);
        if lo == hi {
            self.ranges.insert(lo, range);
            return;
        }
        let start = range.start.min(self.ranges[lo].start);
        let end = range.end.max(self.ranges[hi - 1].end);
        self.ranges.splice(lo..hi, std::iter::once(start..end));
    }

    /// Remove every index in `range`, splitting runs as needed.
    pub fn remove_range(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let lo = self.ranges.partition_point(|r| r.end <= range.start);
        let hi = self.ranges.partition_point(|r| r.start < range.end);
        if lo >= hi {
            return;
        }
        let head = self.ranges[lo].start..range.start;
        let tail = range.end..self.ranges[hi - 1].end;
        let keep = [head, tail].into_iter().filter(|r| r.start < r.end);
        self.ranges.splice(lo..hi, keep);
    }

    /// Drop every index `>= count`. Returns whether anything was removed.
    pub fn truncate(&mut self, count: usize) -> bool {
        if self.last().is_some_and(|last| last >= count) {
            self.remove_range(count..usize::MAX);
            true
        } else {
            false
        }
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.add(index);
        }
        set
    }
}

/// What a selection operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing changed.
    Unchanged,
    /// `index` was added and is now the anchor. The caller may reveal it.
    Selected(usize),
    /// Membership changed without a new anchor (deselect, clear, clamp).
    Changed,
}

impl SelectionOutcome {
    /// Whether the selection changed in any way.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// The newly anchored index, if any.
    #[must_use]
    pub const fn selected_index(self) -> Option<usize> {
        match self {
            Self::Selected(index) => Some(index),
            _ => None,
        }
    }
}

/// Selected indices plus the anchor used for shift-extends and keyboard moves.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    set: SelectionSet,
    last_selected: Option<usize>,
    multiple: bool,
    always_toggle: bool,
}

impl SelectionModel {
    /// A single-selection model with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable multi-selection.
    ///
    /// Disabling does not trim an existing multi-selection; the next plain
    /// select collapses it.
    pub fn set_multiple_selection(&mut self, enabled: bool) {
        self.multiple = enabled;
    }

    /// Whether multi-selection is enabled.
    #[must_use]
    pub const fn multiple_selection(&self) -> bool {
        self.multiple
    }

    /// Make every plain click flip the clicked column (multi-selection only).
    pub fn set_clicking_toggles(&mut self, enabled: bool) {
        self.always_toggle = enabled;
    }

    /// Whether plain clicks toggle.
    #[must_use]
    pub const fn clicking_toggles(&self) -> bool {
        self.always_toggle
    }

    /// The selected indices.
    #[inline]
    pub fn set(&self) -> &SelectionSet {
        &self.set
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Whether `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.set.contains(index)
    }

    /// The `n`-th selected index, ascending.
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.set.nth(n)
    }

    /// The anchor, if it is still selected.
    ///
    /// This is the column the user acted on most recently, not the largest
    /// selected index.
    pub fn last_selected(&self) -> Option<usize> {
        self.last_selected.filter(|&i| self.set.contains(i))
    }

    /// Select `index`.
    ///
    /// With `extend_range == false` (always the case in single-selection
    /// mode) the rest of the selection is cleared first. An out-of-range
    /// index adds nothing; without `extend_range` it still clears.
    pub fn select(&mut self, index: usize, extend_range: bool, total: usize) -> SelectionOutcome {
        let extend_range = extend_range && self.multiple;

        let already = self.set.contains(index);
        if already && (extend_range || self.set.len() <= 1) {
            return SelectionOutcome::Unchanged;
        }

        if index < total {
            if !extend_range {
                self.set.clear();
            }
            self.set.add(index);
            self.last_selected = Some(index);
            self.log_selection_change("select");
            SelectionOutcome::Selected(index)
        } else if !extend_range {
            self.deselect_all()
        } else {
            SelectionOutcome::Unchanged
        }
    }

    /// Remove `index`. When it was the anchor, the smallest remaining index
    /// becomes the anchor.
    pub fn deselect(&mut self, index: usize) -> SelectionOutcome {
        if !self.set.contains(index) {
            return SelectionOutcome::Unchanged;
        }
        self.set.remove(index);
        if self.last_selected == Some(index) {
            self.last_selected = self.set.first();
        }
        self.log_selection_change("deselect");
        SelectionOutcome::Changed
    }

    /// Clear the selection and the anchor.
    pub fn deselect_all(&mut self) -> SelectionOutcome {
        if self.set.is_empty() {
            return SelectionOutcome::Unchanged;
        }
        self.set.clear();
        self.last_selected = None;
        self.log_selection_change("deselect_all");
        SelectionOutcome::Changed
    }

    /// Flip membership of `index`, extending rather than replacing.
    pub fn toggle(&mut self, index: usize, total: usize) -> SelectionOutcome {
        if self.set.contains(index) {
            self.deselect(index)
        } else {
            self.select(index, true, total)
        }
    }

    /// Add the span between `first` and `last` (inclusive), anchored at `last`.
    ///
    /// The span is only added in multi-selection mode and when the ends
    /// differ. `last` is then taken out and re-added by a final
    /// [`select`](Self::select), so the anchor lands on `last` and the
    /// returned outcome reports it for scroll-to-reveal.
    pub fn select_range(&mut self, first: usize, last: usize, total: usize) -> SelectionOutcome {
        let mut last = last;
        let mut span_added = false;
        if self.multiple && first != last && total > 0 {
            let max_index = total - 1;
            let first = first.min(max_index);
            last = last.min(max_index);
            let before = self.set.clone();
            self.set.add_range(first.min(last)..first.max(last) + 1);
            self.set.remove(last);
            span_added = self.set != before;
        }
        match self.select(last, true, total) {
            SelectionOutcome::Unchanged if span_added => SelectionOutcome::Changed,
            outcome => outcome,
        }
    }

    /// Select every row (multi-selection only), anchored at the last row.
    pub fn select_all(&mut self, total: usize) -> SelectionOutcome {
        if !self.multiple {
            return SelectionOutcome::Unchanged;
        }
        self.select_range(0, usize::MAX, total)
    }

    /// Apply a click on `index` according to the modifier keys.
    ///
    /// Policy, first match wins:
    /// 1. multi-selection and (command held or clicking toggles): toggle;
    /// 2. multi-selection, shift held, and an anchor exists: range from the anchor;
    /// 3. context-menu click on a selected index: keep the selection as is;
    /// 4. otherwise select. A mouse-down on an already-selected index in a
    ///    multi-selection extends instead of collapsing, so a drag can start
    ///    from the whole selection; the mouse-up collapses it.
    pub fn interpret_click(
        &mut self,
        index: usize,
        modifiers: hlist_core::event::Modifiers,
        is_mouse_up: bool,
        total: usize,
    ) -> SelectionOutcome {
        if self.multiple && (modifiers.is_command() || self.always_toggle) {
            return self.toggle(index, total);
        }
        if self.multiple && modifiers.is_shift() {
            if let Some(anchor) = self.last_selected {
                return self.select_range(anchor, index, total);
            }
        }
        let already = self.set.contains(index);
        if modifiers.is_popup_menu() && already {
            return SelectionOutcome::Unchanged;
        }
        let extend = self.multiple && !is_mouse_up && already;
        self.select(index, extend, total)
    }

    /// Drop indices `>= total`. When anything is dropped the anchor moves to
    /// the smallest remaining index.
    pub fn clamp_to(&mut self, total: usize) -> SelectionOutcome {
        if !self.set.truncate(total) {
            return SelectionOutcome::Unchanged;
        }
        self.last_selected = self.set.first();
        self.log_selection_change("clamp");
        SelectionOutcome::Changed
    }

    /// Replace the whole selection.
    ///
    /// Indices `>= total` are dropped. The anchor survives if still selected,
    /// else it moves to the smallest selected index.
    pub fn set_selected(&mut self, set: SelectionSet, total: usize) -> SelectionOutcome {
        let mut set = set;
        set.truncate(total);
        if set == self.set {
            return SelectionOutcome::Unchanged;
        }
        self.set = set;
        if !self.last_selected.is_some_and(|i| self.set.contains(i)) {
            self.last_selected = self.set.first();
        }
        self.log_selection_change("set_selected");
        SelectionOutcome::Changed
    }

    #[cfg(feature = "tracing")]
    fn log_selection_change(&self, action: &str) {
        tracing::debug!(
            message = "hlist.selection",
            action,
            last_selected = self.last_selected,
            selected_count = self.set.len(),
        );
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn log_selection_change(&self, _action: &str) {}
}
