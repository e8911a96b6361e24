//! Property-based invariant tests for the recycling viewport.
//!
//! These tests verify structural invariants that must hold for any valid inputs:
//!
//! 1. Pool size is `2 + viewport_width / column_width`, whatever the row count.
//! 2. No two pooled cells are bound to the same column.
//! 3. Slot `i` shows `first_visible + i`, unbound past the last row.
//! 4. The scroll offset never exceeds `max(content, viewport) - viewport`.
//! 5. Setting the same offset twice changes nothing the second time.
//! 6. Reveal leaves the column wholly visible when a column fits on screen.
//! 7. Reveal is idempotent.
//! 8. Selected flags mirror the selection set.
//! 9. Columns that stay on screen across a scroll keep their cell.
//! 10. Cell bounds are `(index * w, 0, w, viewport_height)`.
//! 11. Revealing an index past the last row leaves the offset alone.

use std::collections::{HashMap, HashSet};

use hlist_widgets::{Cell, PoolBinding, RecyclingViewport, SelectionSet, ViewportLayout};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn layout(column_width: u32, viewport_width: u32) -> ViewportLayout {
    ViewportLayout {
        column_width,
        viewport_width,
        viewport_height: 30,
        min_content_width: 0,
    }
}

fn laid_out(
    total: usize,
    column_width: u32,
    viewport_width: u32,
    selection: &SelectionSet,
) -> RecyclingViewport {
    let mut vp = RecyclingViewport::new();
    vp.layout(
        layout(column_width, viewport_width),
        PoolBinding::new(selection, total),
    );
    vp
}

fn totals() -> impl Strategy<Value = usize> {
    prop_oneof![Just(0usize), Just(1usize), Just(1_000_000usize), 0usize..500]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Pool bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pool_size_matches_viewport(
        total in totals(),
        column_width in 1u32..80,
        viewport_width in 0u32..600,
        offset in 0u32..100_000,
    ) {
        let selection = SelectionSet::new();
        let mut vp = laid_out(total, column_width, viewport_width, &selection);
        vp.set_scroll_offset(offset, PoolBinding::new(&selection, total));
        let expected = 2 + (viewport_width / column_width) as usize;
        prop_assert_eq!(vp.pool_size(), expected);
        prop_assert_eq!(vp.cells().len(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Bound indices are unique and follow slot order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bound_indices_unique_and_ordered(
        total in totals(),
        column_width in 1u32..60,
        viewport_width in 1u32..400,
        offsets in proptest::collection::vec(0u32..50_000, 1..12),
    ) {
        let selection = SelectionSet::new();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = laid_out(total, column_width, viewport_width, &selection);
        for offset in offsets {
            vp.set_scroll_offset(offset, binding);

            let mut seen = HashSet::new();
            for (slot, cell) in vp.cells().iter().enumerate() {
                let index = vp.first_visible() + slot;
                let expected = (index < total).then_some(index);
                prop_assert_eq!(cell.bound_index(), expected, "slot {}", slot);
                if let Some(i) = cell.bound_index() {
                    prop_assert!(seen.insert(i), "column {} bound twice", i);
                }
            }
            let ids: HashSet<_> = vp.cells().iter().map(Cell::id).collect();
            prop_assert_eq!(ids.len(), vp.cells().len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Scroll clamp and idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scroll_offset_clamped_and_idempotent(
        total in totals(),
        column_width in 1u32..60,
        viewport_width in 0u32..400,
        min_content in 0u32..2_000,
        offset in any::<u32>(),
    ) {
        let selection = SelectionSet::new();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = RecyclingViewport::new();
        vp.layout(
            ViewportLayout {
                min_content_width: min_content,
                ..layout(column_width, viewport_width)
            },
            binding,
        );
        vp.set_scroll_offset(offset, binding);
        let content = vp.content_width().max(viewport_width);
        prop_assert!(u64::from(vp.scroll_offset()) + u64::from(viewport_width) <= u64::from(content));

        let before = vp.scroll_offset();
        let changed = vp.set_scroll_offset(offset, binding);
        prop_assert!(!changed);
        prop_assert_eq!(vp.scroll_offset(), before);
    }
}

proptest! {
    #[test]
    fn shrinking_content_keeps_offset_in_range(
        before in 0usize..2_000,
        after in 0usize..2_000,
        column_width in 1u32..40,
        viewport_width in 0u32..300,
        offset in 0u32..80_000,
    ) {
        let selection = SelectionSet::new();
        let mut vp = laid_out(before, column_width, viewport_width, &selection);
        vp.set_scroll_offset(offset, PoolBinding::new(&selection, before));
        vp.layout(layout(column_width, viewport_width), PoolBinding::new(&selection, after));
        prop_assert!(vp.scroll_offset() <= vp.max_scroll_offset());
        prop_assert_eq!(vp.total_count(), after);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7, 11. Reveal convergence and range guard
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reveal_makes_column_wholly_visible(
        total in 1usize..5_000,
        column_width in 1u32..60,
        extra in 0u32..400,
        start in 0u32..200_000,
        index_frac in 0.0f64..1.0,
    ) {
        let viewport_width = column_width + extra;
        let index = ((total as f64) * index_frac) as usize % total;
        let selection = SelectionSet::new();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = laid_out(total, column_width, viewport_width, &selection);
        vp.set_scroll_offset(start, binding);

        vp.scroll_to_reveal(index, binding);
        prop_assert!(
            vp.first_wholly_visible() <= index && index <= vp.last_wholly_visible(),
            "index {} outside [{}, {}] at offset {}",
            index,
            vp.first_wholly_visible(),
            vp.last_wholly_visible(),
            vp.scroll_offset()
        );
        prop_assert!(vp.find_cell_for_index(index).is_some());

        let offset = vp.scroll_offset();
        prop_assert!(!vp.scroll_to_reveal(index, binding));
        prop_assert_eq!(vp.scroll_offset(), offset);
    }
}

proptest! {
    #[test]
    fn reveal_past_last_row_keeps_offset(
        total in 0usize..5_000,
        column_width in 1u32..60,
        viewport_width in 0u32..400,
        start in 0u32..200_000,
        past in 0usize..1_000_000,
    ) {
        let index = total.saturating_add(past);
        let selection = SelectionSet::new();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = laid_out(total, column_width, viewport_width, &selection);
        vp.set_scroll_offset(start, binding);
        let offset = vp.scroll_offset();

        prop_assert!(!vp.scroll_to_reveal(index, binding));
        prop_assert_eq!(vp.scroll_offset(), offset);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Selected flags mirror the selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selected_flags_match_selection(
        total in 0usize..300,
        picks in proptest::collection::vec(0usize..300, 0..40),
        offset in 0u32..10_000,
    ) {
        let selection: SelectionSet = picks.into_iter().collect();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = laid_out(total, 20, 150, &selection);
        vp.set_scroll_offset(offset, binding);
        for cell in vp.cells() {
            let expected = cell.bound_index().is_some_and(|i| selection.contains(i));
            prop_assert_eq!(cell.is_selected(), expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9-10. Recycling keeps identity; bounds follow the index
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlapping_columns_keep_their_cell(
        column_width in 5u32..40,
        viewport_width in 40u32..300,
        from in 0u32..20_000,
        to in 0u32..20_000,
    ) {
        let total = 2_000;
        let selection = SelectionSet::new();
        let binding = PoolBinding::new(&selection, total);
        let mut vp = laid_out(total, column_width, viewport_width, &selection);
        vp.set_scroll_offset(from, binding);
        let before: HashMap<usize, _> = vp
            .cells()
            .iter()
            .filter_map(|c| c.bound_index().map(|i| (i, c.id())))
            .collect();

        vp.set_scroll_offset(to, binding);
        for cell in vp.cells() {
            let Some(index) = cell.bound_index() else { continue };
            if let Some(id) = before.get(&index) {
                prop_assert_eq!(*id, cell.id(), "column {} changed cell", index);
            }
            let bounds = cell.bounds();
            prop_assert_eq!(i64::from(bounds.x), index as i64 * i64::from(column_width));
            prop_assert_eq!(bounds.y, 0);
            prop_assert_eq!(bounds.width, column_width);
            prop_assert_eq!(bounds.height, 30);
        }
    }
}
