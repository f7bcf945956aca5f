//! Viewport windowing: which items are realized, which are padding.
//!
//! The realized window is bounded so a row never mounts more than
//! `min(total, 2 * items_per_page + 2)` data items, whatever the committed
//! index. Before the first shift the window extends forward (the visible
//! page, the incoming page, and one peek item); afterwards it is centered
//! on the committed page (a full page plus peek behind, one peek ahead).
//! The rest of the track is inert placeholders, and looping rows are padded
//! with wrap-around copies so the strip appears to continue past its ends.

use std::ops::Range;

use vitrine_core::MediaId;

use super::state::CarouselRow;
use super::types::{CloneTag, ItemUid, RenderSlot, RenderedItem};

/// The realized window of one render pass.
#[derive(Debug, Clone)]
pub struct ViewportWindow {
    /// Track slots in render order: leading wrap copies, placeholders,
    /// realized items, placeholders, trailing wrap copies.
    pub slots: Vec<RenderSlot>,
    /// Index range of realized data items.
    pub realized: Range<usize>,
}

impl ViewportWindow {
    /// Contiguous index range of data items that should be mounted.
    pub fn realized_range(row: &CarouselRow) -> Range<usize> {
        let ipp = row.items_per_page;
        let total = row.total_items;
        let lowest = row.window.lowest_visible_index;
        if !row.window.has_moved_once {
            lowest..(lowest + 2 * ipp + 1).min(total)
        } else {
            lowest.saturating_sub(ipp + 1)..(lowest + ipp + 1).min(total)
        }
    }

    /// Compute the render window. `ids_fn` maps item indices to data ids;
    /// an index it cannot resolve is rendered as a placeholder.
    pub fn compute<F>(row: &CarouselRow, ids_fn: F) -> Self
    where
        F: Fn(usize) -> Option<MediaId>,
    {
        let realized = Self::realized_range(row);
        let item_w = row.item_width_pct();
        let total = row.total_items;
        let ipp = row.items_per_page;
        let lowest = row.window.lowest_visible_index;

        // Wrap padding keeps the loop illusion seamless: one full page plus
        // the single peek item, mirrored from the opposite end. Leading
        // copies appear once the offset corrections account for them: after
        // the first committed move, or mid-shift on a Prev wrap.
        let can_loop = row.looping_enabled && row.page_count() >= 2;
        let pad = (ipp + 1).min(total);
        let prev_wrap_in_flight = row.window.is_animating
            && row.window.move_direction == super::types::Direction::Prev;
        let prepend_clones = can_loop
            && lowest < ipp
            && (row.window.has_moved_once || prev_wrap_in_flight);
        let append_clones = can_loop && lowest + 2 * ipp >= total;

        let mut slots = Vec::new();

        if prepend_clones {
            for idx in (total - pad)..total {
                if let Some(id) = ids_fn(idx) {
                    let uid =
                        ItemUid::new(row.key, idx, id).wrap_clone(CloneTag::Leading);
                    slots.push(RenderSlot::WrapClone(RenderedItem::new(uid)));
                }
            }
        }

        for _ in 0..realized.start {
            slots.push(RenderSlot::Placeholder { width_pct: item_w });
        }

        for idx in realized.clone() {
            match ids_fn(idx) {
                Some(id) => {
                    let uid = ItemUid::new(row.key, idx, id);
                    slots.push(RenderSlot::Data(RenderedItem::new(uid)));
                }
                None => slots.push(RenderSlot::Placeholder { width_pct: item_w }),
            }
        }

        for _ in realized.end..total {
            slots.push(RenderSlot::Placeholder { width_pct: item_w });
        }

        if append_clones {
            for idx in 0..pad {
                if let Some(id) = ids_fn(idx) {
                    let uid =
                        ItemUid::new(row.key, idx, id).wrap_clone(CloneTag::Trailing);
                    slots.push(RenderSlot::WrapClone(RenderedItem::new(uid)));
                }
            }
        }

        log::trace!(
            "row {:?} window: realized={realized:?}, slots={}, prepend={prepend_clones}, append={append_clones}",
            row.key,
            slots.len(),
        );

        Self { slots, realized }
    }

    /// Number of realized data items (wrap copies and placeholders excluded).
    pub fn realized_data_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_data()).count()
    }

    /// Window of items to prefetch beyond the realized range.
    pub fn prefetch_range(row: &CarouselRow, count: usize) -> Range<usize> {
        let realized = Self::realized_range(row);
        let start = realized.end.min(row.total_items);
        start..(start + count).min(row.total_items)
    }

    /// Additional background range beyond prefetch.
    pub fn background_range(
        row: &CarouselRow,
        prefetch_count: usize,
        background_count: usize,
    ) -> Range<usize> {
        let prefetch = Self::prefetch_range(row, prefetch_count);
        prefetch.end..(prefetch.end + background_count).min(row.total_items)
    }
}
