//! Viewport role tagging for realized items.
//!
//! Positions are assigned in track coordinates, so wrap-around copies at
//! either end of the strip participate: a trailing copy can be the right
//! peek during a wrap shift. Only real data items inside the viewport are
//! tabbable; padding copies never receive keyboard focus.

use vitrine_core::{AnchorRect, Rect};

use super::state::CarouselRow;
use super::types::{CloneTag, ItemPosition, ItemUid, RenderSlot};
use super::window::ViewportWindow;

/// Tags each slot of a rendered window with its viewport role.
#[derive(Debug, Clone, Copy)]
pub struct ItemPositionClassifier {
    lowest: usize,
    items_per_page: usize,
    total_items: usize,
    peek_enabled: bool,
}

impl ItemPositionClassifier {
    pub fn for_row(row: &CarouselRow) -> Self {
        Self {
            lowest: row.window.lowest_visible_index,
            items_per_page: row.items_per_page,
            total_items: row.total_items,
            peek_enabled: row.peek_enabled,
        }
    }

    /// Assign position, viewport, and tabbable flags to every slot.
    pub fn classify(&self, window: &mut ViewportWindow) {
        let mut track_col = self.first_track_col(window);
        for slot in &mut window.slots {
            if let Some(item) = slot.as_item_mut() {
                item.position = self.position_for(track_col);
                item.in_viewport = self.in_viewport(track_col);
                item.tabbable = item.in_viewport && !item.uid.is_clone();
            }
            track_col += 1;
        }
    }

    // Leading wrap copies occupy the columns before the data track.
    fn first_track_col(&self, window: &ViewportWindow) -> isize {
        let leading = window
            .slots
            .iter()
            .filter_map(RenderSlot::as_item)
            .filter(|i| i.uid.clone == Some(CloneTag::Leading))
            .count();
        -(leading as isize)
    }

    fn in_viewport(&self, col: isize) -> bool {
        let lowest = self.lowest as isize;
        col >= lowest && col < lowest + self.items_per_page as isize
    }

    fn position_for(&self, col: isize) -> ItemPosition {
        let lowest = self.lowest as isize;
        let highest = lowest + self.items_per_page as isize - 1;
        if col == lowest {
            ItemPosition::LeftEdge
        } else if col == highest {
            ItemPosition::RightEdge
        } else if col > lowest && col < highest {
            ItemPosition::Middle
        } else if self.peek_enabled && col == lowest - 1 {
            ItemPosition::LeftPeek
        } else if self.peek_enabled && col == highest + 1 {
            ItemPosition::RightPeek
        } else {
            ItemPosition::None
        }
    }
}

/// Record a post-layout measurement for one slot. Measurements live only as
/// long as the window they were taken in.
pub fn record_measurement(window: &mut ViewportWindow, uid: ItemUid, rect: Rect) {
    if let Some(item) = window
        .slots
        .iter_mut()
        .filter_map(RenderSlot::as_item_mut)
        .find(|i| i.uid == uid)
    {
        item.measured_rect = Some(rect);
    }
}

/// Snapshot the anchor rect for a modal open from a measured data item.
/// Returns `None` when the item is unmeasured; callers fall back to the
/// unanchored overlay variant.
pub fn capture_anchor(
    window: &ViewportWindow,
    data_index: usize,
    scroll_y: f32,
) -> Option<AnchorRect> {
    window
        .slots
        .iter()
        .filter_map(RenderSlot::as_item)
        .find(|i| !i.uid.is_clone() && i.data_index == data_index)
        .and_then(|i| i.measured_rect)
        .map(|rect| AnchorRect::new(rect, scroll_y))
}
