//! Per-row carousel state: layout facts plus the committed window.

use serde::{Deserialize, Serialize};

use super::types::{Direction, RowKey};
use crate::infra::constants::breakpoints;

/// The committed scroll window of one row.
///
/// `is_animating` is true for the entire span between an advance request
/// and its completion signal; no second advance may start while it is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowState {
    /// Start index of the left-aligned visible page.
    pub lowest_visible_index: usize,
    /// Set on the first committed shift and never cleared.
    pub has_moved_once: bool,
    /// Direction of the most recent (or in-flight) shift.
    pub move_direction: Direction,
    /// A shift is in flight.
    pub is_animating: bool,
}

/// One carousel row: item count, page sizing, loop/peek behavior, and the
/// committed window. Created when a media list mounts and destroyed on
/// unmount; `items_per_page` mutates on viewport resize.
#[derive(Debug, Clone)]
pub struct CarouselRow {
    pub key: RowKey,
    pub total_items: usize,
    pub items_per_page: usize,
    pub looping_enabled: bool,
    pub peek_enabled: bool,
    pub window: WindowState,
}

impl CarouselRow {
    pub fn new(key: RowKey, total_items: usize, viewport_width: f32) -> Self {
        Self {
            key,
            total_items,
            items_per_page: breakpoints::items_per_page(viewport_width),
            looping_enabled: true,
            peek_enabled: true,
            window: WindowState::default(),
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping_enabled = looping;
        self
    }

    pub fn with_peek(mut self, peek: bool) -> Self {
        self.peek_enabled = peek;
        self
    }

    /// Update total items, clamping the committed window if the list shrank.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        let max = self.max_lowest_index();
        if self.window.lowest_visible_index > max {
            self.window.lowest_visible_index = max;
        }
        log::debug!(
            "row {:?} total updated: total={}, lowest={}",
            self.key,
            total,
            self.window.lowest_visible_index
        );
    }

    /// Recompute items-per-page from the breakpoint table. Returns true
    /// when the page size changed (callers re-window on true).
    pub fn update_viewport_width(&mut self, viewport_width: f32) -> bool {
        let next = breakpoints::items_per_page(viewport_width);
        if next == self.items_per_page {
            return false;
        }
        self.items_per_page = next;
        let max = self.max_lowest_index();
        if self.window.lowest_visible_index > max {
            self.window.lowest_visible_index = max;
        }
        true
    }

    /// Largest committed index that still leaves a full page visible.
    pub fn max_lowest_index(&self) -> usize {
        self.total_items.saturating_sub(self.items_per_page)
    }

    /// Number of pages, final partial page included.
    pub fn page_count(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Width of one item as a percentage of the visible page.
    pub fn item_width_pct(&self) -> f32 {
        100.0 / self.items_per_page as f32
    }

    pub fn has_more_next_pages(&self) -> bool {
        self.looping_enabled
            || self.window.lowest_visible_index < self.max_lowest_index()
    }

    pub fn has_more_prev_pages(&self) -> bool {
        self.looping_enabled || self.window.lowest_visible_index > 0
    }

    /// Index range of the currently visible page.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.window.lowest_visible_index;
        start..(start + self.items_per_page).min(self.total_items)
    }
}
