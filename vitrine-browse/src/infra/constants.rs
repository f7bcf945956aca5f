//! Browse-engine constants
//!
//! Shared constants for carousel and overlay behavior. Several of these are
//! empirically tuned (the edge clearance, the offset-correction terms they
//! pair with, the debounce windows); tuning should happen here so every row
//! and overlay updates consistently.

/// Breakpoint table deriving items-per-page from viewport width.
pub mod breakpoints {
    /// Below this width a row shows 3 items.
    pub const COMPACT_MAX_WIDTH: f32 = 800.0;
    /// Below this width a row shows 4 items.
    pub const MEDIUM_MAX_WIDTH: f32 = 1100.0;
    /// Below this width a row shows 5 items; at or above, 6.
    pub const WIDE_MAX_WIDTH: f32 = 1400.0;

    pub const MIN_ITEMS_PER_PAGE: usize = 3;
    pub const MAX_ITEMS_PER_PAGE: usize = 6;

    /// Items per page for a given viewport width.
    pub fn items_per_page(viewport_width: f32) -> usize {
        if viewport_width < COMPACT_MAX_WIDTH {
            3
        } else if viewport_width < MEDIUM_MAX_WIDTH {
            4
        } else if viewport_width < WIDE_MAX_WIDTH {
            5
        } else {
            6
        }
    }
}

/// Shift (page advance) animation defaults.
pub mod shift {
    /// Duration (ms) of a page shift.
    pub const DURATION_MS: u64 = 750;
    /// Debounce before a viewport resize recomputes items-per-page (ms).
    pub const RESIZE_DEBOUNCE_MS: u64 = 300;
}

/// Overlay (mini/detail) animation defaults.
pub mod overlay {
    /// Minimum gap kept between an opening overlay and the viewport edge.
    /// Tuned against the source layout; do not re-derive.
    pub const EDGE_CLEARANCE_PX: f32 = 48.0;
    /// Ratio of mini-card size to its anchor. The reset phase scales the
    /// card by the inverse so it exactly covers the anchor.
    pub const MINI_SCALE_FACTOR: f32 = 1.5;
    /// Scale used for detail mount/close when no anchor rect exists.
    pub const UNANCHORED_SCALE: f32 = 0.8;
    /// Resting top offset of an unanchored detail panel.
    pub const DETAIL_FIXED_TOP_PX: f32 = 32.0;
    /// Resting width of an unanchored detail panel.
    pub const DETAIL_FIXED_WIDTH_PX: f32 = 850.0;
    /// Duration (ms) of the open morph.
    pub const OPEN_DURATION_MS: u64 = 300;
    /// Duration (ms) of the close morph.
    pub const CLOSE_DURATION_MS: u64 = 250;
    /// Dwell (ms) after the cursor leaves a mini card before it closes.
    pub const HOVER_EXIT_DELAY_MS: u64 = 250;
}

/// Refocus and row-focus behavior.
pub mod focus {
    /// Interval (ms) between refocus polls while waiting for a
    /// just-revealed item to mount.
    pub const REFOCUS_POLL_INTERVAL_MS: u64 = 50;
    /// Hard cap (ms) on refocus polling; past this the attempt is
    /// silently abandoned.
    pub const REFOCUS_TIMEOUT_MS: u64 = 1_000;
    /// Time window (ms) within which mouse movement authorizes
    /// hover-driven row focus switches.
    pub const HOVER_SWITCH_WINDOW_MS: u64 = 150;
}

/// Prefetch window sizes relative to the realized range.
pub mod windows {
    /// Number of items to prefetch ahead of the realized window.
    pub const PREFETCH_ITEMS: usize = 8;
    /// Additional background window items beyond prefetch.
    pub const BACKGROUND_ITEMS: usize = 16;
}
