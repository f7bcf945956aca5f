//! Percentage offset math and the shift animation.
//!
//! The track's resting translation is a function of the committed window
//! alone; a shift tweens from that resting offset to the target page's and
//! commits the window on the settled signal. The three-term correction in
//! [`OffsetAnimator::base_slider_offset`] compensates for the padding
//! strategy (a prepended wrap page, the single peek filler, and partial
//! first pages) and is tuned against the track composition in
//! [`super::window`]; validate it against the paging scenarios, do not
//! re-derive it.

use std::time::Instant;

use crate::animation::{EasingKind, Tween, TweenProgress};
use crate::config::RuntimeConfig;
use crate::error::BrowseError;

use super::state::CarouselRow;
use super::types::Direction;

/// Everything a renderer needs to run one shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPlan {
    pub direction: Direction,
    pub target_lowest: usize,
    pub from_offset_pct: f32,
    pub to_offset_pct: f32,
    pub duration_ms: u64,
    pub easing: EasingKind,
}

/// Per-tick outcome of an in-flight shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftUpdate {
    /// Current interpolated track offset, percent of the visible page.
    Offset(f32),
    /// The shift settled this tick and the window was committed.
    Committed {
        lowest: usize,
        /// The new resting offset the track snaps to.
        resting_offset: f32,
    },
}

/// Drives one row's shift animation and owns the commit.
#[derive(Debug, Default)]
pub struct OffsetAnimator {
    tween: Tween,
    pending: Option<(Direction, usize)>,
}

impl OffsetAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shifting(&self) -> bool {
        self.pending.is_some()
    }

    /// Resting translation of the track, percent of the visible page.
    ///
    /// Zero until the row has at least two pages; otherwise three
    /// independent corrections accumulate and the combined magnitude flips
    /// sign when the most recent move was Prev.
    pub fn base_slider_offset(row: &CarouselRow) -> f32 {
        if row.page_count() < 2 {
            return 0.0;
        }
        let ipp = row.items_per_page;
        let item_w = row.item_width_pct();
        let w = &row.window;
        let lowest = w.lowest_visible_index;

        let mut offset = 0.0;
        // Prepended wrap page (or a full realized page behind the window).
        if (row.looping_enabled && lowest == 0 && w.has_moved_once) || lowest >= ipp {
            offset -= 100.0;
        }
        // The single peek filler ahead of the buffered page.
        if w.has_moved_once && (row.looping_enabled || lowest > ipp) {
            offset -= item_w;
        }
        // Partial first page.
        if lowest > 0 && lowest < ipp {
            offset -= lowest as f32 * item_w;
        }
        if w.move_direction == Direction::Prev {
            offset = -offset;
        }
        offset
    }

    /// Begin a page shift. Fails without touching the window when a shift
    /// is already in flight or the direction has no further pages.
    pub fn advance(
        &mut self,
        row: &mut CarouselRow,
        direction: Direction,
        cfg: &RuntimeConfig,
        now: Instant,
    ) -> Result<ShiftPlan, BrowseError> {
        if row.window.is_animating {
            return Err(BrowseError::ShiftInFlight);
        }
        let has_more = match direction {
            Direction::Next => row.has_more_next_pages(),
            Direction::Prev => row.has_more_prev_pages(),
            Direction::None => false,
        };
        if !has_more {
            return Err(BrowseError::NoMorePages(direction));
        }

        let target = Self::target_lowest(row, direction);
        let lowest = row.window.lowest_visible_index;

        // Resting offset still reflects the previous move direction.
        let from = Self::base_slider_offset(row);
        let mut delta =
            (lowest as f32 - target as f32) * row.item_width_pct();
        if direction == Direction::Prev {
            delta = -delta;
        }
        let to = from + delta;

        row.window.move_direction = direction;
        row.window.is_animating = true;
        self.pending = Some((direction, target));

        let plan = ShiftPlan {
            direction,
            target_lowest: target,
            from_offset_pct: from,
            to_offset_pct: to,
            duration_ms: cfg.shift_duration_ms(),
            easing: cfg.shift_easing(),
        };
        self.tween
            .start(now, from, to, plan.duration_ms, plan.easing);

        log::debug!(
            "row {:?} advance {direction:?}: {lowest} -> {target} ({from:.2}% -> {to:.2}%)",
            row.key
        );
        Ok(plan)
    }

    /// Advance the shift tween; on the settled tick, commit the window.
    pub fn tick(&mut self, row: &mut CarouselRow, now: Instant) -> Option<ShiftUpdate> {
        match self.tween.tick(now)? {
            TweenProgress::Animating(offset) => Some(ShiftUpdate::Offset(offset)),
            TweenProgress::Settled(_) => {
                let (_, target) = self.pending.take()?;
                row.window.lowest_visible_index = target;
                row.window.has_moved_once = true;
                row.window.is_animating = false;
                let resting = Self::base_slider_offset(row);
                log::debug!(
                    "row {:?} shift committed: lowest={target}, resting={resting:.2}%",
                    row.key
                );
                Some(ShiftUpdate::Committed {
                    lowest: target,
                    resting_offset: resting,
                })
            }
        }
    }

    /// Abort an in-flight shift without committing (row unmount). The
    /// window is left at its previously committed index.
    pub fn cancel(&mut self, row: &mut CarouselRow) {
        self.tween.cancel();
        self.pending = None;
        row.window.is_animating = false;
    }

    /// Target committed index for a step of one page, clamped to the data
    /// range and wrapping at the boundaries when the clamp would reveal
    /// nothing new.
    fn target_lowest(row: &CarouselRow, direction: Direction) -> usize {
        let max = row.max_lowest_index();
        let lowest = row.window.lowest_visible_index;
        match direction {
            Direction::Next => {
                if lowest == max {
                    0
                } else {
                    (lowest + row.items_per_page).min(max)
                }
            }
            Direction::Prev => {
                if lowest == 0 {
                    max
                } else {
                    lowest.saturating_sub(row.items_per_page)
                }
            }
            Direction::None => lowest,
        }
    }
}
