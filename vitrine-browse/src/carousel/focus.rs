//! Focus handling: row-level keyboard target arbitration and the
//! post-shift refocus poll.

use std::time::Instant;

use super::types::RowKey;
use crate::config::RuntimeConfig;

/// Which input source last set the active focus target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusSource {
    #[default]
    None,
    Mouse,
    Keyboard,
}

/// Row-level focus controller.
///
/// Decides which carousel receives keyboard navigation. Hover takes
/// priority, but only when the mouse actually moved recently (or was the
/// last source); a row sliding under a stationary cursor must not steal
/// focus from keyboard-driven browsing.
#[derive(Debug, Default, Clone)]
pub struct RowFocus {
    hovered_key: Option<RowKey>,
    keyboard_active_key: Option<RowKey>,
    last_mouse_move_at: Option<Instant>,
    last_source: FocusSource,
}

impl RowFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on cursor enter/leave of a row.
    pub fn set_hovered(&mut self, key: Option<RowKey>) {
        self.hovered_key = key;
        if key.is_some() {
            self.last_source = FocusSource::Mouse;
        }
    }

    /// Called on chevron press or programmatic focus.
    pub fn set_keyboard_active(&mut self, key: Option<RowKey>) {
        self.keyboard_active_key = key;
        self.last_source = FocusSource::Keyboard;
    }

    pub fn record_mouse_move(&mut self, when: Instant) {
        self.last_mouse_move_at = Some(when);
    }

    /// The row that should receive keyboard navigation right now.
    ///
    /// Hover wins while the mouse is the active source or moved within
    /// `window_ms`; otherwise the explicit keyboard target holds.
    pub fn keyboard_target(&self, now: Instant, window_ms: u64) -> Option<RowKey> {
        if let Some(hovered) = self.hovered_key {
            let recent_move = self.last_mouse_move_at.is_some_and(|t| {
                now.saturating_duration_since(t).as_millis() as u64 <= window_ms
            });
            if self.last_source == FocusSource::Mouse || recent_move {
                return Some(hovered);
            }
        }
        self.keyboard_active_key
    }

    pub fn is_active(&self, key: &RowKey, now: Instant, window_ms: u64) -> bool {
        self.keyboard_target(now, window_ms).as_ref() == Some(key)
    }

    /// Clear hover state (cursor left the window).
    pub fn clear_hover(&mut self) {
        self.hovered_key = None;
    }

    pub fn clear_all(&mut self) {
        self.hovered_key = None;
        self.keyboard_active_key = None;
        self.last_source = FocusSource::None;
    }
}

/// The item a refocus poll is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusTarget {
    pub row: RowKey,
    pub data_index: usize,
}

/// Outcome of one refocus poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefocusPoll {
    /// Nothing pending.
    Idle,
    /// Target not mounted yet; still inside the timeout.
    Pending,
    /// Target is mounted; move keyboard focus to it now.
    Focus(FocusTarget),
    /// Timed out waiting for the mount; the attempt is dropped.
    Abandoned(FocusTarget),
}

/// After a committed shift, moves keyboard focus to the newly revealed
/// edge item, tolerant of the item mounting a few frames late.
///
/// The poll is bounded: past the hard timeout the attempt is silently
/// abandoned rather than left ticking forever.
#[derive(Debug, Default)]
pub struct FocusCoordinator {
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    target: FocusTarget,
    requested_at: Instant,
    last_poll_at: Option<Instant>,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask for focus to land on `target` once it mounts. Replaces any
    /// earlier request (rapid successive shifts refocus only the last).
    pub fn request(&mut self, target: FocusTarget, now: Instant) {
        self.pending = Some(Pending {
            target,
            requested_at: now,
            last_poll_at: None,
        });
    }

    /// Drop the pending request (row unmount).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Poll the pending request against the host's mount state.
    pub fn poll<F>(&mut self, now: Instant, cfg: &RuntimeConfig, is_mounted: F) -> RefocusPoll
    where
        F: Fn(&FocusTarget) -> bool,
    {
        let Some(pending) = self.pending.as_mut() else {
            return RefocusPoll::Idle;
        };

        let elapsed_ms =
            now.saturating_duration_since(pending.requested_at).as_millis() as u64;
        if elapsed_ms > cfg.refocus_timeout_ms() {
            let target = pending.target;
            self.pending = None;
            log::debug!("refocus abandoned after {elapsed_ms}ms: {target:?}");
            return RefocusPoll::Abandoned(target);
        }

        // Rate-limit the mount checks to the poll interval.
        if let Some(last) = pending.last_poll_at {
            let since_ms = now.saturating_duration_since(last).as_millis() as u64;
            if since_ms < cfg.refocus_poll_interval_ms() {
                return RefocusPoll::Pending;
            }
        }
        pending.last_poll_at = Some(now);

        if is_mounted(&pending.target) {
            let target = pending.target;
            self.pending = None;
            RefocusPoll::Focus(target)
        } else {
            RefocusPoll::Pending
        }
    }
}
