//! Registry for managing carousel rows keyed by [`RowKey`].
//!
//! Owns each row's state, shift animator, and refocus coordinator, plus
//! the row-level focus arbitration and the committed-window memory that
//! survives a row unmounting and remounting (view switches).

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::error::BrowseError;
use crate::infra::constants::focus as focus_constants;

use super::events::{RowEvent, RowMessage};
use super::focus::{FocusCoordinator, FocusTarget, RefocusPoll, RowFocus};
use super::offset::{OffsetAnimator, ShiftPlan, ShiftUpdate};
use super::state::{CarouselRow, WindowState};
use super::types::{Direction, RowKey};
use super::window::ViewportWindow;

/// Committed window state preserved across a row's unmount/remount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowScrollMemory {
    pub lowest_visible_index: usize,
    pub has_moved_once: bool,
    pub move_direction: Direction,
}

impl From<&WindowState> for RowScrollMemory {
    fn from(w: &WindowState) -> Self {
        Self {
            lowest_visible_index: w.lowest_visible_index,
            has_moved_once: w.has_moved_once,
            move_direction: w.move_direction,
        }
    }
}

/// One registered row with its controllers.
#[derive(Debug)]
pub struct RowEntry {
    pub row: CarouselRow,
    pub animator: OffsetAnimator,
    pub refocus: FocusCoordinator,
}

/// Keyed store of carousel rows.
#[derive(Debug, Default)]
pub struct RowRegistry {
    entries: HashMap<RowKey, RowEntry>,
    scroll_memory: HashMap<RowKey, RowScrollMemory>,
    focus: RowFocus,
    pending_resize: Option<(Instant, f32)>,
}

impl RowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a row, bringing its item count and page sizing up to
    /// date either way. A recreated row resumes from its scroll memory.
    pub fn ensure_row(
        &mut self,
        key: RowKey,
        total_items: usize,
        viewport_width: f32,
    ) -> &mut RowEntry {
        let memory = self.scroll_memory.get(&key).copied();
        let entry = self.entries.entry(key).or_insert_with(|| {
            let mut row = CarouselRow::new(key, total_items, viewport_width);
            if let Some(m) = memory {
                row.window.lowest_visible_index =
                    m.lowest_visible_index.min(row.max_lowest_index());
                row.window.has_moved_once = m.has_moved_once;
                row.window.move_direction = m.move_direction;
            }
            RowEntry {
                row,
                animator: OffsetAnimator::new(),
                refocus: FocusCoordinator::new(),
            }
        });

        if entry.row.total_items != total_items {
            entry.row.set_total_items(total_items);
        }
        entry.row.update_viewport_width(viewport_width);
        entry
    }

    pub fn get(&self, key: &RowKey) -> Option<&RowEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &RowKey) -> Option<&mut RowEntry> {
        self.entries.get_mut(key)
    }

    /// Unmount a row: cancel any in-flight shift and pending refocus, and
    /// remember its committed window for a later remount.
    pub fn remove_row(&mut self, key: &RowKey) -> Option<CarouselRow> {
        let mut entry = self.entries.remove(key)?;
        entry.animator.cancel(&mut entry.row);
        entry.refocus.cancel();
        self.scroll_memory
            .insert(*key, RowScrollMemory::from(&entry.row.window));
        Some(entry.row)
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.entries.keys().copied().collect()
    }

    pub fn focus(&self) -> &RowFocus {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut RowFocus {
        &mut self.focus
    }

    /// Begin a shift on a specific row.
    pub fn advance(
        &mut self,
        key: &RowKey,
        direction: Direction,
        cfg: &RuntimeConfig,
        now: Instant,
    ) -> Result<ShiftPlan, BrowseError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or(BrowseError::RowNotFound(*key))?;
        entry.animator.advance(&mut entry.row, direction, cfg, now)
    }

    /// Handle one interaction message. Guard violations (shift in flight,
    /// no further pages) are logged and swallowed here; hosts that want
    /// the error use [`Self::advance`] directly.
    pub fn handle(
        &mut self,
        msg: RowMessage,
        cfg: &RuntimeConfig,
        now: Instant,
    ) -> Vec<RowEvent> {
        match msg {
            RowMessage::NextPage(key) | RowMessage::PrevPage(key) => {
                self.advance_for_event(key, msg.direction(), cfg, now)
            }
            RowMessage::NextPageActive | RowMessage::PrevPageActive => {
                match self
                    .focus
                    .keyboard_target(now, focus_constants::HOVER_SWITCH_WINDOW_MS)
                {
                    Some(key) => self.advance_for_event(key, msg.direction(), cfg, now),
                    None => Vec::new(),
                }
            }
            RowMessage::RowHovered(key) => {
                self.focus.set_hovered(key);
                Vec::new()
            }
            RowMessage::FocusRow(key) => {
                self.focus.set_keyboard_active(Some(key));
                Vec::new()
            }
            RowMessage::MouseMoved => {
                self.focus.record_mouse_move(now);
                Vec::new()
            }
            RowMessage::ViewportResized(width) => {
                // Applied after the debounce window in `tick`.
                self.pending_resize = Some((now, width));
                Vec::new()
            }
        }
    }

    /// Per-frame driver: applies debounced resizes, advances in-flight
    /// shifts, and polls pending refocus requests. `is_mounted` answers
    /// whether a target item exists in the host's tree yet.
    pub fn tick<F>(
        &mut self,
        now: Instant,
        cfg: &RuntimeConfig,
        is_mounted: F,
    ) -> Vec<RowEvent>
    where
        F: Fn(&FocusTarget) -> bool,
    {
        let mut events = Vec::new();

        if let Some((requested_at, width)) = self.pending_resize {
            let elapsed_ms =
                now.saturating_duration_since(requested_at).as_millis() as u64;
            if elapsed_ms >= cfg.resize_debounce_ms() {
                self.pending_resize = None;
                for (key, entry) in &mut self.entries {
                    if entry.row.update_viewport_width(width) {
                        events.push(RowEvent::WindowInvalidated(*key));
                    }
                }
            }
        }

        for (key, entry) in &mut self.entries {
            match entry.animator.tick(&mut entry.row, now) {
                Some(ShiftUpdate::Offset(offset)) => {
                    events.push(RowEvent::TrackOffset(*key, offset));
                }
                Some(ShiftUpdate::Committed {
                    lowest,
                    resting_offset,
                }) => {
                    events.push(RowEvent::ShiftCommitted {
                        key: *key,
                        lowest,
                        resting_offset,
                    });
                    entry.refocus.request(
                        FocusTarget {
                            row: *key,
                            data_index: lowest,
                        },
                        now,
                    );
                    events.push(RowEvent::PrefetchHint {
                        key: *key,
                        range: ViewportWindow::prefetch_range(
                            &entry.row,
                            cfg.prefetch_items(),
                        ),
                    });
                }
                None => {}
            }

            match entry.refocus.poll(now, cfg, &is_mounted) {
                RefocusPoll::Focus(target) => events.push(RowEvent::FocusItem(target)),
                RefocusPoll::Abandoned(target) => {
                    events.push(RowEvent::RefocusAbandoned(target));
                }
                RefocusPoll::Idle | RefocusPoll::Pending => {}
            }
        }

        events
    }

    fn advance_for_event(
        &mut self,
        key: RowKey,
        direction: Direction,
        cfg: &RuntimeConfig,
        now: Instant,
    ) -> Vec<RowEvent> {
        match self.advance(&key, direction, cfg, now) {
            Ok(plan) => vec![RowEvent::ShiftStarted(key, plan)],
            Err(err) => {
                log::debug!("advance {direction:?} ignored for {key:?}: {err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_row_restores_scroll_memory() {
        let mut registry = RowRegistry::new();
        let key = RowKey::Trending;
        {
            let entry = registry.ensure_row(key, 20, 1024.0);
            entry.row.window.lowest_visible_index = 8;
            entry.row.window.has_moved_once = true;
            entry.row.window.move_direction = Direction::Next;
        }
        registry.remove_row(&key);
        assert!(registry.get(&key).is_none());

        let entry = registry.ensure_row(key, 20, 1024.0);
        assert_eq!(entry.row.window.lowest_visible_index, 8);
        assert!(entry.row.window.has_moved_once);
        assert_eq!(entry.row.window.move_direction, Direction::Next);
    }

    #[test]
    fn test_restored_memory_clamps_to_shrunk_list() {
        let mut registry = RowRegistry::new();
        let key = RowKey::MyList;
        registry
            .ensure_row(key, 20, 1024.0)
            .row
            .window
            .lowest_visible_index = 16;
        registry.remove_row(&key);

        let entry = registry.ensure_row(key, 6, 1024.0);
        assert_eq!(entry.row.window.lowest_visible_index, 2);
    }

    #[test]
    fn test_remove_row_cancels_in_flight_shift() {
        let cfg = RuntimeConfig::default();
        let mut registry = RowRegistry::new();
        let key = RowKey::Trending;
        registry.ensure_row(key, 20, 1024.0);
        registry.advance(&key, Direction::Next, &cfg, Instant::now()).unwrap();

        let row = registry.remove_row(&key).unwrap();
        assert!(!row.window.is_animating);
        // committed index untouched by the aborted shift
        assert_eq!(row.window.lowest_visible_index, 0);
    }

    #[test]
    fn test_active_advance_resolves_through_row_focus() {
        let cfg = RuntimeConfig::default();
        let mut registry = RowRegistry::new();
        let now = Instant::now();
        registry.ensure_row(RowKey::Trending, 20, 1024.0);
        registry.ensure_row(RowKey::MyList, 20, 1024.0);

        // no focus target: nothing happens
        assert!(registry.handle(RowMessage::NextPageActive, &cfg, now).is_empty());

        registry.handle(RowMessage::RowHovered(Some(RowKey::MyList)), &cfg, now);
        let events = registry.handle(RowMessage::NextPageActive, &cfg, now);
        assert!(matches!(
            events.as_slice(),
            [RowEvent::ShiftStarted(RowKey::MyList, _)]
        ));
    }

    #[test]
    fn test_resize_is_debounced_until_tick() {
        let cfg = RuntimeConfig::default();
        let mut registry = RowRegistry::new();
        let t0 = Instant::now();
        registry.ensure_row(RowKey::Trending, 20, 1024.0); // 4 per page

        registry.handle(RowMessage::ViewportResized(1920.0), &cfg, t0);
        // inside the debounce window nothing changes
        let events = registry.tick(
            t0 + std::time::Duration::from_millis(10),
            &cfg,
            |_| true,
        );
        assert!(events.is_empty());
        assert_eq!(registry.get(&RowKey::Trending).unwrap().row.items_per_page, 4);

        let later = t0
            + std::time::Duration::from_millis(cfg.resize_debounce_ms() + 10);
        let events = registry.tick(later, &cfg, |_| true);
        assert_eq!(events, vec![RowEvent::WindowInvalidated(RowKey::Trending)]);
        assert_eq!(registry.get(&RowKey::Trending).unwrap().row.items_per_page, 6);
    }
}
