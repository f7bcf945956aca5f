//! Layout collaborator.
//!
//! A narrow handle over the host's layout root. The engine only ever
//! toggles the detail-open marker, suppresses tooltips, and reads or
//! restores scroll through it; it never traverses the host's tree.

pub trait LayoutHandle {
    /// Current vertical page scroll.
    fn scroll_position(&self) -> f32;

    /// Prevent the page behind an open detail panel from scrolling.
    fn lock_scroll(&mut self);

    fn unlock_scroll(&mut self);

    /// Restore a previously saved scroll offset.
    fn restore_scroll(&mut self, offset: f32);

    /// Remove any global scroll-lock style (Escape / close-all).
    fn clear_scroll_lock(&mut self);

    /// Mark or unmark the layout root as having a detail panel open.
    fn set_detail_open(&mut self, open: bool);

    /// Disable hover tooltips while overlay morphs animate.
    fn set_tooltips_suppressed(&mut self, suppressed: bool);
}
