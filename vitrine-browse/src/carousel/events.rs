//! Interaction messages and engine events for carousel rows.
//!
//! Hosts translate raw input (clicks, key presses, swipes, resizes) into
//! [`RowMessage`]s and apply the returned [`RowEvent`]s to their render
//! layer. The engine never touches the host's widget tree.

use std::ops::Range;

use super::focus::FocusTarget;
use super::offset::ShiftPlan;
use super::types::{Direction, RowKey};

/// Input messages a host feeds into [`super::registry::RowRegistry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowMessage {
    // Navigation
    NextPage(RowKey),
    PrevPage(RowKey),
    // Active-context navigation, resolved through row focus
    NextPageActive,
    PrevPageActive,

    // Focus management
    RowHovered(Option<RowKey>),
    FocusRow(RowKey),
    MouseMoved,

    // Viewport
    ViewportResized(f32),
}

impl RowMessage {
    pub(crate) fn direction(&self) -> Direction {
        match self {
            Self::NextPage(_) | Self::NextPageActive => Direction::Next,
            Self::PrevPage(_) | Self::PrevPageActive => Direction::Prev,
            _ => Direction::None,
        }
    }
}

/// Outputs for the host's render layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    /// A shift began; run the described track animation.
    ShiftStarted(RowKey, ShiftPlan),
    /// In-flight track offset for this frame, percent of the visible page.
    TrackOffset(RowKey, f32),
    /// The shift settled and the window committed; re-window the row and
    /// snap the track to the resting offset.
    ShiftCommitted {
        key: RowKey,
        lowest: usize,
        resting_offset: f32,
    },
    /// Move keyboard focus to this just-revealed item.
    FocusItem(FocusTarget),
    /// The refocus wait timed out; no focus change.
    RefocusAbandoned(FocusTarget),
    /// Page sizing changed (resize); recompute the row's window.
    WindowInvalidated(RowKey),
    /// Warm caches for these indices.
    PrefetchHint { key: RowKey, range: Range<usize> },
}
