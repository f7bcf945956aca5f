//! Per-item modal records.
//!
//! A record is created when an open is requested, mutated on transitions,
//! and reset on close. The record carries everything the state machine needs
//! to replay the open geometry: the anchor snapshot and the close policy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;
use crate::geometry::Rect;
use crate::ids::ModalKey;

/// Bounding box of the grid item a modal morphs from, captured together
/// with the page scroll offset at the moment the open was requested. The
/// pair is what makes the morph stable while the page scrolls underneath.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    pub rect: Rect,
    /// Vertical page scroll at capture time.
    pub scroll_y: f32,
}

impl AnchorRect {
    pub fn new(rect: Rect, scroll_y: f32) -> Self {
        Self { rect, scroll_y }
    }
}

/// The two overlay tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalKind {
    /// Compact overlay anchored to a grid item.
    Mini,
    /// Full panel view, optionally anchored.
    Detail,
}

impl FromStr for ModalKind {
    type Err = CoreError;

    /// Parse boundary for records arriving from outside the process. An
    /// unknown kind is a programming error on the caller's side and aborts
    /// construction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mini" => Ok(Self::Mini),
            "detail" => Ok(Self::Detail),
            other => Err(CoreError::InvalidKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ModalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mini => write!(f, "mini"),
            Self::Detail => write!(f, "detail"),
        }
    }
}

/// One open/closed modal record, keyed by item. Multiple Mini records may
/// coexist; callers keep at most one Detail record logically active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalRecord {
    pub key: ModalKey,
    pub is_open: bool,
    pub kind: ModalKind,
    pub anchor_rect: Option<AnchorRect>,
    /// When set, any close skips straight to the hidden state with a
    /// zero-duration transition.
    pub close_without_animation: bool,
}

impl ModalRecord {
    /// A freshly opened record.
    pub fn open(key: ModalKey, kind: ModalKind, anchor_rect: Option<AnchorRect>) -> Self {
        Self {
            key,
            is_open: true,
            kind,
            anchor_rect,
            close_without_animation: false,
        }
    }
}
