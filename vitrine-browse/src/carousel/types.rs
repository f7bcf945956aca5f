//! Shared types for the carousel module

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_core::{MediaId, Rect};

/// Unique key for identifying rows throughout the browse screen.
/// A strongly-typed key avoids brittle string matching and scopes state
/// per row instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Trending,
    NewReleases,
    MyList,
    Genre(Uuid),
    Library(Uuid),
    Custom(&'static str),
}

/// Direction of the most recent (or in-flight) shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Prev,
    Next,
}

/// Viewport role of a realized item.
///
/// Edge items sit at the window boundary, peek items just outside it,
/// middle items in the interior. Items beyond the peeks carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPosition {
    LeftEdge,
    LeftPeek,
    RightPeek,
    RightEdge,
    Middle,
    #[default]
    None,
}

/// Which end of the track a wrap-around copy pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloneTag {
    /// Prepended before index 0 (copies of the last items).
    Leading,
    /// Appended after the last index (copies of the first items).
    Trailing,
}

/// Composite identity of one track slot. Wrap-around copies share the data
/// identity of their source item but carry a distinguishing clone tag so
/// renderers key them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemUid {
    pub row: RowKey,
    pub data_index: usize,
    pub data_id: MediaId,
    pub clone: Option<CloneTag>,
}

impl ItemUid {
    pub fn new(row: RowKey, data_index: usize, data_id: MediaId) -> Self {
        Self {
            row,
            data_index,
            data_id,
            clone: None,
        }
    }

    pub fn wrap_clone(mut self, tag: CloneTag) -> Self {
        self.clone = Some(tag);
        self
    }

    pub fn is_clone(&self) -> bool {
        self.clone.is_some()
    }
}

impl std::fmt::Display for ItemUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}:{}:{}", self.row, self.data_index, self.data_id)?;
        match self.clone {
            Some(CloneTag::Leading) => write!(f, ":cloneL"),
            Some(CloneTag::Trailing) => write!(f, ":cloneR"),
            None => Ok(()),
        }
    }
}

/// One realized item in the current render pass.
///
/// `measured_rect` is populated by the host after layout and never
/// persisted beyond the current window.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    pub data_index: usize,
    pub uid: ItemUid,
    pub position: ItemPosition,
    pub tabbable: bool,
    pub in_viewport: bool,
    pub measured_rect: Option<Rect>,
}

impl RenderedItem {
    pub fn new(uid: ItemUid) -> Self {
        Self {
            data_index: uid.data_index,
            uid,
            position: ItemPosition::None,
            tabbable: false,
            in_viewport: false,
            measured_rect: None,
        }
    }
}

/// One track position handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderSlot {
    /// A realized data item.
    Data(RenderedItem),
    /// A wrap-around padding copy (looping rows only).
    WrapClone(RenderedItem),
    /// Inert filler sized to the per-item width.
    Placeholder { width_pct: f32 },
}

impl RenderSlot {
    pub fn as_item(&self) -> Option<&RenderedItem> {
        match self {
            Self::Data(item) | Self::WrapClone(item) => Some(item),
            Self::Placeholder { .. } => None,
        }
    }

    pub fn as_item_mut(&mut self) -> Option<&mut RenderedItem> {
        match self {
            Self::Data(item) | Self::WrapClone(item) => Some(item),
            Self::Placeholder { .. } => None,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
}
