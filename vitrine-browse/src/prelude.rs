//! Convenience re-exports for hosts embedding the browse engine.

pub use crate::animation::{EasingKind, Tween, TweenProgress};
pub use crate::carousel::{
    CarouselRow, Direction, FocusCoordinator, ItemPosition, ItemPositionClassifier,
    ItemUid, OffsetAnimator, RenderSlot, RenderedItem, RowEvent, RowFocus, RowKey,
    RowMessage, RowRegistry, RowScrollMemory, ShiftPlan, ShiftUpdate, ViewportWindow,
    WindowState,
};
pub use crate::carousel::focus::{FocusTarget, RefocusPoll};
pub use crate::config::RuntimeConfig;
pub use crate::error::{BrowseError, Result as BrowseResult};
pub use crate::interop::{ContentHandle, ContentSource, LayoutHandle, RoutingSink};
pub use crate::modal::{
    GeometryBridge, MachineOutput, ModalEffect, ModalPhase, ModalStateMachine,
    PhaseTransform, RouteTarget, ViewEnv,
};

pub use vitrine_core::prelude::*;
