//! Virtualized, loop-capable carousel rows.
//!
//! A row is a horizontally scrolling strip of media items. Only a bounded
//! window of items is ever realized; the rest of the track is placeholders,
//! and with looping enabled the track is padded with wrap-around copies so
//! the strip appears endless. Structure mirrors the split between state,
//! windowing, offset math, classification, focus, and the keyed registry.

pub mod classify;
pub mod events;
pub mod focus;
pub mod offset;
pub mod registry;
pub mod state;
pub mod types;
pub mod window;

pub use classify::ItemPositionClassifier;
pub use events::{RowEvent, RowMessage};
pub use focus::{FocusCoordinator, RowFocus};
pub use offset::{OffsetAnimator, ShiftPlan, ShiftUpdate};
pub use registry::{RowRegistry, RowScrollMemory};
pub use state::{CarouselRow, WindowState};
pub use types::*;
pub use window::ViewportWindow;
