//! Two-tier preview overlay: mini hover cards and the detail panel.
//!
//! The state machine consumes modal records (see `vitrine-core`), pulls
//! the anchor rect captured by the carousel's classifier, and drives the
//! geometry bridge to produce a transform per phase. Phases advance only
//! on animation-settled signals so every phase paints before the next.

pub mod geometry;
pub mod machine;
pub mod phase;

pub use geometry::{GeometryBridge, PhaseTransform, ViewEnv};
pub use machine::{MachineOutput, ModalEffect, ModalStateMachine, RouteTarget};
pub use phase::{ModalPhase, PhaseInputs};
