//! # Vitrine Core
//!
//! Foundation crate for the Vitrine browse engine, providing the types shared
//! between the carousel/modal engine and its host application.
//!
//! ## Overview
//!
//! `vitrine-core` deliberately contains no animation or windowing logic. It
//! offers:
//!
//! - **Geometry**: plain `Rect`/`Point` primitives and the `AnchorRect`
//!   snapshot a modal morphs from and back to
//! - **Identifiers**: strongly typed media ids and modal keys
//! - **Modal records**: the per-item open/closed record consumed by the
//!   modal state machine
//! - **Modal registry**: a process-wide keyed store of modal records with an
//!   immutable-snapshot subscribe/notify contract
//!
//! The registry is injected into consumers as a handle; nothing in this
//! crate is an ambient singleton.

pub mod error;
pub mod geometry;
pub mod ids;
pub mod record;
pub mod registry;

pub mod prelude;

pub use error::{CoreError, Result};
pub use geometry::{Point, Rect};
pub use ids::{MediaId, MediaType, ModalKey};
pub use record::{AnchorRect, ModalKind, ModalRecord};
pub use registry::{ModalRegistry, RegistrySnapshot, Subscription};
