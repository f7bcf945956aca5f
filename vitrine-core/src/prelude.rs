//! Convenience re-exports for consumers of the core types.

pub use crate::error::{CoreError, Result as CoreResult};
pub use crate::geometry::{Point, Rect};
pub use crate::ids::{MediaId, MediaType, ModalKey};
pub use crate::record::{AnchorRect, ModalKind, ModalRecord};
pub use crate::registry::{ModalRegistry, RegistrySnapshot, Subscription};
