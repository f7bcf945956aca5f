//! Collaborator seams.
//!
//! The engine never reaches into the host's widget tree, network stack, or
//! router. Everything it needs from the outside world comes through the
//! handles here, passed down by composition: a content source for overlay
//! body data, a layout handle for the scroll/marker side effects, and a
//! routing sink for the shareable location.

pub mod content;
pub mod layout;
pub mod routing;

pub use content::{ContentHandle, ContentSource};
pub use layout::LayoutHandle;
pub use routing::RoutingSink;

use vitrine_core::ModalRegistry;

use crate::modal::machine::ModalEffect;

/// Apply one event's effect list through the injected collaborators, in
/// order. Returns true when the overlay reached its terminal state and
/// should unmount.
pub fn apply_modal_effects(
    effects: &[ModalEffect],
    key: vitrine_core::ModalKey,
    registry: &ModalRegistry,
    layout: &mut dyn LayoutHandle,
    routing: &mut dyn RoutingSink,
) -> bool {
    let mut dismissed = false;
    for effect in effects {
        match *effect {
            ModalEffect::SuppressTooltips => layout.set_tooltips_suppressed(true),
            ModalEffect::RestoreTooltips => layout.set_tooltips_suppressed(false),
            ModalEffect::LockPageScroll { .. } => layout.lock_scroll(),
            ModalEffect::RestorePageScroll { offset } => {
                layout.unlock_scroll();
                layout.restore_scroll(offset);
            }
            ModalEffect::SetDetailOpenMarker(open) => layout.set_detail_open(open),
            ModalEffect::ReflectRoute(target) => routing.reflect(target),
            ModalEffect::ClearScrollLock => layout.clear_scroll_lock(),
            ModalEffect::CloseRecord { without_animation } => {
                registry.close(key, without_animation);
            }
            ModalEffect::RemoveRecord => registry.remove(key),
            ModalEffect::Dismissed => dismissed = true,
        }
    }
    dismissed
}
