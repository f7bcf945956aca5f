//! Geometry bridge between an anchor rect and an overlay's measured rect.
//!
//! All outputs are relative transforms: the renderer keeps the overlay at
//! its natural layout position and applies translate/scale/opacity on top.
//! Anchored variants morph the overlay so it exactly covers its anchor at
//! `1 / scale_factor` scale; unanchored variants fall back to fixed scale
//! values. Every function tolerates missing measurements by degrading to
//! the unanchored variant, never by failing.

use vitrine_core::{AnchorRect, Rect};

use crate::animation::EasingKind;
use crate::config::RuntimeConfig;
use crate::infra::constants::overlay;

/// Host-view facts a transform depends on besides the rects themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewEnv {
    /// Current vertical page scroll.
    pub scroll_y: f32,
    /// Current viewport width.
    pub viewport_width: f32,
}

/// One phase's target transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub opacity: f32,
    pub duration_ms: u64,
    pub easing: EasingKind,
}

impl PhaseTransform {
    /// An instantaneous transform (initial paints, short-circuits).
    fn immediate(scale: f32, opacity: f32) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: scale,
            scale_y: scale,
            opacity,
            duration_ms: 0,
            easing: EasingKind::EaseOut,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Computes scale/translate deltas between an anchor rect and the
/// overlay's own measured rect.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBridge {
    scale_factor: f32,
    edge_clearance: f32,
    open_duration_ms: u64,
    close_duration_ms: u64,
}

impl GeometryBridge {
    pub fn from_config(cfg: &RuntimeConfig) -> Self {
        Self {
            scale_factor: cfg.mini_scale_factor(),
            edge_clearance: cfg.edge_clearance_px(),
            open_duration_ms: cfg.overlay_open_duration_ms(),
            close_duration_ms: cfg.overlay_close_duration_ms(),
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Natural (unscaled-phase) size of a mini card for a given anchor.
    /// The card lays out at this size and the reset phase shrinks it back
    /// over the anchor.
    pub fn mini_natural_size(&self, anchor: &AnchorRect) -> (f32, f32) {
        (
            anchor.rect.width * self.scale_factor,
            anchor.rect.height * self.scale_factor,
        )
    }

    /// Initial paint: centered over the anchor at inverse scale, invisible,
    /// zero duration. Unanchored overlays rest at their fixed layout slot.
    pub fn reset(
        &self,
        anchor: Option<&AnchorRect>,
        modal: Option<&Rect>,
        env: &ViewEnv,
    ) -> PhaseTransform {
        match self.anchored(anchor, modal) {
            Some((anchor, modal)) => {
                let (tx, ty) = self.cover_deltas(anchor, modal, env);
                PhaseTransform {
                    translate_x: tx,
                    translate_y: ty,
                    scale_x: 1.0 / self.scale_factor,
                    scale_y: 1.0 / self.scale_factor,
                    opacity: 0.0,
                    duration_ms: 0,
                    easing: EasingKind::EaseOut,
                }
            }
            None => PhaseTransform::immediate(overlay::UNANCHORED_SCALE, 0.0),
        }
    }

    /// Open morph: full scale, fully visible, shifted horizontally when
    /// the anchor sits within the edge clearance of either viewport side.
    pub fn open(
        &self,
        anchor: Option<&AnchorRect>,
        modal: Option<&Rect>,
        env: &ViewEnv,
    ) -> PhaseTransform {
        let translate_x = match self.anchored(anchor, modal) {
            Some((anchor, modal)) => self.edge_shift(anchor, modal, env),
            None => 0.0,
        };
        PhaseTransform {
            translate_x,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            duration_ms: self.open_duration_ms,
            easing: EasingKind::EaseOut,
        }
    }

    /// Close morph: mirrors the open geometry back toward the anchor. A
    /// `without_animation` close skips straight to hidden.
    pub fn close(
        &self,
        anchor: Option<&AnchorRect>,
        modal: Option<&Rect>,
        env: &ViewEnv,
        without_animation: bool,
    ) -> PhaseTransform {
        if without_animation {
            return self.hidden();
        }
        match self.anchored(anchor, modal) {
            Some((anchor, modal)) => {
                let (tx, ty) = self.cover_deltas(anchor, modal, env);
                PhaseTransform {
                    translate_x: tx,
                    translate_y: ty,
                    scale_x: 1.0 / self.scale_factor,
                    scale_y: 1.0 / self.scale_factor,
                    opacity: 0.0,
                    duration_ms: self.close_duration_ms,
                    easing: EasingKind::EaseOut,
                }
            }
            None => PhaseTransform {
                translate_x: 0.0,
                translate_y: 0.0,
                scale_x: overlay::UNANCHORED_SCALE,
                scale_y: overlay::UNANCHORED_SCALE,
                opacity: 0.0,
                duration_ms: self.close_duration_ms,
                easing: EasingKind::EaseOut,
            },
        }
    }

    /// Terminal state: invisible, instantaneous.
    pub fn hidden(&self) -> PhaseTransform {
        PhaseTransform::immediate(1.0, 0.0)
    }

    // Anchored math requires both rects and a usable measurement.
    fn anchored<'a>(
        &self,
        anchor: Option<&'a AnchorRect>,
        modal: Option<&'a Rect>,
    ) -> Option<(&'a AnchorRect, &'a Rect)> {
        match (anchor, modal) {
            (Some(a), Some(m)) if !m.is_degenerate() && !a.rect.is_degenerate() => {
                Some((a, m))
            }
            _ => {
                log::trace!("geometry unavailable, using unanchored variant");
                None
            }
        }
    }

    // Translate deltas that center the overlay over the anchor, with the
    // anchor's captured position corrected for scroll since capture.
    fn cover_deltas(&self, anchor: &AnchorRect, modal: &Rect, env: &ViewEnv) -> (f32, f32) {
        let scrolled_since_capture = env.scroll_y - anchor.scroll_y;
        let anchor_center = anchor.rect.center();
        let modal_center = modal.center();
        (
            anchor_center.x - modal_center.x,
            (anchor_center.y - scrolled_since_capture) - modal_center.y,
        )
    }

    // Horizontal shift keeping the opened overlay clear of the viewport
    // edges when its anchor hugs one.
    fn edge_shift(&self, anchor: &AnchorRect, modal: &Rect, env: &ViewEnv) -> f32 {
        let near_left = anchor.rect.left < self.edge_clearance;
        let near_right =
            anchor.rect.right() > env.viewport_width - self.edge_clearance;
        if near_left {
            self.edge_clearance - modal.left
        } else if near_right {
            (env.viewport_width - self.edge_clearance) - modal.right()
        } else {
            0.0
        }
    }
}
