//! The overlay lifecycle state machine.
//!
//! One machine instance drives one open session of a mini card or detail
//! panel. It consumes the item's modal record, owns the anchor snapshot
//! for the session, and produces a transform plus a list of side-effect
//! commands per event. The machine performs no I/O: hosts apply the
//! effects through the collaborator handles in [`crate::interop`] and
//! report animation completion back via [`ModalStateMachine::on_settled`].

use std::time::{Duration, Instant};

use vitrine_core::{AnchorRect, MediaId, MediaType, ModalKey, ModalKind, ModalRecord, Point, Rect};

use crate::config::RuntimeConfig;

use super::geometry::{GeometryBridge, PhaseTransform, ViewEnv};
use super::phase::{self, ModalPhase, PhaseInputs};

/// What the routing collaborator is offered when a detail panel opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTarget {
    pub id: MediaId,
    pub media_type: MediaType,
}

/// Side-effect commands emitted at transition boundaries. The host applies
/// them in order through its collaborator handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalEffect {
    /// Disable hover tooltips while a morph is animating.
    SuppressTooltips,
    /// Re-enable tooltips once the morph settles.
    RestoreTooltips,
    /// Detail opened: remember this scroll offset and lock body scroll.
    LockPageScroll { saved_offset: f32 },
    /// Detail dismissed: restore the remembered scroll offset.
    RestorePageScroll { offset: f32 },
    /// Toggle the layout root's "detail open" attribute.
    SetDetailOpenMarker(bool),
    /// Reflect (or clear) the open item in the shareable location.
    ReflectRoute(Option<RouteTarget>),
    /// Escape/close-all: clear any global scroll-lock style.
    ClearScrollLock,
    /// Mirror this close into the modal registry record.
    CloseRecord { without_animation: bool },
    /// Remove the registry record after the overlay hides.
    RemoveRecord,
    /// The overlay reached its terminal state; unmount it.
    Dismissed,
}

/// Result of one machine event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MachineOutput {
    /// Transform the renderer should animate to, if this event produced one.
    pub transform: Option<PhaseTransform>,
    pub effects: Vec<ModalEffect>,
}

impl MachineOutput {
    fn none() -> Self {
        Self::default()
    }

    fn merge(mut self, other: Self) -> Self {
        if other.transform.is_some() {
            self.transform = other.transform;
        }
        self.effects.extend(other.effects);
        self
    }
}

/// Finite-state machine for one overlay session.
#[derive(Debug)]
pub struct ModalStateMachine {
    key: ModalKey,
    kind: ModalKind,
    /// Owned for the session; discarded with the machine on close.
    anchor: Option<AnchorRect>,
    route: Option<RouteTarget>,
    bridge: GeometryBridge,
    hover_exit_delay: Duration,

    phase: ModalPhase,
    measured_rect: Option<Rect>,
    is_open: bool,
    close_without_animation: bool,
    painted: bool,
    animating: bool,
    hover_exit_deadline: Option<Instant>,
    pointer_recovery_armed: bool,
    saved_scroll: Option<f32>,
}

impl ModalStateMachine {
    /// Build a machine for a freshly opened record. The record's kind is
    /// already a checked enum; records arriving over a wire boundary are
    /// validated when parsed (`ModalKind::from_str`), where an unknown
    /// kind aborts construction.
    pub fn new(record: &ModalRecord, route: Option<RouteTarget>, cfg: &RuntimeConfig) -> Self {
        Self {
            key: record.key,
            kind: record.kind,
            anchor: record.anchor_rect,
            route,
            bridge: GeometryBridge::from_config(cfg),
            hover_exit_delay: Duration::from_millis(cfg.hover_exit_delay_ms()),
            phase: ModalPhase::initial(record.kind),
            measured_rect: None,
            is_open: record.is_open,
            close_without_animation: record.close_without_animation,
            painted: false,
            animating: false,
            hover_exit_deadline: None,
            pointer_recovery_armed: false,
            saved_scroll: None,
        }
    }

    pub fn key(&self) -> ModalKey {
        self.key
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_dismissed(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The overlay's own rect was measured (or re-measured) by layout.
    /// The first measurement triggers the initial zero-duration paint.
    pub fn set_measured(&mut self, rect: Rect, env: &ViewEnv) -> MachineOutput {
        self.measured_rect = Some(rect);
        if self.painted || self.phase.is_terminal() {
            return MachineOutput::none();
        }
        self.painted = true;
        self.animating = true;
        MachineOutput {
            transform: Some(self.bridge.reset(
                self.anchor.as_ref(),
                self.measured_rect.as_ref(),
                env,
            )),
            effects: vec![ModalEffect::SuppressTooltips],
        }
    }

    /// The renderer finished animating the last transform. This is the
    /// only place phases chain, so each phase paints before the next.
    pub fn on_settled(&mut self, env: &ViewEnv) -> MachineOutput {
        self.animating = false;
        let inputs = PhaseInputs {
            is_open: self.is_open,
            close_without_animation: self.close_without_animation,
            measured: self.measured_rect.is_some(),
        };
        let next = phase::next_phase(self.phase, &inputs);
        if next == self.phase {
            if self.phase == ModalPhase::Open {
                // The open morph just settled.
                if self.kind == ModalKind::Mini {
                    self.pointer_recovery_armed = true;
                }
                return MachineOutput {
                    transform: None,
                    effects: vec![ModalEffect::RestoreTooltips],
                };
            }
            return MachineOutput::none();
        }
        self.enter(next, env)
    }

    /// Explicit close request from the host (close button, navigate-away,
    /// hover timeout). Mirrored into the registry via `CloseRecord`.
    pub fn request_close(&mut self, without_animation: bool, env: &ViewEnv) -> MachineOutput {
        if !self.is_open || self.phase.is_terminal() {
            return MachineOutput::none();
        }
        self.begin_close(without_animation);
        let mut output = MachineOutput {
            transform: None,
            effects: vec![ModalEffect::CloseRecord { without_animation }],
        };
        output = output.merge(self.route_close(env));
        output
    }

    /// The registry record changed (observed via subscription). `None`
    /// means the record was removed outright.
    pub fn on_record_change(
        &mut self,
        record: Option<&ModalRecord>,
        env: &ViewEnv,
    ) -> MachineOutput {
        match record {
            None => {
                if self.phase.is_terminal() {
                    return MachineOutput::none();
                }
                // Record yanked externally: nothing left to animate against.
                self.begin_close(true);
                self.route_close(env)
            }
            Some(r) => {
                self.anchor = r.anchor_rect.or(self.anchor);
                if !r.is_open && self.is_open {
                    self.begin_close(r.close_without_animation);
                    return self.route_close(env);
                }
                self.close_without_animation = r.close_without_animation;
                MachineOutput::none()
            }
        }
    }

    /// Cursor re-entered the anchor or the card: cancel a pending close.
    pub fn on_hover_enter(&mut self) {
        self.hover_exit_deadline = None;
    }

    /// Cursor left the card/anchor pair; the card closes after a dwell.
    pub fn on_hover_exit(&mut self, now: Instant) {
        if self.kind == ModalKind::Mini && !self.phase.is_terminal() {
            self.hover_exit_deadline = Some(now + self.hover_exit_delay);
        }
    }

    /// Frame tick: fires a due hover-exit close. The resulting phase
    /// change still waits for its animation like any other.
    pub fn tick(&mut self, now: Instant, env: &ViewEnv) -> MachineOutput {
        if self.hover_exit_deadline.is_some_and(|d| now >= d) {
            self.hover_exit_deadline = None;
            return self.request_close(false, env);
        }
        MachineOutput::none()
    }

    /// Viewport resized: a mini card's geometry is stale, drop it at once.
    pub fn on_resize(&mut self, env: &ViewEnv) -> MachineOutput {
        if self.kind == ModalKind::Mini {
            return self.request_close(true, env);
        }
        MachineOutput::none()
    }

    /// Tab went hidden: mini cards don't outlive visibility.
    pub fn on_visibility_hidden(&mut self, env: &ViewEnv) -> MachineOutput {
        if self.kind == ModalKind::Mini {
            return self.request_close(true, env);
        }
        MachineOutput::none()
    }

    /// Recovery for a stuck mini card: once armed (open settled), any
    /// pointer movement outside both the anchor and the card closes it.
    pub fn on_pointer_move(&mut self, pointer: Point, env: &ViewEnv) -> MachineOutput {
        if !self.pointer_recovery_armed
            || self.kind != ModalKind::Mini
            || self.phase != ModalPhase::Open
        {
            return MachineOutput::none();
        }
        let inside_anchor = self
            .anchor
            .is_some_and(|a| a.rect.contains(pointer));
        let inside_modal = self
            .measured_rect
            .is_some_and(|m| m.contains(pointer));
        if inside_anchor || inside_modal {
            return MachineOutput::none();
        }
        self.pointer_recovery_armed = false;
        self.request_close(false, env)
    }

    /// Escape (or "close all"): close and additionally clear any global
    /// scroll-lock style left behind.
    pub fn on_escape(&mut self, env: &ViewEnv) -> MachineOutput {
        let mut output = self.request_close(false, env);
        output.effects.push(ModalEffect::ClearScrollLock);
        output
    }

    fn begin_close(&mut self, without_animation: bool) {
        self.is_open = false;
        self.close_without_animation = without_animation;
        self.hover_exit_deadline = None;
        self.pointer_recovery_armed = false;
    }

    // Route a freshly requested close: short-circuit immediately, start
    // the close morph if nothing is animating, or let the in-flight morph
    // settle first.
    fn route_close(&mut self, env: &ViewEnv) -> MachineOutput {
        if self.close_without_animation {
            return self.enter(ModalPhase::Hidden, env);
        }
        if self.animating {
            return MachineOutput::none();
        }
        self.enter(ModalPhase::Close, env)
    }

    fn enter(&mut self, next: ModalPhase, env: &ViewEnv) -> MachineOutput {
        log::debug!("modal {} {:?}: {:?} -> {next:?}", self.key, self.kind, self.phase);
        self.phase = next;
        match next {
            ModalPhase::Open => {
                self.animating = true;
                let mut effects = Vec::new();
                if self.kind == ModalKind::Detail {
                    self.saved_scroll = Some(env.scroll_y);
                    effects.push(ModalEffect::LockPageScroll {
                        saved_offset: env.scroll_y,
                    });
                    effects.push(ModalEffect::SetDetailOpenMarker(true));
                    effects.push(ModalEffect::ReflectRoute(self.route));
                }
                MachineOutput {
                    transform: Some(self.bridge.open(
                        self.anchor.as_ref(),
                        self.measured_rect.as_ref(),
                        env,
                    )),
                    effects,
                }
            }
            ModalPhase::Close => {
                self.animating = true;
                MachineOutput {
                    transform: Some(self.bridge.close(
                        self.anchor.as_ref(),
                        self.measured_rect.as_ref(),
                        env,
                        false,
                    )),
                    effects: vec![ModalEffect::SuppressTooltips],
                }
            }
            ModalPhase::Hidden => {
                self.animating = false;
                let mut effects = vec![ModalEffect::RestoreTooltips];
                if self.kind == ModalKind::Detail {
                    if let Some(offset) = self.saved_scroll.take() {
                        effects.push(ModalEffect::RestorePageScroll { offset });
                    }
                    effects.push(ModalEffect::SetDetailOpenMarker(false));
                    effects.push(ModalEffect::ReflectRoute(None));
                }
                effects.push(ModalEffect::RemoveRecord);
                effects.push(ModalEffect::Dismissed);
                MachineOutput {
                    transform: Some(self.bridge.hidden()),
                    effects,
                }
            }
            // Initial phases are only ever entered at construction.
            ModalPhase::Reset | ModalPhase::Mount => MachineOutput::none(),
        }
    }
}
