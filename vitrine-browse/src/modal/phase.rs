//! Overlay phases and the pure transition function.
//!
//! A phase is never persisted; it is advanced by the state machine on each
//! animation-settled signal from the pure function here, which makes the
//! sequencing unit-testable without any rendering.

use vitrine_core::ModalKind;

/// Lifecycle phase of one overlay.
///
/// Mini overlays begin at `Reset`, detail panels at `Mount`; both share
/// the `Open -> Close -> Hidden` tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Mini initial paint: covering its anchor, invisible.
    Reset,
    /// Detail initial paint.
    Mount,
    /// Fully opened (or opening).
    Open,
    /// Morphing back toward the anchor (or fading out).
    Close,
    /// Terminal: invisible, ready to unmount.
    Hidden,
}

impl ModalPhase {
    /// Entry phase for a freshly mounted overlay of the given kind.
    pub fn initial(kind: ModalKind) -> Self {
        match kind {
            ModalKind::Mini => Self::Reset,
            ModalKind::Detail => Self::Mount,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Hidden
    }
}

/// Record-derived facts the transition function consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseInputs {
    /// The record still wants this overlay open.
    pub is_open: bool,
    /// Any close skips animation entirely.
    pub close_without_animation: bool,
    /// The overlay's own rect has been measured.
    pub measured: bool,
}

/// Next phase after the current one settles.
pub fn next_phase(phase: ModalPhase, inputs: &PhaseInputs) -> ModalPhase {
    // The short-circuit wins from any phase.
    if !inputs.is_open && inputs.close_without_animation {
        return ModalPhase::Hidden;
    }
    match phase {
        ModalPhase::Reset | ModalPhase::Mount => {
            if !inputs.is_open {
                ModalPhase::Close
            } else if inputs.measured {
                ModalPhase::Open
            } else {
                // Still waiting on layout; stay put.
                phase
            }
        }
        ModalPhase::Open => {
            if inputs.is_open {
                ModalPhase::Open
            } else {
                ModalPhase::Close
            }
        }
        ModalPhase::Close => ModalPhase::Hidden,
        ModalPhase::Hidden => ModalPhase::Hidden,
    }
}
