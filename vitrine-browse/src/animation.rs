//! Time-based tween with an explicit settled signal.
//!
//! The engine is tick-driven: the host calls [`Tween::tick`] once per frame
//! and the tween reports `Settled` exactly once, on the tick that crosses
//! the end of the duration. Phase and window commits hang off that signal,
//! never off a timer, so each phase paints before the next begins.

use std::time::{Duration, Instant};

/// Easing function type for animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingKind {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingKind {
    /// Apply the easing curve to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

impl std::fmt::Display for EasingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::EaseIn => write!(f, "Ease In"),
            Self::EaseOut => write!(f, "Ease Out"),
            Self::EaseInOut => write!(f, "Ease In/Out"),
        }
    }
}

/// Progress report from a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenProgress {
    /// Animation still in flight; value is the current interpolated offset.
    Animating(f32),
    /// The tick that completed the animation. Emitted once; subsequent
    /// ticks return `None`.
    Settled(f32),
}

/// Instant-based value tween.
#[derive(Debug, Clone)]
pub struct Tween {
    active: bool,
    start: f32,
    target: f32,
    started_at: Instant,
    duration: Duration,
    easing: EasingKind,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            active: false,
            start: 0.0,
            target: 0.0,
            started_at: Instant::now(),
            duration: Duration::from_millis(0),
            easing: EasingKind::EaseOut,
        }
    }
}

impl Tween {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn start(
        &mut self,
        now: Instant,
        from: f32,
        target: f32,
        duration_ms: u64,
        easing: EasingKind,
    ) {
        self.active = true;
        self.start = from;
        self.target = target;
        self.started_at = now;
        self.duration = Duration::from_millis(duration_ms);
        self.easing = easing;
    }

    /// Advance the tween. Returns `None` when inactive. A zero-duration
    /// tween settles on its first tick.
    pub fn tick(&mut self, now: Instant) -> Option<TweenProgress> {
        if !self.active {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            self.active = false;
            return Some(TweenProgress::Settled(self.target));
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        let eased = self.easing.apply(t);
        Some(TweenProgress::Animating(
            self.start + (self.target - self.start) * eased,
        ))
    }

    /// Cancel the current animation immediately. No settled signal fires.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}
