//! Runtime configuration for user-adjustable constants
//!
//! Provides a [`RuntimeConfig`] with `Option<T>` fields that override the
//! defaults in [`crate::infra::constants`]. Accessor methods fall back to
//! the constants when `None`, so hosts only set what they tune.

use serde::Deserialize;

use crate::animation::EasingKind;
use crate::infra::constants::{focus, overlay, shift, windows};

/// Runtime configuration with optional overrides for constants.
/// Fields are `None` by default, falling back to compiled constants.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Page shift duration (ms)
    pub shift_duration_ms: Option<u64>,
    /// Resize debounce before items-per-page recomputes (ms)
    pub resize_debounce_ms: Option<u64>,

    /// Overlay open morph duration (ms)
    pub overlay_open_duration_ms: Option<u64>,
    /// Overlay close morph duration (ms)
    pub overlay_close_duration_ms: Option<u64>,
    /// Dwell after cursor exit before a mini card closes (ms)
    pub hover_exit_delay_ms: Option<u64>,
    /// Mini-card size ratio relative to its anchor
    pub mini_scale_factor: Option<f32>,
    /// Minimum gap between an open overlay and the viewport edge (px)
    pub edge_clearance_px: Option<f32>,

    /// Refocus poll interval (ms)
    pub refocus_poll_interval_ms: Option<u64>,
    /// Refocus poll hard timeout (ms)
    pub refocus_timeout_ms: Option<u64>,

    /// Items to prefetch ahead of the realized window
    pub prefetch_items: Option<usize>,
    /// Additional background items beyond prefetch
    pub background_items: Option<usize>,
}

impl RuntimeConfig {
    /// Parse overrides from a JSON document; absent fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn shift_duration_ms(&self) -> u64 {
        self.shift_duration_ms.unwrap_or(shift::DURATION_MS)
    }

    /// Shifts ease out so the landing page settles gently.
    pub fn shift_easing(&self) -> EasingKind {
        EasingKind::EaseOut
    }

    pub fn resize_debounce_ms(&self) -> u64 {
        self.resize_debounce_ms.unwrap_or(shift::RESIZE_DEBOUNCE_MS)
    }

    pub fn overlay_open_duration_ms(&self) -> u64 {
        self.overlay_open_duration_ms
            .unwrap_or(overlay::OPEN_DURATION_MS)
    }

    pub fn overlay_close_duration_ms(&self) -> u64 {
        self.overlay_close_duration_ms
            .unwrap_or(overlay::CLOSE_DURATION_MS)
    }

    pub fn hover_exit_delay_ms(&self) -> u64 {
        self.hover_exit_delay_ms
            .unwrap_or(overlay::HOVER_EXIT_DELAY_MS)
    }

    pub fn mini_scale_factor(&self) -> f32 {
        self.mini_scale_factor.unwrap_or(overlay::MINI_SCALE_FACTOR)
    }

    pub fn edge_clearance_px(&self) -> f32 {
        self.edge_clearance_px.unwrap_or(overlay::EDGE_CLEARANCE_PX)
    }

    pub fn refocus_poll_interval_ms(&self) -> u64 {
        self.refocus_poll_interval_ms
            .unwrap_or(focus::REFOCUS_POLL_INTERVAL_MS)
    }

    pub fn refocus_timeout_ms(&self) -> u64 {
        self.refocus_timeout_ms.unwrap_or(focus::REFOCUS_TIMEOUT_MS)
    }

    pub fn prefetch_items(&self) -> usize {
        self.prefetch_items.unwrap_or(windows::PREFETCH_ITEMS)
    }

    pub fn background_items(&self) -> usize {
        self.background_items.unwrap_or(windows::BACKGROUND_ITEMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fall_back_to_constants() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.shift_duration_ms(), shift::DURATION_MS);
        assert_eq!(cfg.edge_clearance_px(), overlay::EDGE_CLEARANCE_PX);
        assert_eq!(cfg.refocus_timeout_ms(), focus::REFOCUS_TIMEOUT_MS);
    }

    #[test]
    fn test_json_overrides_apply_partially() {
        let cfg = RuntimeConfig::from_json_str(
            r#"{ "shift_duration_ms": 200, "mini_scale_factor": 2.0 }"#,
        )
        .unwrap();
        assert_eq!(cfg.shift_duration_ms(), 200);
        assert_eq!(cfg.mini_scale_factor(), 2.0);
        // Untouched fields keep defaults
        assert_eq!(cfg.overlay_open_duration_ms(), overlay::OPEN_DURATION_MS);
    }
}
