//! Per-client zoom/pan state and the operations that mutate it.
//!
//! The viewport is display-only: it changes how screen pixels map to base
//! coordinates and back, never what is stored. It is owned by one client and
//! never synchronized.
//!
//! Focus coordinates passed to [`ViewportController::zoom_at`] and the pinch
//! protocol are measured in screen pixels *relative to the center of the
//! rendered canvas rect*. That frame matches the coordinate mapper, which
//! applies `offset` around the rect center, so a zoom around a focus point
//! keeps the base-resolution point under that screen point fixed.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MAX_SCALE, MIN_SCALE, SCROLL_SENSITIVITY, ZOOM_INCREMENT};

/// Zoom/pan transform applied for display only.
///
/// `offset_x` / `offset_y` are in screen pixels, relative to the rect center.
/// `scale` is a factor (1.0 = 100%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

/// Tuning knobs for viewport operations.
#[derive(Debug, Clone, Copy)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub scroll_sensitivity: f64,
    pub zoom_increment: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            scroll_sensitivity: SCROLL_SENSITIVITY,
            zoom_increment: ZOOM_INCREMENT,
        }
    }
}

/// Baseline captured at the start of (or during) a pinch gesture.
#[derive(Debug, Clone, Copy)]
struct PinchBaseline {
    distance: f64,
}

/// Owns a client's [`Viewport`] and applies gesture-driven updates.
///
/// Clamping keeps `scale` inside `[min_scale, max_scale]`, so a non-positive
/// scale cannot be produced by any operation.
#[derive(Debug)]
pub struct ViewportController {
    pub viewport: Viewport,
    config: ViewportConfig,
    pinch: Option<PinchBaseline>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self { viewport: Viewport::default(), config, pinch: None }
    }

    /// Adjust scale by `delta_scale`, keeping the base point under the focus
    /// screen point fixed. Focus is relative to the rect center.
    ///
    /// At a clamp boundary the call is a no-op, offsets included.
    pub fn zoom_at(&mut self, delta_scale: f64, focus_x: f64, focus_y: f64) {
        let new_scale = (self.viewport.scale + delta_scale).clamp(self.config.min_scale, self.config.max_scale);
        self.apply_focused_scale(new_scale, focus_x, focus_y);
    }

    /// Step zoom in by the configured increment, centered on the current view.
    pub fn zoom_in(&mut self) {
        let new_scale = (self.viewport.scale * (1.0 + self.config.zoom_increment))
            .clamp(self.config.min_scale, self.config.max_scale);
        self.apply_focused_scale(new_scale, 0.0, 0.0);
    }

    /// Step zoom out by the configured increment, centered on the current view.
    pub fn zoom_out(&mut self) {
        let new_scale = (self.viewport.scale * (1.0 - self.config.zoom_increment))
            .clamp(self.config.min_scale, self.config.max_scale);
        self.apply_focused_scale(new_scale, 0.0, 0.0);
    }

    /// Translate the view by a screen-pixel delta.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.viewport.offset_x += delta_x;
        self.viewport.offset_y += delta_y;
    }

    /// Return to 100% zoom with no offset.
    pub fn reset(&mut self) {
        self.viewport = Viewport::default();
    }

    /// Zoom from a wheel delta, focused on the cursor position
    /// (rect-center-relative). Positive `delta_y` (scroll down) zooms out.
    pub fn wheel(&mut self, delta_y: f64, focus_x: f64, focus_y: f64) {
        self.zoom_at(-delta_y * self.config.scroll_sensitivity, focus_x, focus_y);
    }

    /// Record the initial inter-finger distance of a pinch.
    ///
    /// A degenerate distance (both fingers reported at the same spot) leaves
    /// no baseline, and pinch updates stay inert until one is set.
    pub fn begin_pinch(&mut self, distance: f64, _center_x: f64, _center_y: f64) {
        self.pinch = if distance > f64::EPSILON {
            Some(PinchBaseline { distance })
        } else {
            None
        };
    }

    /// Apply one pinch movement and re-baseline on it.
    ///
    /// Scale changes by the incremental ratio `distance / baseline`, clamped,
    /// and the offset is recomputed so the base point under the pinch center
    /// stays fixed. Each call becomes the baseline for the next, which keeps
    /// the gesture stable when the tracked finger pair changes mid-pinch.
    pub fn update_pinch(&mut self, distance: f64, center_x: f64, center_y: f64) {
        let Some(baseline) = self.pinch else {
            return;
        };
        if distance <= f64::EPSILON {
            return;
        }

        let ratio = distance / baseline.distance;
        let new_scale =
            (self.viewport.scale * ratio).clamp(self.config.min_scale, self.config.max_scale);
        self.apply_focused_scale(new_scale, center_x, center_y);
        self.pinch = Some(PinchBaseline { distance });
    }

    /// Drop the pinch baseline.
    pub fn end_pinch(&mut self) {
        self.pinch = None;
    }

    /// Whether a pinch baseline is currently held.
    #[must_use]
    pub fn pinch_active(&self) -> bool {
        self.pinch.is_some()
    }

    /// Set `scale` to `new_scale` and recompute the offset so the screen
    /// point `(focus_x, focus_y)` maps to the same base point before and
    /// after: `new_offset = focus - (focus - old_offset) * ratio`.
    fn apply_focused_scale(&mut self, new_scale: f64, focus_x: f64, focus_y: f64) {
        if new_scale == self.viewport.scale {
            return;
        }
        let ratio = new_scale / self.viewport.scale;
        self.viewport.offset_x = focus_x - (focus_x - self.viewport.offset_x) * ratio;
        self.viewport.offset_y = focus_y - (focus_y - self.viewport.offset_y) * ratio;
        self.viewport.scale = new_scale;
    }
}
