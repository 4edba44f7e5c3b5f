//! Shared numeric constants for the board crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom scale (10%).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed zoom scale (1000%).
pub const MAX_SCALE: f64 = 10.0;

/// Scale delta per wheel-pixel for modifier+scroll zoom.
pub const SCROLL_SENSITIVITY: f64 = 0.002;

/// Multiplicative step for the +/- zoom buttons (20%).
pub const ZOOM_INCREMENT: f64 = 0.2;

// ── Brushes ─────────────────────────────────────────────────────

/// Default pen color.
pub const PEN_COLOR: &str = "#000000";

/// Pen line width in surface pixels.
pub const PEN_SIZE: f64 = 2.0;

/// Eraser line width in surface pixels.
pub const ERASER_SIZE: f64 = 20.0;
