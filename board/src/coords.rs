//! Coordinate mapping between screen space and base-resolution space.
//!
//! These are the functions that make strokes land on the same spot on every
//! device. A pointer position is first expressed relative to the canvas's
//! on-screen rendered rect, then the viewport transform is undone, then the
//! result is scaled into base-resolution pixels. [`canvas_to_screen`] is the
//! algebraic inverse, used for remote cursors and debug overlays.
//!
//! Both directions return `None` when the geometry is not ready (no area to
//! the rect, or a degenerate base resolution) — "not ready" is an expected
//! state while the background asset loads, never an error.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use crate::doc::{BaseResolution, Point};
use crate::viewport::Viewport;

/// The canvas element's on-screen rendered rectangle, in screen pixels,
/// after any CSS transform has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect with no area cannot anchor a coordinate conversion.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Convert a screen-space pointer position to base-resolution pixels.
///
/// Steps: relative position within the rendered rect, undo the viewport's
/// scale and offset around the rect center, scale by the base resolution.
#[must_use]
pub fn screen_to_canvas(
    viewport: &Viewport,
    base: BaseResolution,
    rect: RenderRect,
    client_x: f64,
    client_y: f64,
) -> Option<Point> {
    if !rect.has_area() || base.width <= 0.0 || base.height <= 0.0 {
        return None;
    }

    let rel_x = (client_x - rect.left) / rect.width;
    let rel_y = (client_y - rect.top) / rect.height;

    let adjusted_x =
        (rel_x - 0.5) / viewport.scale - viewport.offset_x / viewport.scale / rect.width + 0.5;
    let adjusted_y =
        (rel_y - 0.5) / viewport.scale - viewport.offset_y / viewport.scale / rect.height + 0.5;

    Some(Point::new(adjusted_x * base.width, adjusted_y * base.height))
}

/// Convert base-resolution pixels to a screen-space position.
///
/// Exact inverse of [`screen_to_canvas`] for the same viewport snapshot.
#[must_use]
pub fn canvas_to_screen(
    viewport: &Viewport,
    base: BaseResolution,
    rect: RenderRect,
    x: f64,
    y: f64,
) -> Option<Point> {
    if !rect.has_area() || base.width <= 0.0 || base.height <= 0.0 {
        return None;
    }

    let norm_x = x / base.width;
    let norm_y = y / base.height;

    let view_x = (norm_x - 0.5) * viewport.scale + viewport.offset_x / rect.width + 0.5;
    let view_y = (norm_y - 0.5) * viewport.scale + viewport.offset_y / rect.height + 0.5;

    Some(Point::new(rect.left + view_x * rect.width, rect.top + view_y * rect.height))
}

/// Screen position of the rect center, the origin of the focus frame used by
/// the viewport controller.
#[must_use]
pub fn rect_center(rect: RenderRect) -> Point {
    Point::new(rect.left + rect.width * 0.5, rect.top + rect.height * 0.5)
}

/// Express a client-space position in the rect-center-relative focus frame.
#[must_use]
pub fn to_focus_frame(rect: RenderRect, client_x: f64, client_y: f64) -> Point {
    let center = rect_center(rect);
    Point::new(client_x - center.x, client_y - center.y)
}
