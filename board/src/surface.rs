//! Replay planning for the render surface.
//!
//! Everything here is pure: given the committed element list and the
//! surface's current pixel size, produce the ordered list of draw operations
//! that reproduces the board. The [`crate::render`] module applies a plan to
//! a 2D context 1:1, so replay correctness (ordering, styling, idempotence)
//! is tested here without a browser.
//!
//! Normalized points are multiplied by the surface size at replay time.
//! Because the surface always keeps the background's aspect ratio (contain
//! fitting), replay is resolution-correct at any surface size, including
//! export at full base resolution. Points outside `[0, 1]` are planned as-is
//! and simply fall outside the visible surface.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::doc::{BaseResolution, CanvasElement, Point, Tool};

/// Canvas compositing mode for a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Normal painting on top of existing content.
    SourceOver,
    /// Cut-out: existing content under the line is erased.
    DestinationOut,
}

impl Composite {
    /// The Canvas2D `globalCompositeOperation` keyword.
    #[must_use]
    pub fn as_canvas_op(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }
}

/// Line styling for one stroke. Caps and joins are always round.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushStyle {
    pub composite: Composite,
    pub color: String,
    pub width: f64,
}

/// Style a brush the same way whether the stroke is being drawn live or
/// replayed from the log — the two must be visually indistinguishable.
#[must_use]
pub fn brush_style(tool: Tool, color: &str, size: f64) -> BrushStyle {
    match tool {
        Tool::Pen => BrushStyle {
            composite: Composite::SourceOver,
            color: color.to_owned(),
            width: size,
        },
        Tool::Eraser => BrushStyle {
            composite: Composite::DestinationOut,
            color: "rgba(0,0,0,1)".to_owned(),
            width: size,
        },
    }
}

/// One draw operation, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Polyline { style: BrushStyle, points: Vec<Point> },
    Label { text: String, color: String, font_size: f64, position: Point },
}

/// The surface's intrinsic pixel size under "contain" fitting: the largest
/// rectangle with the base aspect ratio that fits the container.
///
/// Returns `None` when the container has no area yet.
#[must_use]
pub fn contain_size(base: BaseResolution, container_w: f64, container_h: f64) -> Option<(f64, f64)> {
    if container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }

    let image_aspect = base.aspect();
    let container_aspect = container_w / container_h;

    if container_aspect > image_aspect {
        // Wider container: height-limited.
        let render_h = container_h;
        Some((render_h * image_aspect, render_h))
    } else {
        // Taller container: width-limited.
        let render_w = container_w;
        Some((render_w, render_w / image_aspect))
    }
}

/// Plan a full redraw: every committed element in server order, scaled to
/// the surface size. The caller clears the surface first; the plan itself is
/// deterministic, so replaying the same list twice yields identical pixels.
#[must_use]
pub fn replay(elements: &[CanvasElement], surface_w: f64, surface_h: f64) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            CanvasElement::Stroke(stroke) => {
                if stroke.points.is_empty() {
                    continue;
                }
                let points = stroke
                    .points
                    .iter()
                    .map(|p| Point::new(p.x * surface_w, p.y * surface_h))
                    .collect();
                ops.push(DrawOp::Polyline {
                    style: brush_style(stroke.tool, &stroke.color, stroke.size),
                    points,
                });
            }
            CanvasElement::Text(note) => {
                ops.push(DrawOp::Label {
                    text: note.text.clone(),
                    color: note.color.clone(),
                    font_size: note.font_size,
                    position: Point::new(note.position.x * surface_w, note.position.y * surface_h),
                });
            }
        }
    }

    ops
}

/// Scale in-progress stroke segments from base-resolution pixels to surface
/// pixels for incremental local rendering.
#[must_use]
pub fn scale_segments(
    segments: &[[Point; 2]],
    base: BaseResolution,
    surface_w: f64,
    surface_h: f64,
) -> Vec<[Point; 2]> {
    let sx = surface_w / base.width;
    let sy = surface_h / base.height;
    segments
        .iter()
        .map(|[a, b]| [Point::new(a.x * sx, a.y * sy), Point::new(b.x * sx, b.y * sy)])
        .collect()
}
