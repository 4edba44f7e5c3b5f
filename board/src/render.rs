//! Rendering: applies a replay plan to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It executes the pure draw plans produced by [`crate::surface`] 1:1 and
//! holds no state of its own. All fallible `Canvas2D` calls propagate errors
//! via `Result<(), JsValue>`; the engine methods own the result.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::doc::Point;
use crate::surface::{BrushStyle, Composite, DrawOp};

/// Obtain the 2D context of a canvas element.
///
/// # Errors
///
/// Returns `Err` if the context is unavailable or of an unexpected type.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected 2d context type"))
}

/// Clear the surface and execute a full replay plan.
///
/// Replaying the same plan twice produces identical pixels: the surface is
/// cleared first and every operation is deterministic.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    plan: &[DrawOp],
    surface_w: f64,
    surface_h: f64,
) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, surface_w, surface_h);
    for op in plan {
        apply_op(ctx, op)?;
    }
    Ok(())
}

/// Draw freshly captured segments of the in-progress stroke.
///
/// Uses the same brush styling as replay so the live stroke is visually
/// indistinguishable from its committed form.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_segments(
    ctx: &CanvasRenderingContext2d,
    style: &BrushStyle,
    segments: &[[Point; 2]],
) -> Result<(), JsValue> {
    ctx.save();
    apply_brush(ctx, style)?;
    for [a, b] in segments {
        ctx.begin_path();
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

/// Composite the board for export: stroke layer first, then the background
/// slipped *underneath* with `destination-over`, so eraser cut-outs reveal
/// the background exactly as the live view layers them.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn export(
    ctx: &CanvasRenderingContext2d,
    background: Option<&HtmlImageElement>,
    plan: &[DrawOp],
    surface_w: f64,
    surface_h: f64,
) -> Result<(), JsValue> {
    draw(ctx, plan, surface_w, surface_h)?;

    ctx.save();
    ctx.set_global_composite_operation("destination-over")?;
    match background {
        Some(image) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, surface_w, surface_h)?;
        }
        None => {
            ctx.set_fill_style_str("#ffffff");
            ctx.fill_rect(0.0, 0.0, surface_w, surface_h);
        }
    }
    ctx.restore();
    Ok(())
}

fn apply_op(ctx: &CanvasRenderingContext2d, op: &DrawOp) -> Result<(), JsValue> {
    match op {
        DrawOp::Polyline { style, points } => apply_polyline(ctx, style, points),
        DrawOp::Label { text, color, font_size, position } => {
            apply_label(ctx, text, color, *font_size, *position)
        }
    }
}

fn apply_polyline(
    ctx: &CanvasRenderingContext2d,
    style: &BrushStyle,
    points: &[Point],
) -> Result<(), JsValue> {
    let Some(first) = points.first() else {
        return Ok(());
    };

    ctx.save();
    apply_brush(ctx, style)?;
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for point in &points[1..] {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn apply_label(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    color: &str,
    font_size: f64,
    position: Point,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_composite_operation(Composite::SourceOver.as_canvas_op())?;
    ctx.set_fill_style_str(color);
    ctx.set_font(&format!("{font_size}px sans-serif"));
    ctx.fill_text(text, position.x, position.y)?;
    ctx.restore();
    Ok(())
}

fn apply_brush(ctx: &CanvasRenderingContext2d, style: &BrushStyle) -> Result<(), JsValue> {
    ctx.set_global_composite_operation(style.composite.as_canvas_op())?;
    ctx.set_stroke_style_str(&style.color);
    ctx.set_line_width(style.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    Ok(())
}
