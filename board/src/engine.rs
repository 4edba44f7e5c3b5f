//! Top-level engine: wires gestures, capture, viewport, and the document.
//!
//! [`EngineCore`] holds all logic that doesn't depend on the canvas element,
//! so the whole input → capture → commit pipeline tests without a browser.
//! [`Engine`] wraps it with the actual `HtmlCanvasElement` and drives the
//! [`crate::render`] module.
//!
//! The host forwards raw pointer/wheel events and applies the returned
//! [`Action`]s: schedule an animation frame on `RenderNeeded`, hand a
//! committed stroke to the sync gateway on `StrokeCommitted`, and update the
//! CSS transform on `ViewportChanged`. The engine never talks to the network
//! itself; `append` stays the host's only suspension point.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::capture::StrokeCapture;
use crate::coords::{self, RenderRect};
use crate::doc::{BaseResolution, BoardDoc, CanvasElement, Point, StrokeData, Tool};
use crate::gesture::{GestureArbiter, GestureEvent, PointerEvent};
use crate::render;
use crate::surface::{self, BrushStyle, DrawOp};
use crate::viewport::ViewportController;

/// Work the host must do after handling an input or state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Schedule a redraw on the next animation frame.
    RenderNeeded,
    /// A stroke finished; append it to the board's log via the sync gateway.
    StrokeCommitted(StrokeData),
    /// The zoom/pan transform changed; update the display transform.
    ViewportChanged,
}

/// Engine state independent of the canvas element.
pub struct EngineCore {
    pub doc: BoardDoc,
    pub viewport: ViewportController,
    pub gesture: GestureArbiter,
    pub capture: StrokeCapture,
    pub tool: Tool,
    base: Option<BaseResolution>,
    rect: RenderRect,
    container: (f64, f64),
    surface_size: Option<(f64, f64)>,
    locked: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: BoardDoc::new(),
            viewport: ViewportController::default(),
            gesture: GestureArbiter::new(),
            capture: StrokeCapture::new(),
            tool: Tool::Pen,
            base: None,
            rect: RenderRect::default(),
            container: (0.0, 0.0),
            surface_size: None,
            locked: false,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Geometry inputs ---

    /// Establish the base resolution from the background asset's natural
    /// dimensions. The base resolution is fixed for the whole board session:
    /// once set, later calls are ignored.
    pub fn set_background_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        if self.base.is_some() {
            return Vec::new();
        }
        self.base = BaseResolution::new(width, height);
        self.refit_surface()
    }

    /// Update the container dimensions (on mount and every resize).
    pub fn set_container_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.container = (width, height);
        self.refit_surface()
    }

    /// Update the canvas's on-screen rendered rect (post CSS-transform).
    pub fn set_render_rect(&mut self, rect: RenderRect) {
        self.rect = rect;
    }

    fn refit_surface(&mut self) -> Vec<Action> {
        let Some(base) = self.base else {
            return Vec::new();
        };
        let fitted = surface::contain_size(base, self.container.0, self.container.1);
        if fitted != self.surface_size {
            self.surface_size = fitted;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Board state inputs ---

    /// Replace the committed element list with an authoritative snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) -> Vec<Action> {
        self.doc.load_snapshot(elements);
        vec![Action::RenderNeeded]
    }

    /// Toggle view-only mode. Locking mid-stroke discards the in-progress
    /// stroke, and the redraw wipes its partial local rendering.
    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        self.locked = locked;
        if locked && self.capture.is_active() {
            self.capture.cancel();
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    // --- Queries ---

    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn base_resolution(&self) -> Option<BaseResolution> {
        self.base
    }

    /// Intrinsic surface size under contain fitting, once known.
    #[must_use]
    pub fn surface_size(&self) -> Option<(f64, f64)> {
        self.surface_size
    }

    /// Map a client-space position to base-resolution pixels, or `None`
    /// while the geometry is not ready.
    #[must_use]
    pub fn screen_to_canvas(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let base = self.base?;
        coords::screen_to_canvas(&self.viewport.viewport, base, self.rect, client_x, client_y)
    }

    /// Inverse of [`Self::screen_to_canvas`] for the same viewport snapshot.
    #[must_use]
    pub fn canvas_to_screen(&self, x: f64, y: f64) -> Option<Point> {
        let base = self.base?;
        coords::canvas_to_screen(&self.viewport.viewport, base, self.rect, x, y)
    }

    // --- Input events ---

    /// Feed one raw pointer event through the gesture arbiter.
    pub fn pointer(&mut self, event: PointerEvent) -> Vec<Action> {
        match self.gesture.handle(event) {
            GestureEvent::Ignored => Vec::new(),
            GestureEvent::DrawStart { x, y } => self.draw_start(x, y),
            GestureEvent::DrawMove { x, y } => self.draw_move(x, y),
            GestureEvent::DrawEnd => self.draw_end(),
            GestureEvent::DrawCancel => {
                self.capture.cancel();
                vec![Action::RenderNeeded]
            }
            GestureEvent::PinchStart { distance, center_x, center_y } => {
                // Mutual exclusion: a second finger kills the draw.
                let had_stroke = self.capture.is_active();
                self.capture.cancel();
                let focus = coords::to_focus_frame(self.rect, center_x, center_y);
                self.viewport.begin_pinch(distance, focus.x, focus.y);
                if had_stroke {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            GestureEvent::PinchMove { distance, center_x, center_y } => {
                let focus = coords::to_focus_frame(self.rect, center_x, center_y);
                self.viewport.update_pinch(distance, focus.x, focus.y);
                vec![Action::ViewportChanged]
            }
            GestureEvent::PinchEnd => {
                self.viewport.end_pinch();
                Vec::new()
            }
        }
    }

    /// Modifier+wheel zoom, focused on the cursor. Plain scrolling (no ctrl)
    /// is left to the page and does not touch the gesture state machine.
    pub fn wheel(&mut self, client_x: f64, client_y: f64, delta_y: f64, ctrl: bool) -> Vec<Action> {
        if !ctrl {
            return Vec::new();
        }
        let focus = coords::to_focus_frame(self.rect, client_x, client_y);
        self.viewport.wheel(delta_y, focus.x, focus.y);
        vec![Action::ViewportChanged]
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.viewport.zoom_in();
        vec![Action::ViewportChanged]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.viewport.zoom_out();
        vec![Action::ViewportChanged]
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport.reset();
        vec![Action::ViewportChanged]
    }

    fn draw_start(&mut self, x: f64, y: f64) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let Some(point) = self.screen_to_canvas(x, y) else {
            return Vec::new();
        };
        self.capture.start(point);
        Vec::new()
    }

    fn draw_move(&mut self, x: f64, y: f64) -> Vec<Action> {
        if self.locked || !self.capture.is_active() {
            return Vec::new();
        }
        let Some(point) = self.screen_to_canvas(x, y) else {
            return Vec::new();
        };
        self.capture.add_point(point);
        vec![Action::RenderNeeded]
    }

    fn draw_end(&mut self) -> Vec<Action> {
        let Some(base) = self.base else {
            self.capture.cancel();
            return Vec::new();
        };
        match self.capture.finish(self.tool, base) {
            Some(stroke) => vec![Action::StrokeCommitted(stroke)],
            None => Vec::new(),
        }
    }

    // --- Render planning ---

    /// Plan a full redraw at the current surface size.
    #[must_use]
    pub fn replay_plan(&self) -> Option<(f64, f64, Vec<DrawOp>)> {
        let (w, h) = self.surface_size?;
        Some((w, h, surface::replay(self.doc.elements(), w, h)))
    }

    /// Plan an export composite at full base resolution.
    #[must_use]
    pub fn export_plan(&self) -> Option<(f64, f64, Vec<DrawOp>)> {
        let base = self.base?;
        Some((base.width, base.height, surface::replay(self.doc.elements(), base.width, base.height)))
    }

    /// Drain in-progress stroke segments for this animation frame, styled
    /// and scaled to surface pixels. Returns `None` when there is nothing
    /// new to draw.
    pub fn frame(&mut self) -> Option<(BrushStyle, Vec<[Point; 2]>)> {
        let base = self.base?;
        let (w, h) = self.surface_size?;
        let segments = self.capture.take_segments();
        if segments.is_empty() {
            return None;
        }
        let size = match self.tool {
            Tool::Pen => crate::consts::PEN_SIZE,
            Tool::Eraser => crate::consts::ERASER_SIZE,
        };
        let style = surface::brush_style(self.tool, crate::consts::PEN_COLOR, size);
        Some((style, surface::scale_segments(&segments, base, w, h)))
    }
}

/// The full engine: [`EngineCore`] plus the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Refit the surface to the container and redraw if the size changed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn resize(&mut self, container_w: f64, container_h: f64) -> Result<(), JsValue> {
        let actions = self.core.set_container_size(container_w, container_h);
        if actions.contains(&Action::RenderNeeded) {
            self.apply_surface_size();
            self.render()?;
        }
        Ok(())
    }

    /// Redraw the full committed element list.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some((w, h, plan)) = self.core.replay_plan() else {
            return Ok(());
        };
        let ctx = render::context_2d(&self.canvas)?;
        render::draw(&ctx, &plan, w, h)
    }

    /// Draw the segments captured since the last animation frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render_frame(&mut self) -> Result<(), JsValue> {
        let Some((style, segments)) = self.core.frame() else {
            return Ok(());
        };
        let ctx = render::context_2d(&self.canvas)?;
        render::draw_segments(&ctx, &style, &segments)
    }

    /// Composite the background and all committed elements onto `target`
    /// at full base resolution, for the host's save/share routine.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the geometry is not ready or a `Canvas2D` call fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn export_to(
        &self,
        target: &HtmlCanvasElement,
        background: Option<&HtmlImageElement>,
    ) -> Result<(), JsValue> {
        let Some((w, h, plan)) = self.core.export_plan() else {
            return Err(JsValue::from_str("base resolution not known yet"));
        };
        target.set_width(w.round() as u32);
        target.set_height(h.round() as u32);
        let ctx = render::context_2d(target)?;
        render::export(&ctx, background, &plan, w, h)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply_surface_size(&self) {
        if let Some((w, h)) = self.core.surface_size() {
            self.canvas.set_width(w.round() as u32);
            self.canvas.set_height(h.round() as u32);
        }
    }
}
