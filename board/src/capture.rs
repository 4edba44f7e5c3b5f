//! Stroke capture: accumulates pointer samples into an in-progress stroke.
//!
//! Points are buffered in base-resolution pixels. Newly added segments are
//! queued for incremental local rendering and drained once per host
//! animation frame ([`StrokeCapture::take_segments`]), so a burst of pointer
//! events between frames coalesces into one draw pass. On finish the buffer
//! is normalized against the base resolution and becomes a [`StrokeData`]
//! ready for the sync gateway; buffers with fewer than two points are
//! discarded silently.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

use crate::consts::{ERASER_SIZE, PEN_COLOR, PEN_SIZE};
use crate::doc::{BaseResolution, Point, StrokeData, Tool};

/// In-progress stroke buffer for a single client.
#[derive(Debug, Default)]
pub struct StrokeCapture {
    points: Vec<Point>,
    /// Number of buffered points already emitted as local draw segments.
    drawn: usize,
    active: bool,
}

impl StrokeCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is currently being captured.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Points buffered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Begin a new stroke seeded with one base-resolution point.
    ///
    /// Any previous buffer is dropped; the caller decides whether starting
    /// is allowed at all (locked boards never reach here).
    pub fn start(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.drawn = 1;
        self.active = true;
    }

    /// Append a point to the in-progress stroke. No-op when idle.
    pub fn add_point(&mut self, point: Point) {
        if !self.active {
            return;
        }
        self.points.push(point);
    }

    /// Drain the segments added since the last call, for incremental local
    /// rendering. Called once per animation frame by the host.
    pub fn take_segments(&mut self) -> Vec<[Point; 2]> {
        if self.points.len() < 2 || self.drawn >= self.points.len() {
            return Vec::new();
        }
        let start = self.drawn.max(1);
        let segments = (start..self.points.len())
            .map(|i| [self.points[i - 1], self.points[i]])
            .collect();
        self.drawn = self.points.len();
        segments
    }

    /// Finalize the stroke: normalize every point against the base
    /// resolution and return the committed draft, or `None` for a
    /// degenerate (fewer than two points) buffer. The buffer is cleared
    /// unconditionally.
    pub fn finish(&mut self, tool: Tool, base: BaseResolution) -> Option<StrokeData> {
        let points = std::mem::take(&mut self.points);
        self.drawn = 0;
        self.active = false;

        if points.len() < 2 {
            return None;
        }

        let normalized = points
            .iter()
            .map(|p| Point::new(p.x / base.width, p.y / base.height))
            .collect();

        let size = match tool {
            Tool::Pen => PEN_SIZE,
            Tool::Eraser => ERASER_SIZE,
        };

        Some(StrokeData { tool, points: normalized, color: PEN_COLOR.to_owned(), size })
    }

    /// Discard the buffer without emitting anything. Used when a second
    /// contact interrupts the draw or the board locks mid-stroke.
    pub fn cancel(&mut self) {
        self.points.clear();
        self.drawn = 0;
        self.active = false;
    }
}
