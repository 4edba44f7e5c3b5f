//! Document model: the element log and the board's base resolution.
//!
//! The drawing state of a board is an ordered list of [`CanvasElement`]s,
//! replaced wholesale every time the sync subscription delivers a new
//! snapshot. The list is never edited in place; the server's arrival order
//! is the draw order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

pub use wire::{CanvasElement, Point, Stroke, StrokeData, TextNote, Tool};

/// The fixed pixel dimensions all stored coordinates are normalized against.
///
/// Derived once per board session from the background asset's natural size
/// and immutable from then on. Every client shares the same base resolution
/// for a board, which is what makes normalized points device-independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseResolution {
    pub width: f64,
    pub height: f64,
}

impl BaseResolution {
    /// Build from the background asset's natural dimensions.
    ///
    /// Returns `None` for non-finite or non-positive sizes, so a board whose
    /// background failed to load simply never gets a base resolution.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Option<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Width / height of the background asset.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// In-memory copy of the board's committed element log.
#[derive(Debug, Default)]
pub struct BoardDoc {
    elements: Vec<CanvasElement>,
}

impl BoardDoc {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole element list with an authoritative snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) {
        self.elements = elements;
    }

    /// Committed elements in server order.
    #[must_use]
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Number of committed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements have been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
