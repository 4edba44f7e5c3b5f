#![allow(clippy::float_cmp)]

use super::*;
use uuid::Uuid;

fn stroke_element(created_at: i64) -> CanvasElement {
    CanvasElement::Stroke(Stroke {
        id: Uuid::new_v4(),
        tool: Tool::Pen,
        points: vec![Point::new(0.1, 0.1), Point::new(0.2, 0.2)],
        color: "#000000".to_owned(),
        size: 2.0,
        created_at,
    })
}

// --- BaseResolution ---

#[test]
fn base_resolution_accepts_natural_dimensions() {
    let base = BaseResolution::new(2000.0, 1200.0).expect("valid");
    assert_eq!(base.width, 2000.0);
    assert_eq!(base.height, 1200.0);
}

#[test]
fn base_resolution_rejects_zero_dimensions() {
    assert!(BaseResolution::new(0.0, 1200.0).is_none());
    assert!(BaseResolution::new(2000.0, 0.0).is_none());
}

#[test]
fn base_resolution_rejects_negative_dimensions() {
    assert!(BaseResolution::new(-100.0, 100.0).is_none());
}

#[test]
fn base_resolution_rejects_non_finite_dimensions() {
    assert!(BaseResolution::new(f64::NAN, 100.0).is_none());
    assert!(BaseResolution::new(100.0, f64::INFINITY).is_none());
}

#[test]
fn aspect_is_width_over_height() {
    let base = BaseResolution::new(1000.0, 500.0).expect("valid");
    assert_eq!(base.aspect(), 2.0);
}

// --- BoardDoc ---

#[test]
fn new_doc_is_empty() {
    let doc = BoardDoc::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
}

#[test]
fn snapshot_replaces_all_elements() {
    let mut doc = BoardDoc::new();
    doc.load_snapshot(vec![stroke_element(1), stroke_element(2)]);
    assert_eq!(doc.len(), 2);

    doc.load_snapshot(vec![stroke_element(3)]);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.elements()[0].created_at(), 3);
}

#[test]
fn snapshot_preserves_server_order() {
    let mut doc = BoardDoc::new();
    doc.load_snapshot(vec![stroke_element(5), stroke_element(1), stroke_element(9)]);
    let order: Vec<i64> = doc.elements().iter().map(CanvasElement::created_at).collect();
    // Order is the delivered order, never re-sorted locally.
    assert_eq!(order, vec![5, 1, 9]);
}

#[test]
fn empty_snapshot_clears_the_doc() {
    let mut doc = BoardDoc::new();
    doc.load_snapshot(vec![stroke_element(1)]);
    doc.load_snapshot(Vec::new());
    assert!(doc.is_empty());
}
