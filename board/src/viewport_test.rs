#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Defaults ---

#[test]
fn default_viewport_is_identity() {
    let vp = Viewport::default();
    assert_eq!(vp.scale, 1.0);
    assert_eq!(vp.offset_x, 0.0);
    assert_eq!(vp.offset_y, 0.0);
}

#[test]
fn default_config_matches_constants() {
    let config = ViewportConfig::default();
    assert_eq!(config.min_scale, MIN_SCALE);
    assert_eq!(config.max_scale, MAX_SCALE);
    assert_eq!(config.scroll_sensitivity, SCROLL_SENSITIVITY);
    assert_eq!(config.zoom_increment, ZOOM_INCREMENT);
}

// --- zoom_at ---

#[test]
fn zoom_at_applies_focus_formula() {
    let mut vc = ViewportController::default();
    vc.zoom_at(0.5, 100.0, 50.0);
    assert!(approx_eq(vc.viewport.scale, 1.5));
    // offset = focus - (focus - old_offset) * ratio
    assert!(approx_eq(vc.viewport.offset_x, 100.0 - 100.0 * 1.5));
    assert!(approx_eq(vc.viewport.offset_y, 50.0 - 50.0 * 1.5));
}

#[test]
fn zoom_at_negative_delta_zooms_out() {
    let mut vc = ViewportController::default();
    vc.zoom_at(-0.5, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 0.5));
}

#[test]
fn zoom_at_clamps_to_max() {
    let mut vc = ViewportController::default();
    vc.zoom_at(100.0, 0.0, 0.0);
    assert_eq!(vc.viewport.scale, MAX_SCALE);
}

#[test]
fn zoom_at_clamps_to_min() {
    let mut vc = ViewportController::default();
    vc.zoom_at(-100.0, 0.0, 0.0);
    assert_eq!(vc.viewport.scale, MIN_SCALE);
}

#[test]
fn zoom_at_at_clamp_boundary_is_a_full_noop() {
    let mut vc = ViewportController::default();
    vc.zoom_at(100.0, 40.0, 40.0);
    let before = vc.viewport;
    // Already at max: offsets must not drift either.
    vc.zoom_at(1.0, 250.0, -30.0);
    assert_eq!(vc.viewport, before);
}

#[test]
fn zoom_at_zero_delta_is_a_noop() {
    let mut vc = ViewportController::default();
    vc.pan(12.0, -7.0);
    let before = vc.viewport;
    vc.zoom_at(0.0, 99.0, 99.0);
    assert_eq!(vc.viewport, before);
}

// --- zoom_in / zoom_out ---

#[test]
fn zoom_in_multiplies_by_increment() {
    let mut vc = ViewportController::default();
    vc.zoom_in();
    assert!(approx_eq(vc.viewport.scale, 1.2));
}

#[test]
fn zoom_out_multiplies_by_increment() {
    let mut vc = ViewportController::default();
    vc.zoom_out();
    assert!(approx_eq(vc.viewport.scale, 0.8));
}

#[test]
fn zoom_buttons_keep_the_view_center_fixed() {
    let mut vc = ViewportController::default();
    vc.pan(60.0, -20.0);
    vc.zoom_in();
    // Centered zoom scales the offset by the same ratio, so the base point
    // at the rect center stays put: offset / scale is invariant.
    assert!(approx_eq(vc.viewport.offset_x / vc.viewport.scale, 60.0));
    assert!(approx_eq(vc.viewport.offset_y / vc.viewport.scale, -20.0));
}

#[test]
fn repeated_zoom_out_settles_at_min_scale() {
    let mut vc = ViewportController::default();
    for _ in 0..50 {
        vc.zoom_out();
    }
    assert_eq!(vc.viewport.scale, MIN_SCALE);
    vc.zoom_out();
    assert_eq!(vc.viewport.scale, MIN_SCALE);
}

#[test]
fn repeated_zoom_in_settles_at_max_scale() {
    let mut vc = ViewportController::default();
    for _ in 0..50 {
        vc.zoom_in();
    }
    assert_eq!(vc.viewport.scale, MAX_SCALE);
    vc.zoom_in();
    assert_eq!(vc.viewport.scale, MAX_SCALE);
}

// --- pan / reset ---

#[test]
fn pan_accumulates() {
    let mut vc = ViewportController::default();
    vc.pan(10.0, -5.0);
    vc.pan(2.5, 5.0);
    assert!(approx_eq(vc.viewport.offset_x, 12.5));
    assert!(approx_eq(vc.viewport.offset_y, 0.0));
}

#[test]
fn reset_restores_identity() {
    let mut vc = ViewportController::default();
    vc.zoom_at(3.0, 80.0, 80.0);
    vc.pan(100.0, 100.0);
    vc.reset();
    assert_eq!(vc.viewport, Viewport::default());
}

// --- wheel ---

#[test]
fn wheel_scroll_up_zooms_in() {
    let mut vc = ViewportController::default();
    vc.wheel(-100.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 1.0 + 100.0 * SCROLL_SENSITIVITY));
}

#[test]
fn wheel_scroll_down_zooms_out() {
    let mut vc = ViewportController::default();
    vc.wheel(100.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 1.0 - 100.0 * SCROLL_SENSITIVITY));
}

// --- Pinch protocol ---

#[test]
fn pinch_spread_scales_up_by_distance_ratio() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(100.0, 0.0, 0.0);
    vc.update_pinch(150.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 1.5));
}

#[test]
fn pinch_squeeze_scales_down() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(100.0, 0.0, 0.0);
    vc.update_pinch(50.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 0.5));
}

#[test]
fn pinch_updates_rebaseline_incrementally() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(100.0, 0.0, 0.0);
    vc.update_pinch(200.0, 0.0, 0.0);
    // Second update is relative to the previous distance, not the original.
    vc.update_pinch(100.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 1.0));
}

#[test]
fn pinch_update_without_begin_is_inert() {
    let mut vc = ViewportController::default();
    vc.update_pinch(200.0, 10.0, 10.0);
    assert_eq!(vc.viewport, Viewport::default());
}

#[test]
fn pinch_update_after_end_is_inert() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(100.0, 0.0, 0.0);
    vc.end_pinch();
    vc.update_pinch(300.0, 0.0, 0.0);
    assert_eq!(vc.viewport, Viewport::default());
}

#[test]
fn pinch_with_degenerate_distance_never_arms() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(0.0, 0.0, 0.0);
    assert!(!vc.pinch_active());
    vc.update_pinch(100.0, 0.0, 0.0);
    assert_eq!(vc.viewport, Viewport::default());
}

#[test]
fn pinch_ignores_degenerate_update_distance() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(100.0, 0.0, 0.0);
    vc.update_pinch(0.0, 0.0, 0.0);
    assert_eq!(vc.viewport.scale, 1.0);
    // Baseline is untouched; a sane update still works.
    vc.update_pinch(120.0, 0.0, 0.0);
    assert!(approx_eq(vc.viewport.scale, 1.2));
}

#[test]
fn pinch_clamps_scale() {
    let mut vc = ViewportController::default();
    vc.begin_pinch(1.0, 0.0, 0.0);
    vc.update_pinch(1_000_000.0, 0.0, 0.0);
    assert_eq!(vc.viewport.scale, MAX_SCALE);
}

#[test]
fn pinch_active_reflects_protocol_phase() {
    let mut vc = ViewportController::default();
    assert!(!vc.pinch_active());
    vc.begin_pinch(80.0, 0.0, 0.0);
    assert!(vc.pinch_active());
    vc.end_pinch();
    assert!(!vc.pinch_active());
}

// --- Scale positivity ---

#[test]
fn no_operation_produces_non_positive_scale() {
    let mut vc = ViewportController::default();
    vc.zoom_at(-1000.0, 50.0, 50.0);
    assert!(vc.viewport.scale > 0.0);
    vc.begin_pinch(1000.0, 0.0, 0.0);
    vc.update_pinch(0.0001, 0.0, 0.0);
    assert!(vc.viewport.scale > 0.0);
    for _ in 0..100 {
        vc.zoom_out();
    }
    assert!(vc.viewport.scale > 0.0);
}
