//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds HTTP + websocket endpoints: template CRUD and lock
//! toggling for the operator panel under `/api`, and the per-board stroke
//! log socket under `/ws/{template_id}`.

pub mod templates;
pub mod ws;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/templates", post(templates::create).get(templates::list))
        .route("/api/templates/{id}/lock", put(templates::set_lock))
        .route("/api/templates/{id}/background", put(templates::set_background))
        .route("/ws/{template_id}", get(ws::handle_ws))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
