//! Template routes — operator panel CRUD and lock toggling.
//!
//! Lock and background changes are pushed to the board's connected clients
//! as a `board` message, mirroring the live template subscription the
//! terminals rely on.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::services::template::{self, TemplateError};
use crate::state::{AppState, Template};

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub background_image: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub background_image: String,
    pub locked: bool,
}

impl From<Template> for TemplateResponse {
    fn from(t: Template) -> Self {
        Self {
            id: t.id,
            name: t.name,
            background_image: t.background_image,
            locked: t.locked,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LockRequest {
    pub locked: bool,
}

#[derive(Debug, Deserialize)]
pub struct BackgroundRequest {
    pub background_image: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Response {
    let name = req.name.trim();
    if name.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, "template name must not be empty").into_response();
    }

    match template::create_template(&state.pool, name, req.background_image.trim()).await {
        Ok(t) => (StatusCode::CREATED, Json(TemplateResponse::from(t))).into_response(),
        Err(e) => database_error(&e),
    }
}

pub async fn list(State(state): State<AppState>) -> Response {
    match template::list_templates(&state.pool).await {
        Ok(templates) => {
            let body: Vec<TemplateResponse> =
                templates.into_iter().map(TemplateResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => database_error(&e),
    }
}

pub async fn set_lock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LockRequest>,
) -> Response {
    match template::set_locked(&state.pool, id, req.locked).await {
        Ok(()) => {
            push_template_change(&state, id, |t| t.locked = req.locked).await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(TemplateError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => database_error(&e),
    }
}

pub async fn set_background(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BackgroundRequest>,
) -> Response {
    match template::set_background(&state.pool, id, req.background_image.trim()).await {
        Ok(()) => {
            let background = req.background_image.trim().to_owned();
            push_template_change(&state, id, move |t| t.background_image = background).await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(TemplateError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => database_error(&e),
    }
}

/// Apply a template mutation to the live board (if any) and fan the updated
/// `board` message out to its clients.
async fn push_template_change(
    state: &AppState,
    template_id: Uuid,
    mutate: impl FnOnce(&mut Template),
) {
    let board_msg = {
        let mut boards = state.boards.write().await;
        boards.get_mut(&template_id).map(|board| {
            mutate(&mut board.template);
            board.board_message()
        })
    };
    if let Some(msg) = board_msg {
        state.broadcast(template_id, &msg).await;
    }
}

fn database_error(e: &TemplateError) -> Response {
    error!(error = %e, "template route failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "database error").into_response()
}
