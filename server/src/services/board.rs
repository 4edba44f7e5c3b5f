//! Board service — live join/append/part lifecycle.
//!
//! DESIGN
//! ======
//! A board is hydrated from Postgres on first join (template row + element
//! log) and kept in memory while any client is connected. Appends are
//! write-through: the row is persisted before the element enters the live
//! list, so a failed write is reported to the sender and never reaches the
//! fan-out — the sender's optimistic local stroke is then visibly undone by
//! the next authoritative snapshot, which is the accepted failure mode.
//!
//! Lock and degenerate checks happen here, before any I/O: appends to a
//! locked board are rejected, and drafts that cannot describe a visible
//! element (single-point strokes, empty text) are dropped quietly.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;
use wire::{ClientMessage, ServerMessage};

use crate::services::{stroke, template};
use crate::state::{AppState, BoardState, now_ms};

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("template not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<template::TemplateError> for BoardError {
    fn from(e: template::TemplateError) -> Self {
        match e {
            template::TemplateError::NotFound(id) => Self::NotFound(id),
            template::TemplateError::Database(e) => Self::Database(e),
        }
    }
}

impl From<stroke::StrokeError> for BoardError {
    fn from(e: stroke::StrokeError) -> Self {
        match e {
            stroke::StrokeError::Database(e) => Self::Database(e),
            // Hydration never serializes; map a stray serialize error onto
            // the database decode path instead of inventing a variant.
            stroke::StrokeError::Serialize(e) => Self::Database(sqlx::Error::Decode(Box::new(e))),
        }
    }
}

/// What the dispatch layer should do after an append attempt.
#[derive(Debug)]
pub enum AppendOutcome {
    /// The element entered the log; broadcast this full snapshot to
    /// everyone on the board, sender included.
    Appended(ServerMessage),
    /// The append was refused; reply to the sender only.
    Rejected(String),
    /// Degenerate draft; nothing to do.
    Dropped,
}

/// Register a client on a board, hydrating it from Postgres if it is not
/// live yet. Returns the board metadata and full-snapshot messages to send
/// to the new client.
///
/// # Errors
///
/// Returns `NotFound` for an unknown template, or a database error.
pub async fn join_board(
    state: &AppState,
    template_id: Uuid,
    client_id: Uuid,
    tx: mpsc::Sender<ServerMessage>,
) -> Result<(ServerMessage, ServerMessage), BoardError> {
    {
        let mut boards = state.boards.write().await;
        if let Some(board) = boards.get_mut(&template_id) {
            board.clients.insert(client_id, tx);
            return Ok((board.board_message(), board.snapshot()));
        }
    }

    // Not live yet: hydrate outside the lock, then race via entry().
    let template = template::get_template(&state.pool, template_id).await?;
    let elements = stroke::load_elements(&state.pool, template_id).await?;
    info!(%template_id, elements = elements.len(), "board hydrated");

    let mut boards = state.boards.write().await;
    let board = boards
        .entry(template_id)
        .or_insert_with(|| BoardState::new(template, elements));
    board.clients.insert(client_id, tx);
    Ok((board.board_message(), board.snapshot()))
}

/// Remove a client from a board, evicting the board when it was the last.
pub async fn part_board(state: &AppState, template_id: Uuid, client_id: Uuid) {
    let mut boards = state.boards.write().await;
    if let Some(board) = boards.get_mut(&template_id) {
        board.clients.remove(&client_id);
        if board.clients.is_empty() {
            boards.remove(&template_id);
            info!(%template_id, "board evicted: last client left");
        }
    }
}

/// Validate, commit, persist, and apply one append request.
pub async fn append_element(
    state: &AppState,
    template_id: Uuid,
    msg: ClientMessage,
) -> AppendOutcome {
    let locked = {
        let boards = state.boards.read().await;
        match boards.get(&template_id) {
            Some(board) => board.template.locked,
            None => return AppendOutcome::Rejected("board is not live".to_owned()),
        }
    };
    if locked {
        return AppendOutcome::Rejected("board is locked".to_owned());
    }

    let element = match msg {
        ClientMessage::AppendStroke { stroke } => {
            if !stroke.has_line() {
                warn!(%template_id, points = stroke.points.len(), "degenerate stroke dropped");
                return AppendOutcome::Dropped;
            }
            stroke::commit_stroke(stroke, Uuid::new_v4(), now_ms())
        }
        ClientMessage::AppendText { note } => {
            if note.text.trim().is_empty() {
                warn!(%template_id, "empty text note dropped");
                return AppendOutcome::Dropped;
            }
            stroke::commit_text(note, Uuid::new_v4(), now_ms())
        }
    };

    if let Err(e) = stroke::persist_element(&state.pool, template_id, &element).await {
        tracing::error!(%template_id, error = %e, "element append failed");
        return AppendOutcome::Rejected("failed to save stroke".to_owned());
    }

    let mut boards = state.boards.write().await;
    match boards.get_mut(&template_id) {
        Some(board) => {
            board.append(element);
            AppendOutcome::Appended(board.snapshot())
        }
        // Everyone disconnected while the write was in flight; the row is
        // durable and will be hydrated on the next join.
        None => AppendOutcome::Dropped,
    }
}
