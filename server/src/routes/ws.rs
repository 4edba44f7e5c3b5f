//! WebSocket handler — board join, append dispatch, snapshot fan-out.
//!
//! DESIGN
//! ======
//! On upgrade, the client joins the board for the template in the path:
//! the board is hydrated if needed, the client's outgoing channel is
//! registered, and the server sends `board` metadata followed by the full
//! `snapshot`. From then on a `select!` loop interleaves:
//! - Incoming client messages → decode + append via the board service
//! - Fan-out messages from board peers → forward to this client
//!
//! Delivery is snapshot-based: every successful append broadcasts the full
//! ordered element list to every client on the board, sender included. The
//! sender's optimistic local rendering is superseded by that snapshot.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → join → send `board` + `snapshot`
//! 2. Client appends → validate → persist → broadcast snapshot
//! 3. Close → part board (board evicted when the last client leaves)

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;
use wire::ServerMessage;

use crate::services::board::{self, AppendOutcome};
use crate::state::AppState;

pub async fn handle_ws(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state, template_id))
}

async fn run_ws(mut socket: WebSocket, state: AppState, template_id: Uuid) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for receiving fan-out from board peers.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerMessage>(256);

    let (board_msg, snapshot) =
        match board::join_board(&state, template_id, client_id, client_tx).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(%template_id, error = %e, "ws: join rejected");
                let err = ServerMessage::Error { message: e.to_string() };
                let _ = send_message(&mut socket, &err).await;
                return;
            }
        };

    info!(%template_id, %client_id, "ws: client connected");

    if send_message(&mut socket, &board_msg).await.is_err()
        || send_message(&mut socket, &snapshot).await.is_err()
    {
        board::part_board(&state, template_id, client_id).await;
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        dispatch_text(&state, &mut socket, template_id, client_id, text.as_str()).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(msg) = client_rx.recv() => {
                if send_message(&mut socket, &msg).await.is_err() {
                    break;
                }
            }
        }
    }

    board::part_board(&state, template_id, client_id).await;
    info!(%client_id, "ws: client disconnected");
}

/// Decode one inbound text message, run the append, apply the outcome.
async fn dispatch_text(
    state: &AppState,
    socket: &mut WebSocket,
    template_id: Uuid,
    client_id: Uuid,
    text: &str,
) {
    let msg = match wire::decode_client_message(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: malformed client message");
            let err = ServerMessage::Error { message: "malformed message".to_owned() };
            let _ = send_message(socket, &err).await;
            return;
        }
    };

    match board::append_element(state, template_id, msg).await {
        AppendOutcome::Appended(snapshot) => {
            state.broadcast(template_id, &snapshot).await;
        }
        AppendOutcome::Rejected(message) => {
            let _ = send_message(socket, &ServerMessage::Error { message }).await;
        }
        AppendOutcome::Dropped => {}
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), axum::Error> {
    let text = match wire::encode_server_message(msg) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "ws: failed to encode outbound message");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await
}
