//! Client side of the sync gateway: the boundary to the hosted stroke log.
//!
//! The gateway is transport-agnostic. It produces the socket endpoint and
//! outbound message payloads, and interprets inbound text into typed
//! [`ServerMessage`]s; the host owns the actual WebSocket and feeds text
//! through [`SyncGateway::handle_message`]. Subscription is snapshot-based:
//! every change delivers the full ordered element list, which the host loads
//! into the engine wholesale. Local strokes are never merged into that list —
//! the only optimistic feedback is the engine's incremental rendering, which
//! the next authoritative redraw supersedes.
//!
//! A failed append has no rollback: the locally drawn stroke stays visible
//! until the next authoritative snapshot omits it. Decode failures are
//! returned to the host to surface as a transient warning, never panics.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use uuid::Uuid;
use wire::{ClientMessage, CodecError, ServerMessage, StrokeData, TextData};

/// Boundary object for one board's ordered stroke log.
#[derive(Debug, Clone)]
pub struct SyncGateway {
    template_id: Uuid,
}

impl SyncGateway {
    #[must_use]
    pub fn new(template_id: Uuid) -> Self {
        Self { template_id }
    }

    /// The board (template) this gateway is bound to.
    #[must_use]
    pub fn template_id(&self) -> Uuid {
        self.template_id
    }

    /// Server endpoint path for this board's socket.
    #[must_use]
    pub fn socket_path(&self) -> String {
        format!("/ws/{}", self.template_id)
    }

    /// Encode an append request for a finished stroke.
    ///
    /// # Errors
    ///
    /// Returns a codec error if serialization fails.
    pub fn append_stroke(&self, stroke: StrokeData) -> Result<String, CodecError> {
        wire::encode_client_message(&ClientMessage::AppendStroke { stroke })
    }

    /// Encode an append request for a text annotation.
    ///
    /// # Errors
    ///
    /// Returns a codec error if serialization fails.
    pub fn append_text(&self, note: TextData) -> Result<String, CodecError> {
        wire::encode_client_message(&ClientMessage::AppendText { note })
    }

    /// Interpret one inbound socket text message.
    ///
    /// # Errors
    ///
    /// Returns a codec error when the text is not a known server message;
    /// the host should log it and show a transient sync warning.
    pub fn handle_message(&self, text: &str) -> Result<ServerMessage, CodecError> {
        wire::decode_server_message(text)
    }
}
