//! Shared element model and JSON codec for the whiteboard stroke log.
//!
//! This crate owns the wire representation used by both `server` and `board`.
//! A board's drawing state is an append-only, server-ordered log of
//! [`CanvasElement`]s; clients submit drafts ([`StrokeData`], [`TextData`])
//! and the server assigns identity and arrival time before fan-out.
//!
//! All coordinates on the wire are normalized to `[0, 1]` against the board's
//! base resolution, which is what makes a stroke land on the same spot on
//! every device. Values slightly outside that range are legal (drawing can
//! run off the edge of the canvas) and consumers must not clamp them.


use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned by the `decode_*` / `encode_*` functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text could not be decoded as a known message.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),
    /// The message could not be serialized to JSON text.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A point normalized against the board's base resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Brush tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Normal source-over drawing.
    #[default]
    Pen,
    /// Destructive compositing: erases whatever was drawn underneath.
    Eraser,
}

/// A finished stroke as submitted by a client. The server assigns `id` and
/// `created_at` on append; a draft never carries either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub tool: Tool,
    pub points: Vec<Point>,
    pub color: String,
    pub size: f64,
}

impl StrokeData {
    /// A stroke needs at least two points to describe a visible line.
    /// Single-point taps are degenerate and are dropped, not appended.
    #[must_use]
    pub fn has_line(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A committed stroke in the server-ordered log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: Uuid,
    pub tool: Tool,
    pub points: Vec<Point>,
    pub color: String,
    pub size: f64,
    /// Server arrival time, milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// A text annotation draft submitted by a client (operator console).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
    /// Normalized anchor position.
    pub position: Point,
    pub color: String,
    /// Font size in surface pixels.
    pub font_size: f64,
}

/// A committed text annotation in the server-ordered log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNote {
    pub id: Uuid,
    pub text: String,
    pub position: Point,
    pub color: String,
    pub font_size: f64,
    /// Server arrival time, milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// One element of a board's drawing state.
///
/// Closed union, tagged on the wire with `kind`. Today only strokes have a
/// drawing gesture behind them; text notes are placed by the operator
/// console. New element kinds extend this enum so every consumer's `match`
/// stays exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CanvasElement {
    Stroke(Stroke),
    Text(TextNote),
}

impl CanvasElement {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Stroke(s) => s.id,
            Self::Text(t) => t.id,
        }
    }

    /// Server arrival time, milliseconds since the Unix epoch.
    #[must_use]
    pub fn created_at(&self) -> i64 {
        match self {
            Self::Stroke(s) => s.created_at,
            Self::Text(t) => t.created_at,
        }
    }
}

/// Messages a client sends over the board socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Append a finished stroke to the board's log.
    AppendStroke { stroke: StrokeData },
    /// Append a text annotation to the board's log.
    AppendText { note: TextData },
}

/// Messages the server sends over the board socket.
///
/// Element delivery is snapshot-based: every change re-sends the full
/// ordered list rather than a delta. Clients replace their local copy
/// wholesale, which makes delivery trivially idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Board metadata; sent on connect and on every template change.
    Board {
        name: String,
        background_image: String,
        locked: bool,
    },
    /// The full ordered element list; sent on connect and after every append.
    Snapshot { elements: Vec<CanvasElement> },
    /// Non-fatal failure surfaced to the client (e.g. append to a locked board).
    Error { message: String },
}

/// Serialize a client message to JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_client_message(msg: &ClientMessage) -> Result<String, CodecError> {
    serde_json::to_string(msg).map_err(CodecError::Encode)
}

/// Parse a client message from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is not a known client message.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

/// Serialize a server message to JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_server_message(msg: &ServerMessage) -> Result<String, CodecError> {
    serde_json::to_string(msg).map_err(CodecError::Encode)
}

/// Parse a server message from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is not a known server message.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
