//! Element log service — commit, persist, and hydrate board elements.
//!
//! Drafts arrive without identity; [`commit_stroke`] / [`commit_text`]
//! assign the server-side id and arrival time that define the element's
//! place in the log. Rows store the element as its wire JSON under a
//! server-assigned `seq`, so hydration is a single ordered scan.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;
use wire::{CanvasElement, Stroke, StrokeData, TextData, TextNote};

#[derive(Debug, thiserror::Error)]
pub enum StrokeError {
    #[error("failed to serialize element: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Turn a stroke draft into a committed element.
#[must_use]
pub fn commit_stroke(data: StrokeData, id: Uuid, created_at: i64) -> CanvasElement {
    CanvasElement::Stroke(Stroke {
        id,
        tool: data.tool,
        points: data.points,
        color: data.color,
        size: data.size,
        created_at,
    })
}

/// Turn a text draft into a committed element.
#[must_use]
pub fn commit_text(data: TextData, id: Uuid, created_at: i64) -> CanvasElement {
    CanvasElement::Text(TextNote {
        id,
        text: data.text,
        position: data.position,
        color: data.color,
        font_size: data.font_size,
        created_at,
    })
}

/// Write one committed element through to its log row.
///
/// # Errors
///
/// Returns a serialization or database error if the write fails.
pub async fn persist_element(
    pool: &PgPool,
    template_id: Uuid,
    element: &CanvasElement,
) -> Result<(), StrokeError> {
    let payload = serde_json::to_value(element)?;
    sqlx::query("INSERT INTO elements (id, template_id, payload, created_at) VALUES ($1, $2, $3, $4)")
        .bind(element.id())
        .bind(template_id)
        .bind(payload)
        .bind(element.created_at())
        .execute(pool)
        .await?;
    Ok(())
}

/// Load a board's element log in server order.
///
/// Rows whose payload no longer parses (schema drift) are skipped with a
/// warning rather than poisoning the whole board.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn load_elements(
    pool: &PgPool,
    template_id: Uuid,
) -> Result<Vec<CanvasElement>, StrokeError> {
    let rows = sqlx::query_as::<_, (serde_json::Value,)>(
        "SELECT payload FROM elements WHERE template_id = $1 ORDER BY seq ASC",
    )
    .bind(template_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(payload,)| match serde_json::from_value::<CanvasElement>(payload) {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(%template_id, error = %e, "skipping unreadable element row");
                None
            }
        })
        .collect())
}
