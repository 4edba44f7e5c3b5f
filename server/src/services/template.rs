//! Template service — operator CRUD and lock/background updates.
//!
//! Templates are the durable identity of a board: a name, a background
//! image reference, and the `locked` (view-only) flag. They are created and
//! managed from the operator panel over REST; the live board state mirrors
//! them while clients are connected.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use sqlx::PgPool;
use uuid::Uuid;

use crate::state::Template;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a new template, unlocked by default.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_template(
    pool: &PgPool,
    name: &str,
    background_image: &str,
) -> Result<Template, TemplateError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO templates (id, name, background_image, locked) VALUES ($1, $2, $3, FALSE)")
        .bind(id)
        .bind(name)
        .bind(background_image)
        .execute(pool)
        .await?;

    Ok(Template {
        id,
        name: name.to_owned(),
        background_image: background_image.to_owned(),
        locked: false,
    })
}

/// List all templates, ordered by name for the operator panel.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_templates(pool: &PgPool) -> Result<Vec<Template>, TemplateError> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, bool)>(
        "SELECT id, name, background_image, locked FROM templates ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, background_image, locked)| Template { id, name, background_image, locked })
        .collect())
}

/// Fetch one template.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<Template, TemplateError> {
    let row = sqlx::query_as::<_, (Uuid, String, String, bool)>(
        "SELECT id, name, background_image, locked FROM templates WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(|(id, name, background_image, locked)| Template { id, name, background_image, locked })
        .ok_or(TemplateError::NotFound(id))
}

/// Set the view-only flag.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn set_locked(pool: &PgPool, id: Uuid, locked: bool) -> Result<(), TemplateError> {
    let result = sqlx::query("UPDATE templates SET locked = $2 WHERE id = $1")
        .bind(id)
        .bind(locked)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TemplateError::NotFound(id));
    }
    Ok(())
}

/// Change the background image reference.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn set_background(
    pool: &PgPool,
    id: Uuid,
    background_image: &str,
) -> Result<(), TemplateError> {
    let result = sqlx::query("UPDATE templates SET background_image = $2 WHERE id = $1")
        .bind(id)
        .bind(background_image)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TemplateError::NotFound(id));
    }
    Ok(())
}
