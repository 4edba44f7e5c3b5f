use super::*;
#[cfg(feature = "live-db-tests")]
use sqlx::postgres::PgPoolOptions;

#[test]
fn not_found_error_is_greppable() {
    let id = Uuid::new_v4();
    let err = TemplateError::NotFound(id);
    assert_eq!(err.to_string(), format!("template not found: {id}"));
}

/// CRUD round trip against a real database.
/// Run with: `cargo test --features live-db-tests` and TEST_DATABASE_URL set.
#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn template_crud_round_trip() {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL required");
    let pool = PgPoolOptions::new().connect(&url).await.expect("connect");
    sqlx::migrate!("src/db/migrations").run(&pool).await.expect("migrate");

    let created = create_template(&pool, "crud-live", "https://assets.example/bg.png")
        .await
        .expect("create");
    assert!(!created.locked);

    let fetched = get_template(&pool, created.id).await.expect("get");
    assert_eq!(fetched, created);

    set_locked(&pool, created.id, true).await.expect("lock");
    set_background(&pool, created.id, "https://assets.example/other.png")
        .await
        .expect("background");

    let updated = get_template(&pool, created.id).await.expect("get updated");
    assert!(updated.locked);
    assert_eq!(updated.background_image, "https://assets.example/other.png");

    let all = list_templates(&pool).await.expect("list");
    assert!(all.iter().any(|t| t.id == created.id));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn unknown_template_is_not_found() {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL required");
    let pool = PgPoolOptions::new().connect(&url).await.expect("connect");
    sqlx::migrate!("src/db/migrations").run(&pool).await.expect("migrate");

    let missing = Uuid::new_v4();
    assert!(matches!(
        get_template(&pool, missing).await,
        Err(TemplateError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        set_locked(&pool, missing, true).await,
        Err(TemplateError::NotFound(_))
    ));
}
