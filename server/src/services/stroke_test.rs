use super::*;
#[cfg(feature = "live-db-tests")]
use sqlx::postgres::PgPoolOptions;
use wire::{Point, Tool};

fn draft() -> StrokeData {
    StrokeData {
        tool: Tool::Eraser,
        points: vec![Point::new(0.25, 0.5), Point::new(0.75, 0.5)],
        color: "#000000".to_owned(),
        size: 20.0,
    }
}

#[test]
fn commit_stroke_assigns_identity_and_keeps_the_draft() {
    let id = Uuid::new_v4();
    let element = commit_stroke(draft(), id, 1234);
    let CanvasElement::Stroke(stroke) = element else {
        panic!("expected stroke element");
    };
    assert_eq!(stroke.id, id);
    assert_eq!(stroke.created_at, 1234);
    assert_eq!(stroke.tool, Tool::Eraser);
    assert_eq!(stroke.points, draft().points);
    assert_eq!(stroke.color, "#000000");
    assert_eq!(stroke.size, 20.0);
}

#[test]
fn commit_text_assigns_identity_and_keeps_the_draft() {
    let id = Uuid::new_v4();
    let element = commit_text(
        TextData {
            text: "LOOK HERE".to_owned(),
            position: Point::new(0.5, 0.1),
            color: "#00ff88".to_owned(),
            font_size: 32.0,
        },
        id,
        777,
    );
    let CanvasElement::Text(note) = element else {
        panic!("expected text element");
    };
    assert_eq!(note.id, id);
    assert_eq!(note.created_at, 777);
    assert_eq!(note.text, "LOOK HERE");
    assert_eq!(note.position, Point::new(0.5, 0.1));
    assert_eq!(note.font_size, 32.0);
}

#[test]
fn element_payload_round_trips_through_json() {
    // The same conversion persist_element and load_elements use.
    let element = commit_stroke(draft(), Uuid::new_v4(), 42);
    let payload = serde_json::to_value(&element).expect("serialize");
    let restored: CanvasElement = serde_json::from_value(payload).expect("deserialize");
    assert_eq!(restored, element);
}

/// Persist + hydrate against a real database.
/// Run with: `cargo test --features live-db-tests` and TEST_DATABASE_URL set.
#[cfg(feature = "live-db-tests")]
#[tokio::test]
async fn persisted_elements_hydrate_in_append_order() {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL required");
    let pool = PgPoolOptions::new().connect(&url).await.expect("connect");
    sqlx::migrate!("src/db/migrations").run(&pool).await.expect("migrate");

    let template = crate::services::template::create_template(&pool, "stroke-live", "")
        .await
        .expect("create template");

    let first = commit_stroke(draft(), Uuid::new_v4(), 1);
    let second = commit_stroke(draft(), Uuid::new_v4(), 2);
    persist_element(&pool, template.id, &first).await.expect("persist first");
    persist_element(&pool, template.id, &second).await.expect("persist second");

    let elements = load_elements(&pool, template.id).await.expect("load");
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].id(), first.id());
    assert_eq!(elements[1].id(), second.id());
}
