//! Progress and watchlist lifecycle tests against an in-memory database:
//! storage round-trips through projection, the display cap, corrupt-row
//! tolerance, and watchlist toggling.

use marquee::catalog::{CatalogItem, MediaKind};
use marquee::progress::{self, MAX_VISIBLE};
use marquee::storage::Database;

async fn test_db() -> Database {
    Database::open(":memory:").await.unwrap()
}

#[tokio::test]
async fn test_progress_lifecycle_to_continue_watching_row() {
    let db = test_db().await;

    db.upsert_progress(
        "tv",
        1396,
        &serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "mediaType": "tv",
            "backdrop_path": "/bb.jpg",
            "__progress": { "season": 2, "episode": 4, "watchedDuration": 300.0, "fullDuration": 2880.0 }
        }),
    )
    .await
    .unwrap();
    db.upsert_progress(
        "movie",
        603,
        &serde_json::json!({
            "id": 603,
            "title": "The Matrix",
            "watched_duration": 4080.0,
            "full_duration": 8160.0
        }),
    )
    .await
    .unwrap();

    let row = progress::continue_watching_row(&db, MAX_VISIBLE).await;
    assert_eq!(row.len(), 2);

    // Most recent write first
    let movie = &row[0];
    assert_eq!(movie.kind, MediaKind::Movie);
    assert_eq!(movie.path, "/movie/603?watch=1&season=1&episode=1");
    assert_eq!(movie.percent, 50);
    assert_eq!(movie.label, "Movie • 1h8m left");

    let series = &row[1];
    assert_eq!(series.kind, MediaKind::Series);
    assert_eq!(series.path, "/tv/1396?watch=1&season=2&episode=4");
    assert_eq!(series.label, "S2 • E4 • 43m left");
    assert_eq!(series.image.as_deref(), Some("/bb.jpg"));

    // Finishing the movie drops it from the row
    assert!(db.remove_progress("movie", 603).await.unwrap());
    let row = progress::continue_watching_row(&db, MAX_VISIBLE).await;
    assert_eq!(row.len(), 1);
    assert_eq!(row[0].id, 1396);
}

#[tokio::test]
async fn test_row_caps_at_visible_limit() {
    let db = test_db().await;
    for id in 0..12 {
        db.upsert_progress(
            "movie",
            id,
            &serde_json::json!({ "id": id, "title": format!("m{id}") }),
        )
        .await
        .unwrap();
    }

    let row = progress::continue_watching_row(&db, MAX_VISIBLE).await;
    assert_eq!(row.len(), 8);
}

#[tokio::test]
async fn test_corrupt_stored_entry_does_not_hide_the_row() {
    let db = test_db().await;
    db.upsert_progress(
        "movie",
        1,
        &serde_json::json!({ "id": 1, "title": "Intact" }),
    )
    .await
    .unwrap();
    // An entry written by some future schema the deserializer rejects
    db.upsert_progress("movie", 2, &serde_json::json!({ "id": "not-a-number" }))
        .await
        .unwrap();

    let row = progress::continue_watching_row(&db, MAX_VISIBLE).await;
    assert_eq!(row.len(), 1);
    assert_eq!(row[0].title, "Intact");
}

#[tokio::test]
async fn test_watchlist_toggle_round_trip() {
    let db = test_db().await;
    let item: CatalogItem =
        serde_json::from_value(serde_json::json!({ "id": 603, "title": "The Matrix" })).unwrap();

    assert!(!progress::is_watchlisted(&db, 603).await);
    assert!(progress::toggle_watchlist(&db, &item).await);
    assert!(progress::is_watchlisted(&db, 603).await);
    assert!(!progress::toggle_watchlist(&db, &item).await);
    assert!(!progress::is_watchlisted(&db, 603).await);
}
