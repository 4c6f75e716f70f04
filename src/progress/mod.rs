//! Continue watching and watchlist access.
//!
//! This path is a secondary enhancement: it loads independently of the
//! category/spotlight feed and every failure here degrades to a safe
//! default (empty row, "not in watchlist") instead of surfacing. Only the
//! category grid is allowed to show the user an error.

mod projector;

pub use projector::{
    card_for, completion_percent, project, remaining_label, resolve_episode,
    resolve_full_duration, resolve_kind, resolve_season, resolve_watched_duration,
    ContinueWatchingCard, ProgressEntry, ProgressFields, MAX_VISIBLE,
};

use crate::catalog::CatalogItem;
use crate::storage::Database;

/// How many recent entries to read from storage per projection pass.
/// Deliberately larger than the display cap so a "view more" surface can
/// page through the rest.
const SCAN_LIMIT: i64 = 50;

/// Assemble the continue-watching row.
///
/// A storage failure is logged and degrades to an empty row — this path
/// must never block or fail the home feed.
pub async fn continue_watching_row(db: &Database, limit: usize) -> Vec<ContinueWatchingCard> {
    let entries = match db.list_continue_watching(SCAN_LIMIT).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(error = %error, "Failed to read playback progress, hiding row");
            Vec::new()
        }
    };
    project(&entries, limit)
}

/// Watchlist membership, degrading to `false` on storage failure.
pub async fn is_watchlisted(db: &Database, media_id: i64) -> bool {
    db.is_watchlisted(media_id).await.unwrap_or_else(|error| {
        tracing::warn!(media_id, error = %error, "Watchlist read failed");
        false
    })
}

/// Toggle watchlist membership, returning the new state. A storage failure
/// means no state change and reads as "not in watchlist".
pub async fn toggle_watchlist(db: &Database, item: &CatalogItem) -> bool {
    db.toggle_watchlist(item).await.unwrap_or_else(|error| {
        tracing::warn!(media_id = item.id, error = %error, "Watchlist toggle failed");
        false
    })
}
