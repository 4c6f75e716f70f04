use anyhow::Result;
use chrono::Utc;

use super::schema::Database;
use super::types::WatchlistEntry;
use crate::catalog::CatalogItem;

impl Database {
    // ========================================================================
    // Watchlist Operations
    // ========================================================================

    /// Whether the given item is on the watchlist.
    pub async fn is_watchlisted(&self, media_id: i64) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM watchlist WHERE media_id = ?")
            .bind(media_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Toggle watchlist membership for an item, returning the new state
    /// (true = now on the watchlist).
    ///
    /// Check and mutation run in one transaction so two rapid toggles
    /// cannot interleave into a double-insert.
    pub async fn toggle_watchlist(&self, item: &CatalogItem) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM watchlist WHERE media_id = ?")
            .bind(item.id)
            .fetch_optional(&mut *tx)
            .await?;

        let added = if existing.is_some() {
            sqlx::query("DELETE FROM watchlist WHERE media_id = ?")
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
            false
        } else {
            sqlx::query(
                r#"
                INSERT INTO watchlist (media_id, media_kind, title, added_at)
                VALUES (?, ?, ?, ?)
            "#,
            )
            .bind(item.id)
            .bind(item.kind().route_segment())
            .bind(item.display_title())
            .bind(Utc::now().timestamp())
            .execute(&mut *tx)
            .await?;
            true
        };

        tx.commit().await?;
        Ok(added)
    }

    /// All watchlist entries, newest first.
    pub async fn list_watchlist(&self) -> Result<Vec<WatchlistEntry>> {
        let rows: Vec<(i64, String, String, i64)> = sqlx::query_as(
            r#"
            SELECT media_id, media_kind, title, added_at
            FROM watchlist
            ORDER BY added_at DESC, rowid DESC
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(media_id, media_kind, title, added_at)| WatchlistEntry {
                media_id,
                media_kind,
                title,
                added_at,
            })
            .collect())
    }
}
