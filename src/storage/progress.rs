use anyhow::Result;
use chrono::Utc;

use super::schema::Database;
use crate::progress::ProgressEntry;

impl Database {
    // ========================================================================
    // Playback Progress Operations
    // ========================================================================

    /// Insert or replace the raw progress entry for one item.
    ///
    /// The entry is stored as JSON verbatim; older schema shapes remain
    /// readable because normalization happens at projection time.
    pub async fn upsert_progress(
        &self,
        media_kind: &str,
        media_id: i64,
        entry: &serde_json::Value,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO playback_progress
                (media_id, media_kind, entry, updated_at)
            VALUES (?, ?, ?, ?)
        "#,
        )
        .bind(media_id)
        .bind(media_kind)
        .bind(entry.to_string())
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove the progress entry for one item (finished or dismissed).
    ///
    /// Returns true if an entry was deleted.
    pub async fn remove_progress(&self, media_kind: &str, media_id: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM playback_progress WHERE media_kind = ? AND media_id = ?")
                .bind(media_kind)
                .bind(media_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Most recently updated progress entries, newest first.
    ///
    /// Rows whose stored JSON no longer parses are skipped with a warning
    /// rather than failing the whole row — stale shapes must never take the
    /// continue-watching feature down.
    pub async fn list_continue_watching(&self, limit: i64) -> Result<Vec<ProgressEntry>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT entry
            FROM playback_progress
            ORDER BY updated_at DESC, rowid DESC
            LIMIT ?
        "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let total = rows.len();
        let entries: Vec<ProgressEntry> = rows
            .into_iter()
            .filter_map(|(raw,)| match serde_json::from_str(&raw) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(error = %error, "Skipping unparseable progress entry");
                    None
                }
            })
            .collect();

        if entries.len() < total {
            tracing::warn!(
                skipped = total - entries.len(),
                "Some stored progress entries were skipped"
            );
        }

        Ok(entries)
    }
}
