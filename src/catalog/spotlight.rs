use crate::catalog::client::CatalogClient;
use crate::catalog::types::{CatalogItem, CategoryRow};
use crate::config::CategoryQuery;

/// Picks the hero candidate: the first item of the spotlight-eligible
/// category's fetched row.
///
/// Configuration marks exactly one category as eligible. If its row came
/// back empty the spotlight stays unset — no other category is promoted in
/// its place.
pub fn candidate(queries: &[CategoryQuery], rows: &[CategoryRow]) -> Option<CatalogItem> {
    let eligible = queries.iter().find(|query| query.spotlight)?;
    rows.iter()
        .find(|row| row.title == eligible.title)
        .and_then(|row| row.items.first())
        .cloned()
}

/// Hydrates the spotlight candidate with its extended detail record.
///
/// On success the detail record replaces the summary. A failed detail fetch
/// is the one tolerated partial failure in the feed path: the summary item
/// is used as-is and the error is only logged, never surfaced.
pub async fn resolve(client: &CatalogClient, summary: CatalogItem) -> CatalogItem {
    match client.fetch_detail(summary.kind(), summary.id).await {
        Ok(detail) => detail,
        Err(error) => {
            tracing::warn!(
                id = summary.id,
                kind = %summary.kind(),
                error = %error,
                "Spotlight detail fetch failed, falling back to summary item"
            );
            summary
        }
    }
}
