use crate::catalog::client::{CatalogClient, FetchError};
use crate::catalog::types::{CatalogItem, CategoryRow};
use crate::config::CategoryQuery;
use futures::future::try_join_all;
use std::collections::HashSet;

/// Fetches every configured category concurrently.
///
/// One request per query, all in flight at once, joined via `try_join_all`.
/// Fail-on-first-error: the join resolves to `Err` as soon as any fetch
/// fails and the remaining in-flight requests are dropped — no partial
/// mapping is ever returned. On success the rows preserve the configured
/// category order.
pub async fn fetch_all(
    client: &CatalogClient,
    queries: &[CategoryQuery],
) -> Result<Vec<CategoryRow>, FetchError> {
    let fetches = queries.iter().map(|query| async move {
        let items = client.fetch_list(&query.route).await?;
        tracing::debug!(category = %query.title, count = items.len(), "Fetched category");
        Ok::<CategoryRow, FetchError>(CategoryRow {
            title: query.title.clone(),
            items: dedup_items(items),
        })
    });

    try_join_all(fetches).await
}

/// Drop repeated entries within one category list, keeping the first
/// occurrence and the API-provided order. Keyed by (kind, id) because movie
/// and series ids share one numeric space in mixed rows.
fn dedup_items(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.kind(), item.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::MediaKind;

    fn movie(id: i64) -> CatalogItem {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("m{id}") })).unwrap()
    }

    fn series(id: i64) -> CatalogItem {
        serde_json::from_value(serde_json::json!({ "id": id, "name": format!("s{id}") })).unwrap()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let items = vec![movie(1), movie(2), movie(1), movie(3), movie(2)];
        let deduped = dedup_items(items);
        let ids: Vec<i64> = deduped.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_dedup_distinguishes_kinds_sharing_an_id() {
        let deduped = dedup_items(vec![movie(7), series(7)]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].kind(), MediaKind::Movie);
        assert_eq!(deduped[1].kind(), MediaKind::Series);
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_items(Vec::new()).is_empty());
    }
}
