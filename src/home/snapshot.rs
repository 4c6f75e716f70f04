use crate::catalog::{CatalogItem, CategoryRow};

/// A fully assembled, render-ready home feed.
///
/// Category rows keep the configured declaration order. A snapshot is an
/// immutable value: the loader builds one off to the side and publishes it
/// to the cache in a single replacement, so consumers never observe a
/// half-populated feed. The capture timestamp lives in the cache slot, not
/// here, keeping snapshots freely shareable via `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub categories: Vec<CategoryRow>,
    /// Hero item. `None` while unresolved or when the spotlight-eligible
    /// category returned no items.
    pub spotlight: Option<CatalogItem>,
}

impl FeedSnapshot {
    /// Items for one category, looked up by its configured title.
    pub fn category(&self, title: &str) -> Option<&[CatalogItem]> {
        self.categories
            .iter()
            .find(|row| row.title == title)
            .map(|row| row.items.as_slice())
    }

    /// A snapshot is renderable when at least one category has items and
    /// the spotlight is set. Anything less must not be served as fresh.
    pub fn has_renderable_content(&self) -> bool {
        self.spotlight.is_some() && self.categories.iter().any(|row| !row.items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64) -> CatalogItem {
        serde_json::from_value(serde_json::json!({ "id": id, "title": "x" })).unwrap()
    }

    fn snapshot(with_items: bool, with_spotlight: bool) -> FeedSnapshot {
        FeedSnapshot {
            categories: vec![CategoryRow {
                title: "Trending".to_string(),
                items: if with_items { vec![item(1)] } else { Vec::new() },
            }],
            spotlight: with_spotlight.then(|| item(1)),
        }
    }

    #[test]
    fn test_renderable_requires_items_and_spotlight() {
        assert!(snapshot(true, true).has_renderable_content());
        assert!(!snapshot(false, true).has_renderable_content());
        assert!(!snapshot(true, false).has_renderable_content());
    }

    #[test]
    fn test_category_lookup_by_title() {
        let snap = snapshot(true, true);
        assert_eq!(snap.category("Trending").unwrap().len(), 1);
        assert!(snap.category("Unknown").is_none());
    }
}
