use crate::catalog::{aggregator, spotlight, CatalogClient, FetchError};
use crate::config::CategoryQuery;
use crate::home::cache::FeedCache;
use crate::home::snapshot::FeedSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors surfaced by a home feed load.
///
/// Only `Fetch` represents a user-visible failure (the category grid is the
/// primary content); `Cancelled` means the result was discarded because the
/// consumer moved on before the load finished.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A category fetch failed; the whole load fails with it
    #[error("Category fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The load was superseded or cancelled before it could publish
    #[error("Load superseded before completion")]
    Cancelled,
}

// ============================================================================
// Cancellation
// ============================================================================

/// Generation counter for cancelling in-flight loads.
///
/// Each `begin()` bumps the generation and hands out a ticket pinned to the
/// new value. A load holding an older ticket observes the mismatch before
/// publishing and discards its result instead of mutating shared state —
/// the replacement for a closure-captured liveness boolean.
#[derive(Clone, Default)]
pub struct LoadGeneration {
    current: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding any ticket issued earlier.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Invalidate all outstanding tickets without starting a new load
    /// (consumer navigated away).
    pub fn cancel_all(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Ticket for one load attempt. Checked immediately before any state
/// mutation; a stale ticket means the result must be discarded.
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn is_live(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Orchestrates the home feed: cache-or-fetch decision, concurrent category
/// fan-out, spotlight hydration, and atomic publication of the snapshot.
pub struct HomeFeedLoader {
    client: CatalogClient,
    cache: FeedCache,
    queries: Vec<CategoryQuery>,
    ttl: Duration,
}

impl HomeFeedLoader {
    pub fn new(
        client: CatalogClient,
        cache: FeedCache,
        queries: Vec<CategoryQuery>,
        ttl: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            queries,
            ttl,
        }
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    /// Load the home feed, reusing the cached snapshot while it is fresh.
    ///
    /// Cache hit: no network traffic at all. Cache miss or stale: all
    /// categories are fetched concurrently (fail-on-first-error), the
    /// spotlight is resolved, and the assembled snapshot replaces the cached
    /// one — unless the ticket was superseded meanwhile, in which case the
    /// result is discarded and `FeedError::Cancelled` returned.
    pub async fn load(&self, ticket: &LoadTicket) -> Result<Arc<FeedSnapshot>, FeedError> {
        if self.cache.is_fresh(Instant::now(), self.ttl) {
            if let Some(snapshot) = self.cache.get() {
                tracing::debug!("Serving home feed from cache");
                return Ok(snapshot);
            }
        }
        self.reload(ticket).await
    }

    /// Load the home feed unconditionally, bypassing the freshness check.
    pub async fn reload(&self, ticket: &LoadTicket) -> Result<Arc<FeedSnapshot>, FeedError> {
        let categories = aggregator::fetch_all(&self.client, &self.queries).await?;

        // The detail fetch is outside the fail-fast join: its failure is
        // converted to a summary-item fallback inside resolve().
        let spotlight = match spotlight::candidate(&self.queries, &categories) {
            Some(summary) => Some(spotlight::resolve(&self.client, summary).await),
            None => {
                tracing::debug!("Spotlight-eligible category returned no items, hero stays unset");
                None
            }
        };

        let snapshot = Arc::new(FeedSnapshot {
            categories,
            spotlight,
        });

        if !ticket.is_live() {
            tracing::debug!("Home feed load superseded, discarding result");
            return Err(FeedError::Cancelled);
        }

        self.cache.put(Arc::clone(&snapshot), Instant::now());
        tracing::info!(
            categories = snapshot.categories.len(),
            spotlight = snapshot.spotlight.is_some(),
            "Published home feed snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_live_until_next_begin() {
        let generation = LoadGeneration::new();
        let first = generation.begin();
        assert!(first.is_live());

        let second = generation.begin();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn test_cancel_all_invalidates_outstanding_tickets() {
        let generation = LoadGeneration::new();
        let ticket = generation.begin();
        generation.cancel_all();
        assert!(!ticket.is_live());
    }
}
