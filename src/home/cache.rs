use crate::home::snapshot::FeedSnapshot;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct CachedFeed {
    snapshot: Arc<FeedSnapshot>,
    captured_at: Instant,
}

/// Single-slot cache holding the last successfully assembled home feed.
///
/// Not a general key-space cache: there is exactly one current snapshot,
/// replaced wholesale on every successful load. The clock is passed in by
/// callers so freshness is deterministic under test.
///
/// Rationale: avoids a redundant six-way network fan-out on rapid
/// remount/navigation within the staleness window, while never serving a
/// half-populated snapshot as fresh.
#[derive(Clone, Default)]
pub struct FeedCache {
    inner: Arc<RwLock<Option<CachedFeed>>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, regardless of freshness.
    pub fn get(&self) -> Option<Arc<FeedSnapshot>> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|cached| Arc::clone(&cached.snapshot))
    }

    /// Replace the current snapshot and its capture timestamp. Readers see
    /// either the old slot or the new one, never an intermediate state.
    pub fn put(&self, snapshot: Arc<FeedSnapshot>, now: Instant) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(CachedFeed {
            snapshot,
            captured_at: now,
        });
    }

    /// True iff `now - captured_at < ttl` AND the snapshot has at least one
    /// non-empty category AND a spotlight item. An empty or spotlight-less
    /// snapshot is never fresh, regardless of its timestamp.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(cached) => {
                now.duration_since(cached.captured_at) < ttl
                    && cached.snapshot.has_renderable_content()
            }
            None => false,
        }
    }

    /// Drop the cached snapshot, forcing the next load to refetch.
    pub fn invalidate(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}
