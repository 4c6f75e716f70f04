//! Home feed assembly and staleness caching.
//!
//! - [`FeedSnapshot`] - the render-ready feed value (category rows + spotlight)
//! - [`FeedCache`] - single-slot cache answering "is this still fresh?"
//! - [`HomeFeedLoader`] - cache-or-fetch orchestration with
//!   generation-counter cancellation
//!
//! The continue-watching row deliberately lives elsewhere ([`crate::progress`]):
//! it loads and fails independently of the category/spotlight path.

mod cache;
mod loader;
mod snapshot;

pub use cache::FeedCache;
pub use loader::{FeedError, HomeFeedLoader, LoadGeneration, LoadTicket};
pub use snapshot::FeedSnapshot;
