//! marquee — home-feed aggregation for TMDB-shaped media catalogs.
//!
//! The crate assembles a render-ready home feed from three independent
//! sources:
//!
//! - [`catalog`] - concurrent category fan-out and spotlight hydration
//!   against the remote metadata API
//! - [`home`] - snapshot assembly and the single-slot staleness cache
//! - [`progress`] - the locally derived continue-watching row and watchlist
//!
//! Failure policy in one line: a category fetch failure fails the load;
//! everything else (spotlight detail, progress reads, watchlist ops)
//! degrades silently to a safe default.

pub mod catalog;
pub mod config;
pub mod home;
pub mod progress;
pub mod storage;
