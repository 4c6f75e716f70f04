//! Local persistence for watchlist membership and playback progress.
//!
//! Backed by SQLite via sqlx. Progress entries are stored as raw JSON
//! because they may have been written by older schema versions; the
//! projection layer ([`crate::progress`]) normalizes the shapes on read.

mod progress;
mod schema;
mod types;
mod watchlist;

pub use schema::Database;
pub use types::{DatabaseError, WatchlistEntry};
