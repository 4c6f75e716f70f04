//! Remote metadata API access.
//!
//! This module covers everything that talks to the catalog service:
//!
//! - [`aggregator`] - concurrent per-category fan-out (fail-on-first-error)
//! - [`spotlight`] - hero selection and detail hydration with graceful fallback
//! - the client itself: HTTP transport with timeouts and response-size limits
//!
//! The aggregator and the spotlight resolver sit on opposite ends of the
//! failure-tolerance spectrum on purpose: a failed category fetch fails the
//! whole feed load, while a failed spotlight detail fetch silently degrades
//! to the summary record.

pub mod aggregator;
mod client;
pub mod spotlight;
mod types;

pub use client::{CatalogClient, FetchError};
pub use types::{
    CatalogItem, CategoryRow, CertificationEntry, ContentRatingEntry, ContentRatings, ImageSet,
    LogoImage, MediaKind, ReleaseDateEntry, ReleaseDates,
};
