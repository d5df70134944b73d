//! Client-side movie cache - detail lookups plus the "popular" and search
//! listings a browsing UI pages through.
//!
//! One [`MovieCacheController`] is owned per browsing session. It keeps:
//! - a by-ID detail cache (write-once per ID, no expiry)
//! - the current page of the popular listing
//! - the current page of the active search
//!
//! Page navigation is guarded per listing: while a page request is in flight,
//! further navigations on that listing return `None` instead of queueing.

mod controller;
mod loading;

pub use controller::{MovieCacheController, PopularListing, SearchListing};
