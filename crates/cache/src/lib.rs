//! Single-slot record cache with version metadata and expiry.
//!
//! The store persists exactly two things: one opaque cache slot (the full
//! record set of the last successful fetch, tagged with its content
//! version and the producing app version) and one update-check marker
//! timestamp. It is not the source of truth - the remote corpus is - so
//! every failure mode on the read path degrades to a cache miss.

pub mod error;
mod store;

pub use crate::store::{CACHE_TTL, CHECK_INTERVAL, CacheEntry, Store};
