//! In-memory page cache.
//!
//! Pages are keyed by the exact URL string the user asked for (no
//! normalization). The cache is bounded:
//!
//! - Capacity limit with least-recently-used eviction
//! - Per-entry TTL, checked on lookup
//! - Never persisted; lives as long as the process

pub mod pages;

pub use pages::{Page, PageCache};
