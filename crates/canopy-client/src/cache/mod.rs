//! Definition caching.
//!
//! Space and content-type definitions can be persisted in a pluggable
//! key-value store so repeated client initialization skips the network:
//! - [`key`] derives the stable, collision-free cache keys;
//! - [`CacheStore`] is the store contract, with [`MemoryStore`] and
//!   [`SqliteStore`] shipped implementations;
//! - [`CacheWarmer`] pre-populates a store, [`CacheClearer`] invalidates it.
//!
//! No TTL and no eviction live here; freshness is caller-managed.

pub mod key;

mod clearer;
mod memory;
mod sqlite;
mod store;
mod warmer;

pub use clearer::CacheClearer;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::CacheStore;
pub use warmer::{CacheWarmer, WarmupFailure, WarmupReport};
