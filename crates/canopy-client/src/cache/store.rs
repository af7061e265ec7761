//! Cache store trait.

use crate::error::Result;

/// Key-value store holding cached definition envelopes.
///
/// Values are JSON-encoded strings; no binary framing. The client assumes
/// only process-local read-your-writes semantics: a `set` followed by a
/// `get` on the same key returns the set value, a `delete` followed by
/// `has` returns false, and `clear` makes every `has` false until the next
/// `set`. Durability, eviction, and cross-process coordination are the
/// store's own business.
///
/// A missing key is a *miss* (`Ok(None)` / `Ok(false)`), not an error;
/// errors are reserved for the store itself failing.
pub trait CacheStore: Send + Sync {
    /// Get the cached value for a key, `None` on a miss.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Check whether a key is present.
    fn has(&self, key: &str) -> Result<bool>;

    /// Store a value, overwriting any existing entry for the key.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Returns whether an entry was actually removed;
    /// deleting an absent key is a no-op, not an error.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Remove every entry in the store.
    fn clear(&self) -> Result<()>;
}
