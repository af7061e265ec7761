//! Cache invalidation.

use std::sync::Arc;

use tracing::debug;

use super::key::{content_type_key, space_key};
use super::store::CacheStore;
use crate::config::ApiMode;
use crate::error::Result;

/// Removes the keys a warmup run would have written.
pub struct CacheClearer {
    store: Arc<dyn CacheStore>,
    api: ApiMode,
    space_id: String,
}

impl CacheClearer {
    pub fn new(store: Arc<dyn CacheStore>, api: ApiMode, space_id: impl Into<String>) -> Self {
        Self {
            store,
            api,
            space_id: space_id.into(),
        }
    }

    /// Delete the space key and the key of every given content type.
    ///
    /// Idempotent: absent keys are skipped silently.
    pub fn clear(&self, content_type_ids: &[String]) -> Result<()> {
        self.store.delete(&space_key(self.api, &self.space_id))?;
        for id in content_type_ids {
            self.store
                .delete(&content_type_key(self.api, &self.space_id, id))?;
        }
        debug!(
            "cleared space key and {} content type key(s) for {:?}",
            content_type_ids.len(),
            self.space_id
        );
        Ok(())
    }

    /// Wipe the whole store.
    ///
    /// The coarser fallback for when the set of cached content-type ids is
    /// unknown at clear time.
    pub fn clear_all(&self) -> Result<()> {
        self.store.clear()
    }
}
