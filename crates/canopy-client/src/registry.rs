//! In-memory schema registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::entities::ContentType;

/// Content-type id to definition mapping, scoped to one space.
///
/// Populated by cache reads surfacing through hydration or by direct
/// hydration of a `ContentType` envelope. No eviction; lives for the
/// lifetime of the owning client and is injected, never ambient.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: RwLock<HashMap<String, Arc<ContentType>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any prior definition for that id.
    ///
    /// Returns the shared handle now held by the registry.
    pub fn register(&self, content_type: ContentType) -> Arc<ContentType> {
        let id = content_type.id().to_string();
        let handle = Arc::new(content_type);
        let mut types = self.types.write().unwrap_or_else(|e| e.into_inner());
        if types.insert(id.clone(), handle.clone()).is_some() {
            debug!("replaced content type definition {id:?}");
        }
        handle
    }

    pub fn get(&self, id: &str) -> Option<Arc<ContentType>> {
        self.types
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    /// Ids of all registered content types.
    pub fn ids(&self) -> Vec<String> {
        self.types
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
