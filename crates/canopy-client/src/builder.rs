//! Client construction.

use std::sync::{Arc, Mutex, RwLock};

use crate::cache::CacheStore;
use crate::config::ApiMode;
use crate::error::{CanopyError, Result};
use crate::network::{HttpSource, RemoteSource};
use crate::registry::SchemaRegistry;
use crate::DeliveryClient;

/// Builder for [`DeliveryClient`].
///
/// Store and source are explicit dependencies: nothing is ambient, and the
/// store's lifecycle belongs to whoever created it. A client without a store
/// simply never touches a cache; a client without an explicit source gets an
/// [`HttpSource`] built from the access token.
pub struct DeliveryClientBuilder {
    api: ApiMode,
    space_id: String,
    access_token: Option<String>,
    source: Option<Arc<dyn RemoteSource>>,
    store: Option<Arc<dyn CacheStore>>,
    auto_warmup: bool,
}

impl DeliveryClientBuilder {
    pub fn new(space_id: impl Into<String>) -> Self {
        Self {
            api: ApiMode::default(),
            space_id: space_id.into(),
            access_token: None,
            source: None,
            store: None,
            auto_warmup: false,
        }
    }

    /// Which API surface to talk to. Defaults to delivery.
    pub fn api_mode(mut self, api: ApiMode) -> Self {
        self.api = api;
        self
    }

    /// Bearer token for the default HTTP source.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Use an explicit remote source instead of the default HTTP one.
    pub fn source(mut self, source: Arc<dyn RemoteSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a cache store for definition reads.
    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Write definitions fetched on a cache miss back to the store.
    pub fn auto_warmup(mut self, enabled: bool) -> Self {
        self.auto_warmup = enabled;
        self
    }

    pub fn build(self) -> Result<DeliveryClient> {
        if self.space_id.is_empty() {
            return Err(CanopyError::Config {
                message: "space id must not be empty".to_string(),
            });
        }

        let source: Arc<dyn RemoteSource> = match self.source {
            Some(source) => source,
            None => {
                let token = self.access_token.ok_or_else(|| CanopyError::Config {
                    message: "an access token or an explicit source is required".to_string(),
                })?;
                Arc::new(HttpSource::new(self.api, &self.space_id, token)?)
            }
        };

        tracing::info!(
            "created {} client for space {:?} (cache: {}, auto-warmup: {})",
            self.api,
            self.space_id,
            if self.store.is_some() { "on" } else { "off" },
            self.auto_warmup
        );

        Ok(DeliveryClient {
            api: self.api,
            space_id: self.space_id,
            source,
            store: self.store,
            auto_warmup: self.auto_warmup,
            registry: SchemaRegistry::new(),
            space: RwLock::new(None),
            diagnostics: Mutex::new(Vec::new()),
        })
    }
}
