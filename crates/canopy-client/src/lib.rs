//! Canopy Client - headless library for a content-delivery API.
//!
//! This crate fetches a space's raw JSON envelopes (space metadata,
//! content-type schemas, entries, assets), hydrates them into typed
//! entities, and can persist space and content-type definitions in a
//! pluggable key-value cache store so repeated client initialization needs
//! no network round trip.
//!
//! Stale cached schemas are tolerated by design: a payload field missing
//! from the cached content-type definition degrades to a per-field
//! diagnostic, never to a failed hydration.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use canopy_client::{ApiMode, DeliveryClient, SqliteStore};
//!
//! fn main() -> canopy_client::Result<()> {
//!     let store = Arc::new(SqliteStore::new("./cache/definitions.sqlite")?);
//!     let client = DeliveryClient::builder("cfexampleapi")
//!         .api_mode(ApiMode::Delivery)
//!         .access_token("b4c0n73n7fu1")
//!         .cache_store(store)
//!         .auto_warmup(true)
//!         .build()?;
//!
//!     let space = client.space()?;
//!     println!("space: {} ({})", space.name(), space.id());
//!
//!     let entry = client.entry("nyancat")?;
//!     println!("name: {:?}", entry.field("name"));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod entities;
pub mod error;
pub mod hydrate;
pub mod network;
pub mod registry;

mod builder;

// Re-export commonly used types
pub use builder::DeliveryClientBuilder;
pub use cache::{
    CacheClearer, CacheStore, CacheWarmer, MemoryStore, SqliteStore, WarmupFailure, WarmupReport,
};
pub use config::ApiMode;
pub use entities::{
    Asset, AssetFile, ContentType, Entry, FieldDefinition, FieldType, FieldValue, Link, LinkKind,
    Locale, LocalizedValue, Space, Sys,
};
pub use error::{CanopyError, Result};
pub use hydrate::{Diagnostic, Entity, Revived, Reviver};
pub use network::{HttpSource, RemoteSource};
pub use registry::SchemaRegistry;

use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use tracing::debug;

/// Main entry point: a client for one space on one API surface.
///
/// The client wires the cache store, the remote source, the schema registry,
/// and the hydrator together. All operations are synchronous and complete
/// before returning; there is no background warmup and no mid-operation
/// cancellation.
///
/// Read path: memoized state, then the cache store (on a *miss*, never on a
/// store error), then the live source. With `auto_warmup` enabled, a value
/// fetched on a cache miss is written back to the store.
pub struct DeliveryClient {
    pub(crate) api: ApiMode,
    pub(crate) space_id: String,
    pub(crate) source: Arc<dyn RemoteSource>,
    pub(crate) store: Option<Arc<dyn CacheStore>>,
    pub(crate) auto_warmup: bool,
    pub(crate) registry: SchemaRegistry,
    /// Memoized space definition.
    pub(crate) space: RwLock<Option<Arc<Space>>>,
    /// Recoverable diagnostics collected across hydration calls, drained by
    /// the host.
    pub(crate) diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DeliveryClient {
    /// Create a builder for a client of the given space.
    pub fn builder(space_id: impl Into<String>) -> DeliveryClientBuilder {
        DeliveryClientBuilder::new(space_id)
    }

    pub fn api_mode(&self) -> ApiMode {
        self.api
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// The schema registry owned by this client.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Get the space definition.
    ///
    /// Memoized for the client's lifetime; the first call reads through the
    /// cache store and falls back to the live source.
    pub fn space(&self) -> Result<Arc<Space>> {
        if let Some(space) = self
            .space
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Ok(space);
        }

        let key = cache::key::space_key(self.api, &self.space_id);
        let raw = self.cached_or_fetch(&key, || self.source.fetch_space())?;
        let space = Arc::new(Space::from_value(&raw)?);

        *self.space.write().unwrap_or_else(|e| e.into_inner()) = Some(space.clone());
        Ok(space)
    }

    /// Get a content-type definition by id.
    ///
    /// Registry first, then the cache store, then the live source; whatever
    /// is found ends up registered.
    pub fn content_type(&self, id: &str) -> Result<Arc<ContentType>> {
        if let Some(content_type) = self.registry.get(id) {
            return Ok(content_type);
        }

        let key = cache::key::content_type_key(self.api, &self.space_id, id);
        let raw = self.cached_or_fetch(&key, || self.source.fetch_content_type(id))?;
        let content_type = ContentType::from_value(&raw)?;
        Ok(self.registry.register(content_type))
    }

    /// Fetch and hydrate one entry by id.
    pub fn entry(&self, id: &str) -> Result<Entry> {
        let raw = self.source.fetch_entry(id)?;
        match self.revive_value(&raw)? {
            Entity::Entry(entry) => Ok(entry),
            other => Err(CanopyError::envelope(format!(
                "expected an Entry envelope, got {}",
                other.kind()
            ))),
        }
    }

    /// Fetch and hydrate one asset by id.
    pub fn asset(&self, id: &str) -> Result<Asset> {
        let raw = self.source.fetch_asset(id)?;
        match self.revive_value(&raw)? {
            Entity::Asset(asset) => Ok(asset),
            other => Err(CanopyError::envelope(format!(
                "expected an Asset envelope, got {}",
                other.kind()
            ))),
        }
    }

    /// Hydrate a raw JSON envelope of any supported kind.
    ///
    /// `ContentType` envelopes end up registered, which makes this the
    /// injection point for externally supplied (possibly stale) definitions.
    /// Recoverable diagnostics land in the client sink; see
    /// [`drain_diagnostics`](Self::drain_diagnostics).
    pub fn revive_json(&self, json: &str) -> Result<Entity> {
        let raw: Value = serde_json::from_str(json)?;
        self.revive_value(&raw)
    }

    /// Resolve a link placeholder into its target entity.
    ///
    /// An explicit operation, not a property access: resolution goes through
    /// the client read path every time and results are not cached.
    pub fn resolve_link(&self, link: &Link) -> Result<Entity> {
        match link.kind {
            LinkKind::Entry => self.entry(&link.id).map(Entity::Entry),
            LinkKind::Asset => self.asset(&link.id).map(Entity::Asset),
            LinkKind::Space => self.space().map(|s| Entity::Space((*s).clone())),
            LinkKind::ContentType => self.content_type(&link.id).map(Entity::ContentType),
        }
    }

    /// Pre-populate the configured cache store with the space and all
    /// content-type definitions.
    pub fn warm_up(&self) -> Result<WarmupReport> {
        let store = self.require_store()?;
        CacheWarmer::new(self.source.clone(), store, self.api, self.space_id.clone()).warm_up()
    }

    /// Remove this client's definitions from the cache store.
    ///
    /// Uses the registry's content-type ids when any are known; with an
    /// empty registry the whole store is wiped, the accepted coarser
    /// behavior.
    pub fn clear_cache(&self) -> Result<()> {
        let store = self.require_store()?;
        let clearer = CacheClearer::new(store, self.api, self.space_id.clone());
        let ids = self.registry.ids();
        if ids.is_empty() {
            clearer.clear_all()
        } else {
            clearer.clear(&ids)
        }
    }

    /// Take all diagnostics collected since the last drain.
    pub fn drain_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn revive_value(&self, raw: &Value) -> Result<Entity> {
        // Entries and assets localize against the space's default locale;
        // other envelope kinds never touch it, and loading the space here
        // would recurse for a Space envelope.
        let default_locale = match Sys::entity_kind(raw)? {
            "Entry" | "Asset" => self.space()?.default_locale().to_string(),
            _ => "en-US".to_string(),
        };

        let reviver = Reviver::new(&self.registry, default_locale).with_source(self.source.as_ref());
        let revived = reviver.revive(raw)?;

        if !revived.diagnostics.is_empty() {
            self.diagnostics
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .extend(revived.diagnostics);
        }

        Ok(revived.entity)
    }

    /// Read through the cache store, falling back to the live source on a
    /// miss. Store errors propagate; only a miss triggers the fetch.
    fn cached_or_fetch<F>(&self, key: &str, fetch: F) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        if let Some(store) = &self.store {
            if let Some(text) = store.get(key)? {
                debug!("cache hit for {key:?}");
                return Ok(serde_json::from_str(&text)?);
            }
            debug!("cache miss for {key:?}");
        }

        let raw = fetch()?;

        if self.auto_warmup {
            if let Some(store) = &self.store {
                store.set(key, &serde_json::to_string(&raw)?)?;
                debug!("auto-warmed {key:?}");
            }
        }

        Ok(raw)
    }

    fn require_store(&self) -> Result<Arc<dyn CacheStore>> {
        self.store.clone().ok_or_else(|| CanopyError::Config {
            message: "no cache store configured".to_string(),
        })
    }
}
