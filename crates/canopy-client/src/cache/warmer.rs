//! Cache warmup.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::key::{content_type_key, space_key};
use super::store::CacheStore;
use crate::config::ApiMode;
use crate::error::Result;
use crate::network::RemoteSource;

/// One content-type item the warmer could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupFailure {
    /// Offending content-type id, or `"<unknown>"` when the envelope
    /// carried none.
    pub content_type_id: String,
    pub message: String,
}

/// Itemized outcome of a warmup run.
///
/// Failure isolation is per item: every successfully fetched definition is
/// written even when siblings fail.
#[derive(Debug, Clone, Default)]
pub struct WarmupReport {
    pub space_key: String,
    pub content_type_keys: Vec<String>,
    pub failures: Vec<WarmupFailure>,
}

impl WarmupReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pre-populates a cache store with space and content-type definitions.
pub struct CacheWarmer {
    source: Arc<dyn RemoteSource>,
    store: Arc<dyn CacheStore>,
    api: ApiMode,
    space_id: String,
}

impl CacheWarmer {
    pub fn new(
        source: Arc<dyn RemoteSource>,
        store: Arc<dyn CacheStore>,
        api: ApiMode,
        space_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            api,
            space_id: space_id.into(),
        }
    }

    /// Fetch the space and all content types and write each raw envelope
    /// under its cache key.
    ///
    /// A failed space or listing fetch aborts the call; a malformed item in
    /// the listing is recorded in the report and skipped. Store errors
    /// propagate. No implicit retry.
    pub fn warm_up(&self) -> Result<WarmupReport> {
        let mut report = WarmupReport {
            space_key: space_key(self.api, &self.space_id),
            ..WarmupReport::default()
        };

        let raw_space = self.source.fetch_space()?;
        self.store
            .set(&report.space_key, &serde_json::to_string(&raw_space)?)?;
        debug!("warmed space key {:?}", report.space_key);

        let listing = self.source.fetch_content_types()?;
        for raw in &listing {
            let id = match content_type_id(raw) {
                Some(id) => id,
                None => {
                    warn!("skipping content type envelope without sys.id during warmup");
                    report.failures.push(WarmupFailure {
                        content_type_id: "<unknown>".to_string(),
                        message: "envelope carries no sys.id".to_string(),
                    });
                    continue;
                }
            };

            let key = content_type_key(self.api, &self.space_id, id);
            self.store.set(&key, &serde_json::to_string(raw)?)?;
            report.content_type_keys.push(key);
        }

        debug!(
            "warmup wrote {} content type(s), {} failure(s)",
            report.content_type_keys.len(),
            report.failures.len()
        );

        Ok(report)
    }
}

fn content_type_id(raw: &Value) -> Option<&str> {
    raw.get("sys")
        .and_then(|s| s.get("id"))
        .and_then(Value::as_str)
}
