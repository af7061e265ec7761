//! Centralized configuration for the Canopy client.
//!
//! Endpoint hosts, request timeouts, and the cache key namespace live here,
//! together with the [`ApiMode`] selector.

use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const DELIVERY_HOST: &'static str = "https://cdn.canopy-cms.io";
    pub const PREVIEW_HOST: &'static str = "https://preview.canopy-cms.io";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = "canopy-client/0.4";
}

/// Cache key namespace configuration.
pub struct CacheConfig;

impl CacheConfig {
    /// Prefix shared by every cache key the client writes.
    pub const KEY_PREFIX: &'static str = "canopy";
}

/// Which API surface a client talks to.
///
/// The preview surface serves unpublished drafts; delivery serves published
/// content only. The two must never share cache entries, so the mode is part
/// of every cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMode {
    Delivery,
    Preview,
}

impl ApiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Delivery => "delivery",
            ApiMode::Preview => "preview",
        }
    }

    /// Base host serving this API surface.
    pub fn host(&self) -> &'static str {
        match self {
            ApiMode::Delivery => NetworkConfig::DELIVERY_HOST,
            ApiMode::Preview => NetworkConfig::PREVIEW_HOST,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "delivery" => Some(ApiMode::Delivery),
            "preview" => Some(ApiMode::Preview),
            _ => None,
        }
    }
}

impl Default for ApiMode {
    fn default() -> Self {
        ApiMode::Delivery
    }
}

impl std::fmt::Display for ApiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
