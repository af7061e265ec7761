//! Live fetch collaborator.
//!
//! The client core treats the remote API as a black box returning raw JSON
//! envelopes. [`RemoteSource`] is that seam; [`HttpSource`] is the shipped
//! HTTP implementation. Retry and backoff policy belong to the transport,
//! not to this crate.

mod http;

pub use http::HttpSource;

use serde_json::Value;

use crate::error::Result;

/// Supplier of raw JSON envelopes for one space.
///
/// Every method either returns an envelope (or listing of envelopes) or a
/// transport-level failure. Implementations are expected to be cheap to
/// share behind an `Arc`.
pub trait RemoteSource: Send + Sync {
    /// Fetch the space definition envelope.
    fn fetch_space(&self) -> Result<Value>;

    /// Fetch all content-type definition envelopes.
    fn fetch_content_types(&self) -> Result<Vec<Value>>;

    /// Fetch one content-type definition envelope by id.
    fn fetch_content_type(&self, id: &str) -> Result<Value>;

    /// Fetch one entry envelope by id.
    fn fetch_entry(&self, id: &str) -> Result<Value>;

    /// Fetch one asset envelope by id.
    fn fetch_asset(&self, id: &str) -> Result<Value>;
}
