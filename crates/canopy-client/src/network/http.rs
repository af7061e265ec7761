//! HTTP implementation of the remote source.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::RemoteSource;
use crate::config::{ApiMode, NetworkConfig};
use crate::error::{CanopyError, Result};

/// Blocking HTTP source for one space on one API surface.
pub struct HttpSource {
    client: Client,
    base_url: Url,
    space_id: String,
    token: String,
}

impl HttpSource {
    /// Create a source against the default host for the given API mode.
    pub fn new(api: ApiMode, space_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api.host(), space_id, token)
    }

    /// Create a source against a custom base URL (self-hosted deployments,
    /// test servers).
    pub fn with_base_url(
        base_url: &str,
        space_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CanopyError::Config {
            message: format!("Invalid base URL {base_url:?}: {e}"),
        })?;

        let client = Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| CanopyError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self {
            client,
            base_url,
            space_id: space_id.into(),
            token: token.into(),
        })
    }

    /// Build the request URL for path segments under `/spaces/{space}`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| CanopyError::Config {
                message: format!("Base URL {} cannot carry a path", self.base_url),
            })?;
            path.push("spaces").push(&self.space_id);
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Issue a GET and decode the JSON body, mapping HTTP failures onto the
    /// error taxonomy.
    fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(&self.token).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CanopyError::Api {
                message: format!("request failed with status {}", status),
                status_code: Some(status.as_u16()),
            });
        }

        Ok(response.json()?)
    }

    /// Rewrite a 404 into a typed not-found error.
    fn map_not_found(err: CanopyError, kind: &str, id: &str) -> CanopyError {
        match err {
            CanopyError::Api {
                status_code: Some(code),
                ..
            } if code == StatusCode::NOT_FOUND.as_u16() => CanopyError::ResourceNotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            },
            other => other,
        }
    }
}

impl RemoteSource for HttpSource {
    fn fetch_space(&self) -> Result<Value> {
        self.get_json(&[])
            .map_err(|e| Self::map_not_found(e, "Space", &self.space_id))
    }

    fn fetch_content_types(&self) -> Result<Vec<Value>> {
        let listing = self.get_json(&["content_types"])?;
        match listing.get("items").and_then(Value::as_array) {
            Some(items) => Ok(items.clone()),
            None => Err(CanopyError::envelope(
                "content type listing carries no items array",
            )),
        }
    }

    fn fetch_content_type(&self, id: &str) -> Result<Value> {
        self.get_json(&["content_types", id])
            .map_err(|e| Self::map_not_found(e, "ContentType", id))
    }

    fn fetch_entry(&self, id: &str) -> Result<Value> {
        self.get_json(&["entries", id])
            .map_err(|e| Self::map_not_found(e, "Entry", id))
    }

    fn fetch_asset(&self, id: &str) -> Result<Value> {
        self.get_json(&["assets", id])
            .map_err(|e| Self::map_not_found(e, "Asset", id))
    }
}
