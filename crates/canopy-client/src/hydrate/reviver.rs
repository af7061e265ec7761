//! Envelope dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::diagnostics::Diagnostic;
use super::entry_builder::build_entry;
use crate::entities::{Asset, ContentType, Entry, Link, Space, Sys};
use crate::error::{CanopyError, Result};
use crate::network::RemoteSource;
use crate::registry::SchemaRegistry;

/// A hydrated entity of any supported kind.
#[derive(Debug, Clone)]
pub enum Entity {
    Space(Space),
    ContentType(Arc<ContentType>),
    Entry(Entry),
    Asset(Asset),
    Link(Link),
}

impl Entity {
    /// Kind discriminator, matching the wire `sys.type` strings.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Space(_) => "Space",
            Entity::ContentType(_) => "ContentType",
            Entity::Entry(_) => "Entry",
            Entity::Asset(_) => "Asset",
            Entity::Link(_) => "Link",
        }
    }
}

/// Outcome of one hydration call.
#[derive(Debug, Clone)]
pub struct Revived {
    pub entity: Entity,
    /// Recoverable conditions, in payload order. Never affects success.
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns raw JSON envelopes into typed entities.
///
/// Stateless per call except for its interaction with the schema registry:
/// read to find an entry's content type, written when a `ContentType`
/// envelope is revived. The optional remote source covers registry misses;
/// without one, a miss is an error.
pub struct Reviver<'a> {
    registry: &'a SchemaRegistry,
    source: Option<&'a dyn RemoteSource>,
    default_locale: String,
}

impl<'a> Reviver<'a> {
    pub fn new(registry: &'a SchemaRegistry, default_locale: impl Into<String>) -> Self {
        Self {
            registry,
            source: None,
            default_locale: default_locale.into(),
        }
    }

    /// Attach a remote source used to fetch content types missing from the
    /// registry.
    pub fn with_source(mut self, source: &'a dyn RemoteSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Hydrate a JSON string.
    pub fn revive_str(&self, json: &str) -> Result<Revived> {
        let raw: Value = serde_json::from_str(json)?;
        self.revive(&raw)
    }

    /// Hydrate a raw envelope by its declared system type.
    ///
    /// Unknown system types are a hard failure; there is no degraded
    /// interpretation for an envelope the client cannot classify.
    pub fn revive(&self, raw: &Value) -> Result<Revived> {
        let kind = Sys::entity_kind(raw)?;
        debug!("reviving {kind} envelope");

        let mut diagnostics = Vec::new();
        let entity = match kind {
            "Space" => Entity::Space(Space::from_value(raw)?),
            "ContentType" => {
                let content_type = ContentType::from_value(raw)?;
                Entity::ContentType(self.registry.register(content_type))
            }
            "Entry" => {
                let content_type = self.content_type_for(raw)?;
                let entry =
                    build_entry(raw, &content_type, &self.default_locale, &mut diagnostics)?;
                Entity::Entry(entry)
            }
            "Asset" => Entity::Asset(Asset::from_value(raw, &self.default_locale)?),
            "Link" => Entity::Link(Link::from_value(raw)?),
            other => {
                return Err(CanopyError::UnsupportedEntityType {
                    kind: other.to_string(),
                })
            }
        };

        Ok(Revived {
            entity,
            diagnostics,
        })
    }

    /// Resolve the content type an entry envelope references.
    fn content_type_for(&self, raw: &Value) -> Result<Arc<ContentType>> {
        let sys = Sys::from_value(raw)?;
        let id = sys
            .content_type_id
            .ok_or_else(|| CanopyError::envelope("entry carries no sys.contentType link"))?;

        if let Some(content_type) = self.registry.get(&id) {
            return Ok(content_type);
        }

        match self.source {
            Some(source) => {
                debug!("content type {id:?} not in registry, fetching");
                let raw_type = source.fetch_content_type(&id)?;
                let content_type = ContentType::from_value(&raw_type)?;
                Ok(self.registry.register(content_type))
            }
            None => Err(CanopyError::UnknownContentType { id }),
        }
    }
}
