//! Unresolved references between entities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CanopyError, Result};

/// Target kind of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    Entry,
    Asset,
    Space,
    ContentType,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Entry => "Entry",
            LinkKind::Asset => "Asset",
            LinkKind::Space => "Space",
            LinkKind::ContentType => "ContentType",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Entry" => Some(LinkKind::Entry),
            "Asset" => Some(LinkKind::Asset),
            "Space" => Some(LinkKind::Space),
            "ContentType" => Some(LinkKind::ContentType),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An unresolved reference to another entity.
///
/// A link is a placeholder: it owns nothing and nothing is fetched when it is
/// built. Resolution is an explicit operation
/// ([`DeliveryClient::resolve_link`](crate::DeliveryClient::resolve_link))
/// returning a fresh entity, never a property-access side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub kind: LinkKind,
}

impl Link {
    pub fn new(id: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Build a link from a `{"sys": {"type": "Link", "linkType": ..., "id": ...}}`
    /// envelope.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let sys = raw
            .get("sys")
            .and_then(Value::as_object)
            .ok_or_else(|| CanopyError::envelope("link missing sys member"))?;

        let id = sys
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CanopyError::envelope("link sys.id missing"))?;

        let link_type = sys
            .get("linkType")
            .and_then(Value::as_str)
            .ok_or_else(|| CanopyError::envelope("link sys.linkType missing"))?;

        let kind = LinkKind::from_str(link_type).ok_or_else(|| CanopyError::envelope(
            format!("unknown linkType {link_type:?}"),
        ))?;

        Ok(Link::new(id, kind))
    }

    /// Check whether a raw value has the link envelope shape.
    pub fn is_link_value(raw: &Value) -> bool {
        raw.get("sys")
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            == Some("Link")
    }
}
