//! System metadata carried by every envelope.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{CanopyError, Result};

/// Parsed `sys` member of an envelope.
///
/// The wire shape is externally defined: `sys.id` is mandatory, everything
/// else depends on the entity kind (entries carry `contentType` and
/// `revision`, localized single-locale payloads carry `locale`, and so on).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sys {
    pub id: String,
    pub revision: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Locale of a single-locale payload. Absent when field values are
    /// keyed by locale code instead.
    pub locale: Option<String>,
    /// Target content type of an entry (`sys.contentType` link).
    pub content_type_id: Option<String>,
    /// Owning space (`sys.space` link).
    pub space_id: Option<String>,
}

impl Sys {
    /// Parse the `sys` member of a raw envelope.
    ///
    /// Fails only when `sys` is missing entirely or carries no string id;
    /// every other member is optional.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let sys = raw
            .get("sys")
            .and_then(Value::as_object)
            .ok_or_else(|| CanopyError::envelope("missing sys member"))?;

        let id = sys
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CanopyError::envelope("sys.id missing or not a string"))?
            .to_string();

        Ok(Sys {
            id,
            revision: sys.get("revision").and_then(Value::as_i64),
            created_at: parse_timestamp(sys.get("createdAt")),
            updated_at: parse_timestamp(sys.get("updatedAt")),
            locale: sys
                .get("locale")
                .and_then(Value::as_str)
                .map(str::to_string),
            content_type_id: link_target(sys.get("contentType")),
            space_id: link_target(sys.get("space")),
        })
    }

    /// Entity kind discriminator (`sys.type`) of a raw envelope.
    pub fn entity_kind(raw: &Value) -> Result<&str> {
        raw.get("sys")
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            .ok_or_else(|| CanopyError::envelope("sys.type missing or not a string"))
    }
}

fn parse_timestamp(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    raw.and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Extract the id out of a `{"sys": {"type": "Link", ...}}` member.
fn link_target(raw: Option<&Value>) -> Option<String> {
    raw.and_then(|v| v.get("sys"))
        .and_then(|s| s.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
