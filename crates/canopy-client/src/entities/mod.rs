//! Typed entities hydrated from raw JSON envelopes.
//!
//! Each entity knows its own wire shape (`from_value` constructors); the
//! dispatch over `sys.type` lives in [`crate::hydrate`].

mod asset;
mod content_type;
mod entry;
mod field_value;
mod link;
mod space;
mod sys;

pub use asset::{Asset, AssetFile};
pub use content_type::{ContentType, FieldDefinition, FieldType, ItemsDefinition};
pub use entry::Entry;
pub use field_value::{FieldValue, LocalizedValue};
pub use link::{Link, LinkKind};
pub use space::{Locale, Space};
pub use sys::Sys;

use serde_json::Value;

/// Normalize one raw field value into `(locale, value)` pairs.
///
/// A payload with `sys.locale` carries plain values for that one locale; a
/// payload without it carries maps keyed by locale code. A non-object value
/// in the locale-keyed shape is treated as belonging to the default locale.
pub(crate) fn locale_entries<'v>(
    raw: &'v Value,
    sys_locale: Option<&str>,
    default_locale: &str,
) -> Vec<(String, &'v Value)> {
    if let Some(locale) = sys_locale {
        return vec![(locale.to_string(), raw)];
    }
    match raw.as_object() {
        Some(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        None => vec![(default_locale.to_string(), raw)],
    }
}
