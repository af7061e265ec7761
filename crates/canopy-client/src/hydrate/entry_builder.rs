//! Entry construction with stale-schema tolerance.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use super::diagnostics::Diagnostic;
use crate::entities::{locale_entries, ContentType, Entry, FieldValue, LocalizedValue, Sys};
use crate::error::Result;

/// Build an entry from its raw envelope against a content-type definition.
///
/// Fields known to the definition are coerced per their type tag into the
/// typed map. A payload field the definition does not know never fails the
/// build: one diagnostic is pushed per such field — in payload order — and a
/// shape-inferred value lands in the entry's extras, keeping accessors
/// functional under stale cached schemas.
pub(crate) fn build_entry(
    raw: &Value,
    content_type: &ContentType,
    default_locale: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Entry> {
    let sys = Sys::from_value(raw)?;
    let sys_locale = sys.locale.clone();

    let mut fields: BTreeMap<String, LocalizedValue> = BTreeMap::new();
    let mut extras: BTreeMap<String, LocalizedValue> = BTreeMap::new();

    if let Some(raw_fields) = raw.get("fields").and_then(Value::as_object) {
        for (field_id, raw_value) in raw_fields {
            if raw_value.is_null() {
                continue;
            }

            match content_type.field(field_id) {
                Some(definition) => {
                    let mut localized = LocalizedValue::new();
                    for (locale, value) in
                        locale_entries(raw_value, sys_locale.as_deref(), default_locale)
                    {
                        localized.insert(locale, FieldValue::coerce(value, definition));
                    }
                    fields.insert(field_id.clone(), localized);
                }
                None => {
                    let diagnostic = Diagnostic {
                        content_type_name: content_type.name().to_string(),
                        content_type_id: content_type.id().to_string(),
                        entry_id: sys.id.clone(),
                        field_id: field_id.clone(),
                    };
                    warn!("{diagnostic}");
                    diagnostics.push(diagnostic);

                    let mut localized = LocalizedValue::new();
                    for (locale, value) in
                        locale_entries(raw_value, sys_locale.as_deref(), default_locale)
                    {
                        localized.insert(locale, FieldValue::infer(value));
                    }
                    extras.insert(field_id.clone(), localized);
                }
            }
        }
    }

    Ok(Entry::new(
        sys,
        content_type.id().to_string(),
        fields,
        extras,
        default_locale.to_string(),
    ))
}
