//! Hydrated content entries.

use std::collections::BTreeMap;

use super::field_value::{FieldValue, LocalizedValue};
use super::sys::Sys;

/// A structured content record conforming to a content type.
///
/// Built fresh on every hydration call and never mutated afterwards. The
/// typed `fields` map holds values coerced against the content-type
/// definition; `extras` holds inferred values for payload fields the
/// definition does not know (the stale-schema case), so accessors keep
/// working even when the cached definition has drifted.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub sys: Sys,
    content_type_id: String,
    fields: BTreeMap<String, LocalizedValue>,
    extras: BTreeMap<String, LocalizedValue>,
    default_locale: String,
}

impl Entry {
    pub(crate) fn new(
        sys: Sys,
        content_type_id: String,
        fields: BTreeMap<String, LocalizedValue>,
        extras: BTreeMap<String, LocalizedValue>,
        default_locale: String,
    ) -> Self {
        Self {
            sys,
            content_type_id,
            fields,
            extras,
            default_locale,
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Id of the content type this entry conforms to.
    pub fn content_type_id(&self) -> &str {
        &self.content_type_id
    }

    /// Value of a field in the payload's own locale (or the space default).
    ///
    /// Consults the schema-typed map first, then the inferred extras, so a
    /// field dropped by a stale definition still resolves.
    pub fn field(&self, id: &str) -> Option<&FieldValue> {
        let locale = self
            .sys
            .locale
            .as_deref()
            .unwrap_or(&self.default_locale);
        self.field_in(id, locale)
    }

    /// Value of a field in a specific locale, falling back to the default
    /// locale when that locale carries no value.
    pub fn field_in(&self, id: &str, locale: &str) -> Option<&FieldValue> {
        let map = self.fields.get(id).or_else(|| self.extras.get(id))?;
        map.get(locale)
            .or_else(|| map.get(self.default_locale.as_str()))
    }

    /// Ids of the schema-typed fields.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Ids of payload fields the content-type definition did not know.
    pub fn extra_field_ids(&self) -> impl Iterator<Item = &str> {
        self.extras.keys().map(String::as_str)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.fields.contains_key(id) || self.extras.contains_key(id)
    }

    /// Full typed field map, keyed by field id then locale code.
    pub fn fields(&self) -> &BTreeMap<String, LocalizedValue> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localized(pairs: &[(&str, FieldValue)]) -> LocalizedValue {
        pairs
            .iter()
            .map(|(locale, value)| (locale.to_string(), value.clone()))
            .collect()
    }

    fn sample() -> Entry {
        let mut fields = BTreeMap::new();
        fields.insert(
            "name".to_string(),
            localized(&[
                ("en-US", FieldValue::Text("Nyan Cat".into())),
                ("tlh", FieldValue::Text("Nyan vIghro'".into())),
            ]),
        );
        fields.insert(
            "lives".to_string(),
            localized(&[("en-US", FieldValue::Integer(1337))]),
        );

        let mut extras = BTreeMap::new();
        extras.insert(
            "color".to_string(),
            localized(&[("en-US", FieldValue::Symbol("rainbow".into()))]),
        );

        Entry::new(
            Sys {
                id: "nyancat".into(),
                ..Sys::default()
            },
            "cat".into(),
            fields,
            extras,
            "en-US".into(),
        )
    }

    #[test]
    fn test_field_lookup() {
        let entry = sample();
        assert_eq!(entry.id(), "nyancat");
        assert_eq!(entry.content_type_id(), "cat");
        assert_eq!(entry.field("name").and_then(FieldValue::as_str), Some("Nyan Cat"));
        assert_eq!(
            entry.field_in("name", "tlh").and_then(FieldValue::as_str),
            Some("Nyan vIghro'")
        );
        assert!(entry.field("missing").is_none());
    }

    #[test]
    fn test_locale_fallback() {
        let entry = sample();
        // lives has no Klingon value; falls back to the default locale.
        assert_eq!(
            entry.field_in("lives", "tlh").and_then(FieldValue::as_i64),
            Some(1337)
        );
    }

    #[test]
    fn test_extras_reachable_but_untyped() {
        let entry = sample();
        assert_eq!(entry.field("color").and_then(FieldValue::as_str), Some("rainbow"));
        assert!(entry.has_field("color"));
        assert!(entry.field_ids().all(|id| id != "color"));
        assert!(entry.extra_field_ids().any(|id| id == "color"));
    }
}
