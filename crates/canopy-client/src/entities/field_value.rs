//! Tagged field values.
//!
//! Every entry field resolves to one [`FieldValue`] variant. Coercion is
//! driven by the field's [`FieldDefinition`]; for payload fields the schema
//! does not know (the stale-cache case) a shape-driven inference produces the
//! same variants, so accessors behave identically either way.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::content_type::{FieldDefinition, FieldType, ItemsDefinition};
use super::link::Link;

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Symbol(String),
    Text(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Location { lat: f64, lon: f64 },
    Link(Link),
    Array(Vec<FieldValue>),
    /// Arbitrary JSON the schema declares as `Object`, kept verbatim.
    Object(Value),
}

/// Locale code to value mapping for one field.
pub type LocalizedValue = BTreeMap<String, FieldValue>;

impl FieldValue {
    /// Coerce a raw value according to its field definition.
    ///
    /// A raw value whose shape contradicts the declared type degrades to
    /// shape-driven inference instead of failing; hydration is total.
    pub fn coerce(raw: &Value, def: &FieldDefinition) -> FieldValue {
        Self::coerce_kind(raw, def.field_type, def.items.as_ref())
    }

    fn coerce_kind(raw: &Value, kind: FieldType, items: Option<&ItemsDefinition>) -> FieldValue {
        match kind {
            FieldType::Symbol => match raw.as_str() {
                Some(s) => FieldValue::Symbol(s.to_string()),
                None => Self::infer(raw),
            },
            FieldType::Text => match raw.as_str() {
                Some(s) => FieldValue::Text(s.to_string()),
                None => Self::infer(raw),
            },
            FieldType::Integer => match raw.as_i64() {
                Some(n) => FieldValue::Integer(n),
                None => Self::infer(raw),
            },
            FieldType::Number => match raw.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => Self::infer(raw),
            },
            FieldType::Boolean => match raw.as_bool() {
                Some(b) => FieldValue::Boolean(b),
                None => Self::infer(raw),
            },
            FieldType::Date => match raw.as_str().and_then(parse_date) {
                Some(dt) => FieldValue::Date(dt),
                None => Self::infer(raw),
            },
            FieldType::Location => match parse_location(raw) {
                Some((lat, lon)) => FieldValue::Location { lat, lon },
                None => Self::infer(raw),
            },
            FieldType::Link => match Link::from_value(raw) {
                Ok(link) => FieldValue::Link(link),
                Err(_) => Self::infer(raw),
            },
            FieldType::Array => match raw.as_array() {
                Some(values) => {
                    let item_kind = items.and_then(|i| i.item_type);
                    FieldValue::Array(
                        values
                            .iter()
                            .map(|v| match item_kind {
                                Some(kind) => Self::coerce_kind(v, kind, None),
                                None => Self::infer(v),
                            })
                            .collect(),
                    )
                }
                None => Self::infer(raw),
            },
            FieldType::Object => FieldValue::Object(raw.clone()),
        }
    }

    /// Infer a value from the JSON shape alone, without a definition.
    ///
    /// Strings become symbols, link-shaped objects become links; everything
    /// the shape cannot disambiguate stays an `Object`.
    pub fn infer(raw: &Value) -> FieldValue {
        match raw {
            Value::String(s) => FieldValue::Symbol(s.clone()),
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Number(n.as_f64().unwrap_or(0.0)),
            },
            Value::Array(values) => FieldValue::Array(values.iter().map(Self::infer).collect()),
            Value::Object(_) if Link::is_link_value(raw) => match Link::from_value(raw) {
                Ok(link) => FieldValue::Link(link),
                Err(_) => FieldValue::Object(raw.clone()),
            },
            _ => FieldValue::Object(raw.clone()),
        }
    }

    /// String content of `Symbol` and `Text` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Symbol(s) | FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            FieldValue::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(values) => Some(values),
            _ => None,
        }
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_location(raw: &Value) -> Option<(f64, f64)> {
    let lat = raw.get("lat").and_then(Value::as_f64)?;
    let lon = raw.get("lon").and_then(Value::as_f64)?;
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LinkKind;
    use serde_json::json;

    fn def(id: &str, field_type: FieldType) -> FieldDefinition {
        FieldDefinition {
            id: id.to_string(),
            name: None,
            field_type,
            link_type: None,
            items: None,
            localized: false,
            disabled: false,
        }
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(
            FieldValue::coerce(&json!("Nyan Cat"), &def("name", FieldType::Text)),
            FieldValue::Text("Nyan Cat".into())
        );
        assert_eq!(
            FieldValue::coerce(&json!(1337), &def("lives", FieldType::Integer)),
            FieldValue::Integer(1337)
        );
        assert_eq!(
            FieldValue::coerce(&json!(4.5), &def("rating", FieldType::Number)),
            FieldValue::Number(4.5)
        );
        assert_eq!(
            FieldValue::coerce(&json!(true), &def("hidden", FieldType::Boolean)),
            FieldValue::Boolean(true)
        );
    }

    #[test]
    fn test_date_and_location_coercion() {
        let date = FieldValue::coerce(&json!("2011-04-04T22:00:00Z"), &def("birthday", FieldType::Date));
        assert!(matches!(date, FieldValue::Date(_)));

        let loc = FieldValue::coerce(
            &json!({"lat": 52.52, "lon": 13.40}),
            &def("center", FieldType::Location),
        );
        assert_eq!(loc, FieldValue::Location { lat: 52.52, lon: 13.40 });
    }

    #[test]
    fn test_link_coercion() {
        let raw = json!({"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}});
        let value = FieldValue::coerce(&raw, &def("bestFriend", FieldType::Link));
        assert_eq!(
            value.as_link(),
            Some(&Link::new("happycat", LinkKind::Entry))
        );
    }

    #[test]
    fn test_array_coercion_uses_item_type() {
        let mut d = def("likes", FieldType::Array);
        d.items = Some(ItemsDefinition {
            item_type: Some(FieldType::Symbol),
            link_type: None,
        });
        let value = FieldValue::coerce(&json!(["rainbows", "fish"]), &d);
        assert_eq!(
            value,
            FieldValue::Array(vec![
                FieldValue::Symbol("rainbows".into()),
                FieldValue::Symbol("fish".into()),
            ])
        );
    }

    #[test]
    fn test_shape_mismatch_degrades_to_inference() {
        // Declared Integer, payload carries a string: hydration must not fail.
        let value = FieldValue::coerce(&json!("not a number"), &def("lives", FieldType::Integer));
        assert_eq!(value, FieldValue::Symbol("not a number".into()));
    }

    #[test]
    fn test_inference() {
        assert_eq!(FieldValue::infer(&json!("hi")), FieldValue::Symbol("hi".into()));
        assert_eq!(FieldValue::infer(&json!(3)), FieldValue::Integer(3));
        assert_eq!(FieldValue::infer(&json!(3.5)), FieldValue::Number(3.5));

        let link = json!({"sys": {"type": "Link", "linkType": "Asset", "id": "pic"}});
        assert_eq!(
            FieldValue::infer(&link),
            FieldValue::Link(Link::new("pic", LinkKind::Asset))
        );

        let obj = json!({"arbitrary": "payload"});
        assert_eq!(FieldValue::infer(&obj), FieldValue::Object(obj.clone()));
    }
}
