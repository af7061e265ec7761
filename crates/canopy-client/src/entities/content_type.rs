//! Content-type schemas and field definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::link::LinkKind;
use super::sys::Sys;
use crate::error::Result;

/// Type tag of a field definition.
///
/// Variant names match the wire strings exactly, so the enum round-trips
/// through serde without renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Symbol,
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Location,
    Link,
    Array,
    Object,
}

/// Item schema of an `Array`-typed field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemsDefinition {
    #[serde(rename = "type", default)]
    pub item_type: Option<FieldType>,
    #[serde(default)]
    pub link_type: Option<LinkKind>,
}

/// Immutable descriptor of a single field: the contract an entry's raw field
/// must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub link_type: Option<LinkKind>,
    #[serde(default)]
    pub items: Option<ItemsDefinition>,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// Schema describing the fields an entry of one type may carry.
///
/// Owned by the schema registry, keyed uniquely by id within a space.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType {
    pub sys: Sys,
    name: String,
    description: Option<String>,
    display_field: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl ContentType {
    /// Build a content type from its raw envelope.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let sys = Sys::from_value(raw)?;

        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&sys.id)
            .to_string();

        let description = raw
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let display_field = raw
            .get("displayField")
            .and_then(Value::as_str)
            .map(str::to_string);

        let fields = match raw.get("fields") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Vec::new(),
        };

        Ok(ContentType {
            sys,
            name,
            description,
            display_field,
            fields,
        })
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Human-readable display name of the content type.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Id of the field used as the display title of entries.
    pub fn display_field(&self) -> Option<&str> {
        self.display_field.as_deref()
    }

    /// Ordered field definitions.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Look up a field definition by id.
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }
}
