//! Space metadata and locale descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sys::Sys;
use crate::error::{CanopyError, Result};

/// A locale available in a space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub fallback_code: Option<String>,
}

/// Top-level content container with locale configuration.
///
/// Immutable once built; rebuilt on cache miss or explicit warmup.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub sys: Sys,
    name: String,
    locales: Vec<Locale>,
}

impl Space {
    /// Build a space from its raw envelope.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let sys = Sys::from_value(raw)?;

        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| CanopyError::envelope("space name missing"))?
            .to_string();

        let locales = match raw.get("locales") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Vec::new(),
        };

        Ok(Space { sys, name, locales })
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Code of the default locale.
    ///
    /// Falls back to the first configured locale when none is flagged as
    /// default, and to `en-US` for a space with no locale list at all.
    pub fn default_locale(&self) -> &str {
        self.locales
            .iter()
            .find(|l| l.default)
            .or_else(|| self.locales.first())
            .map(|l| l.code.as_str())
            .unwrap_or("en-US")
    }

    /// Look up a locale descriptor by code.
    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }
}
