//! Media asset records.

use std::collections::BTreeMap;

use serde_json::Value;

use super::locale_entries;
use super::sys::Sys;
use crate::error::Result;

/// File metadata of an asset in one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFile {
    pub url: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
}

impl AssetFile {
    /// Parse the `file` member shape: `{url, fileName, contentType,
    /// details: {size}}`. Returns `None` when no url is present.
    fn from_value(raw: &Value) -> Option<Self> {
        let url = raw.get("url").and_then(Value::as_str)?.to_string();
        Some(AssetFile {
            url,
            file_name: raw
                .get("fileName")
                .and_then(Value::as_str)
                .map(str::to_string),
            mime_type: raw
                .get("contentType")
                .and_then(Value::as_str)
                .map(str::to_string),
            size: raw
                .get("details")
                .and_then(|d| d.get("size"))
                .and_then(Value::as_u64),
        })
    }
}

/// A media file record with optional localized metadata.
///
/// Same localization shape as entry fields: a payload with `sys.locale`
/// carries plain values, one without carries locale-keyed maps.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub sys: Sys,
    titles: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
    files: BTreeMap<String, AssetFile>,
    default_locale: String,
}

impl Asset {
    /// Build an asset from its raw envelope.
    pub fn from_value(raw: &Value, default_locale: &str) -> Result<Self> {
        let sys = Sys::from_value(raw)?;
        let sys_locale = sys.locale.clone();

        let mut titles = BTreeMap::new();
        let mut descriptions = BTreeMap::new();
        let mut files = BTreeMap::new();

        if let Some(fields) = raw.get("fields").and_then(Value::as_object) {
            if let Some(title) = fields.get("title") {
                for (locale, value) in locale_entries(title, sys_locale.as_deref(), default_locale) {
                    if let Some(s) = value.as_str() {
                        titles.insert(locale, s.to_string());
                    }
                }
            }
            if let Some(description) = fields.get("description") {
                for (locale, value) in
                    locale_entries(description, sys_locale.as_deref(), default_locale)
                {
                    if let Some(s) = value.as_str() {
                        descriptions.insert(locale, s.to_string());
                    }
                }
            }
            if let Some(file) = fields.get("file") {
                for (locale, value) in locale_entries(file, sys_locale.as_deref(), default_locale) {
                    if let Some(parsed) = AssetFile::from_value(value) {
                        files.insert(locale, parsed);
                    }
                }
            }
        }

        Ok(Asset {
            sys,
            titles,
            descriptions,
            files,
            default_locale: default_locale.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title_in(self.payload_locale())
    }

    pub fn title_in(&self, locale: &str) -> Option<&str> {
        lookup(&self.titles, locale, &self.default_locale).map(String::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        lookup(&self.descriptions, self.payload_locale(), &self.default_locale)
            .map(String::as_str)
    }

    pub fn file(&self) -> Option<&AssetFile> {
        self.file_in(self.payload_locale())
    }

    pub fn file_in(&self, locale: &str) -> Option<&AssetFile> {
        lookup(&self.files, locale, &self.default_locale)
    }

    /// Url of the file in the payload locale, when present.
    pub fn url(&self) -> Option<&str> {
        self.file().map(|f| f.url.as_str())
    }

    fn payload_locale(&self) -> &str {
        self.sys.locale.as_deref().unwrap_or(&self.default_locale)
    }
}

fn lookup<'m, T>(map: &'m BTreeMap<String, T>, locale: &str, default_locale: &str) -> Option<&'m T> {
    map.get(locale).or_else(|| map.get(default_locale))
}
