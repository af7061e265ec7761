//! Shared fixtures and test doubles.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use canopy_client::{CanopyError, RemoteSource, Result};
use serde_json::{json, Value};

/// In-memory remote source fed with fixture envelopes.
///
/// Counts every fetch so tests can assert that cache-backed reads never
/// touch the network.
pub struct StubSource {
    space: Value,
    content_types: HashMap<String, Value>,
    entries: HashMap<String, Value>,
    assets: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl StubSource {
    /// The canonical example space with the `cat` and `person` content
    /// types and their best-known entries.
    pub fn cfexampleapi() -> Self {
        let mut source = Self {
            space: space_envelope(),
            content_types: HashMap::new(),
            entries: HashMap::new(),
            assets: HashMap::new(),
            calls: AtomicUsize::new(0),
        };
        source
            .content_types
            .insert("cat".to_string(), cat_content_type());
        source
            .content_types
            .insert("person".to_string(), person_content_type());
        source.entries.insert("nyancat".to_string(), nyancat_entry());
        source
            .entries
            .insert("happycat".to_string(), happycat_entry());
        source
            .entries
            .insert("Kpwt1njxgAm04oQYyUScm".to_string(), ben_chang_entry());
        source.assets.insert("nyancat".to_string(), nyancat_asset());
        source
    }

    /// Register an arbitrary content-type envelope under a listing slot.
    pub fn with_raw_content_type(mut self, slot: &str, envelope: Value) -> Self {
        self.content_types.insert(slot.to_string(), envelope);
        self
    }

    /// Number of fetches served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn served(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl RemoteSource for StubSource {
    fn fetch_space(&self) -> Result<Value> {
        self.served();
        Ok(self.space.clone())
    }

    fn fetch_content_types(&self) -> Result<Vec<Value>> {
        self.served();
        let mut slots: Vec<&String> = self.content_types.keys().collect();
        slots.sort();
        Ok(slots
            .into_iter()
            .map(|slot| self.content_types[slot].clone())
            .collect())
    }

    fn fetch_content_type(&self, id: &str) -> Result<Value> {
        self.served();
        self.content_types
            .get(id)
            .cloned()
            .ok_or_else(|| CanopyError::ResourceNotFound {
                kind: "ContentType".to_string(),
                id: id.to_string(),
            })
    }

    fn fetch_entry(&self, id: &str) -> Result<Value> {
        self.served();
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| CanopyError::ResourceNotFound {
                kind: "Entry".to_string(),
                id: id.to_string(),
            })
    }

    fn fetch_asset(&self, id: &str) -> Result<Value> {
        self.served();
        self.assets
            .get(id)
            .cloned()
            .ok_or_else(|| CanopyError::ResourceNotFound {
                kind: "Asset".to_string(),
                id: id.to_string(),
            })
    }
}

pub fn space_envelope() -> Value {
    json!({
        "sys": {"type": "Space", "id": "cfexampleapi"},
        "name": "Canopy Example API",
        "locales": [
            {"code": "en-US", "default": true, "name": "English", "fallbackCode": null},
            {"code": "tlh", "default": false, "name": "Klingon", "fallbackCode": "en-US"}
        ]
    })
}

pub fn cat_content_type() -> Value {
    json!({
        "sys": {"type": "ContentType", "id": "cat", "revision": 2},
        "name": "Cat",
        "description": "Meow.",
        "displayField": "name",
        "fields": [
            {"id": "name", "name": "Name", "type": "Text", "localized": true},
            {"id": "likes", "name": "Likes", "type": "Array", "items": {"type": "Symbol"}},
            {"id": "color", "name": "Color", "type": "Symbol"},
            {"id": "bestFriend", "name": "Best Friend", "type": "Link", "linkType": "Entry"},
            {"id": "birthday", "name": "Birthday", "type": "Date"},
            {"id": "lives", "name": "Lives left", "type": "Integer"},
            {"id": "image", "name": "Image", "type": "Link", "linkType": "Asset"}
        ]
    })
}

/// The live `person` schema, with its full field list.
pub fn person_content_type() -> Value {
    json!({
        "sys": {"type": "ContentType", "id": "person", "revision": 1},
        "name": "Person",
        "displayField": "name",
        "fields": [
            {"id": "name", "name": "Name", "type": "Symbol"},
            {"id": "jobTitle", "name": "Job Title", "type": "Symbol"},
            {"id": "picture", "name": "Picture", "type": "Link", "linkType": "Asset"}
        ]
    })
}

/// A stale `person` schema: the field list has been emptied out, as if the
/// cache predates the fields being added.
pub fn stale_person_content_type() -> Value {
    json!({
        "sys": {
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": "cfexampleapi"}},
            "id": "person",
            "type": "ContentType",
            "createdAt": "2018-02-19T16:11:55.140Z",
            "updatedAt": "2018-02-19T16:11:55.140Z",
            "revision": 1
        },
        "displayField": "name",
        "name": "Person",
        "description": "",
        "fields": []
    })
}

pub fn nyancat_entry() -> Value {
    json!({
        "sys": {
            "type": "Entry", "id": "nyancat", "revision": 5, "locale": "en-US",
            "createdAt": "2013-06-27T22:46:19.513Z",
            "updatedAt": "2013-09-04T09:19:39.027Z",
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "cat"}},
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": "cfexampleapi"}}
        },
        "fields": {
            "name": "Nyan Cat",
            "likes": ["rainbows", "fish"],
            "color": "rainbow",
            "bestFriend": {"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}},
            "birthday": "2011-04-04T22:00:00Z",
            "lives": 1337,
            "image": {"sys": {"type": "Link", "linkType": "Asset", "id": "nyancat"}}
        }
    })
}

pub fn happycat_entry() -> Value {
    json!({
        "sys": {
            "type": "Entry", "id": "happycat", "revision": 8, "locale": "en-US",
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "cat"}}
        },
        "fields": {
            "name": "Happy Cat",
            "likes": ["cheezburger"],
            "color": "gray",
            "lives": 1
        }
    })
}

pub fn ben_chang_entry() -> Value {
    json!({
        "sys": {
            "type": "Entry", "id": "Kpwt1njxgAm04oQYyUScm", "revision": 1, "locale": "en-US",
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "person"}},
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": "cfexampleapi"}}
        },
        "fields": {
            "name": "Ben Chang",
            "jobTitle": "Señor",
            "picture": {"sys": {"type": "Link", "linkType": "Asset", "id": "SQOIQ1rZMQQUeyoyGiEUq"}}
        }
    })
}

pub fn nyancat_asset() -> Value {
    json!({
        "sys": {"type": "Asset", "id": "nyancat", "revision": 1, "locale": "en-US"},
        "fields": {
            "title": "Nyan Cat",
            "file": {
                "url": "//images.canopy-cms.io/cfexampleapi/nyancat.png",
                "fileName": "Nyan_cat_250px_frame.png",
                "contentType": "image/png",
                "details": {"size": 12273, "image": {"width": 250, "height": 250}}
            }
        }
    })
}
