//! Cache key derivation.
//!
//! Keys are opaque strings safe for any key-value store. Every key encodes
//! the API mode and the space id (and the content-type id where applicable),
//! so two spaces or two API surfaces never collide.

use crate::config::{ApiMode, CacheConfig};

/// Key under which a space definition is cached.
pub fn space_key(api: ApiMode, space_id: &str) -> String {
    format!(
        "{}.{}.{}.space",
        CacheConfig::KEY_PREFIX,
        api.as_str(),
        space_id
    )
}

/// Key under which one content-type definition is cached.
pub fn content_type_key(api: ApiMode, space_id: &str, content_type_id: &str) -> String {
    format!(
        "{}.{}.{}.content_type.{}",
        CacheConfig::KEY_PREFIX,
        api.as_str(),
        space_id,
        content_type_id
    )
}
