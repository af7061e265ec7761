//! Recoverable hydration diagnostics.

use std::fmt;

/// One recoverable condition observed while building an entry.
///
/// Emitted when a payload field has no counterpart in the content-type
/// definition — the signature of a stale cached schema. The message format
/// is part of the observable contract; hosts that match on it can rely on
/// the quoted display name, content-type id, entry id, and field id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub content_type_name: String,
    pub content_type_id: String,
    pub entry_id: String,
    pub field_id: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entry \"{}\" of content type \"{}\" (\"{}\") contains field \"{}\" \
             which is not present in the content type definition. \
             Please check your cache for stale content type definitions.",
            self.entry_id, self.content_type_name, self.content_type_id, self.field_id
        )
    }
}
