//! Hydration: raw JSON envelopes to typed entities.
//!
//! The [`Reviver`] dispatches an envelope by its `sys.type` discriminator to
//! a type-specific builder. Entry building is tolerant of stale cached
//! schemas: payload fields missing from the content-type definition degrade
//! to per-field [`Diagnostic`]s, never to a failed hydration.

mod diagnostics;
mod entry_builder;
mod reviver;

pub use diagnostics::Diagnostic;
pub use reviver::{Entity, Revived, Reviver};
