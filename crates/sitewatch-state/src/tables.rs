//! redb table definitions for the sitewatch state store.
//!
//! A single table of `&str` keys and `&[u8]` values. Values are
//! JSON-serialized [`Envelope`](crate::store::Envelope) records carrying
//! the stored string plus an optional absolute expiry.

use redb::TableDefinition;

/// All stored entries, keyed by caller-chosen string keys.
pub const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");
