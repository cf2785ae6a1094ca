//! sitewatch-state — embedded key-value store backed by redb.
//!
//! The rest of the system treats this crate as its storage port:
//! string-keyed `get`/`put`/`delete` with an optional TTL per entry.
//! Higher layers decide what the values mean; this crate only moves
//! JSON envelopes in and out of redb.

mod error;
mod store;
mod tables;

pub use error::{StateError, StateResult};
pub use store::{StateStore, epoch_ms};
