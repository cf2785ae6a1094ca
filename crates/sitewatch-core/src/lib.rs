//! sitewatch-core — site probes, login throttling, and configuration.
//!
//! Two components carry the interesting behavior:
//!
//! - [`checker::StatusChecker`] probes every configured site
//!   concurrently, each GET raced against its own deadline, and
//!   classifies the outcomes in input order.
//! - [`guard::LoginGuard`] throttles admin login attempts over a
//!   sliding one-hour window persisted in the state store.
//!
//! The rest — site-list normalization, credential digests — is glue
//! over the same store.

pub mod auth;
pub mod checker;
pub mod error;
pub mod guard;
pub mod sites;
pub mod types;

pub use checker::{PROBE_TIMEOUT, Raced, StatusChecker, race_deadline};
pub use error::{CoreError, CoreResult};
pub use guard::{FALLBACK_IDENTITY, LoginGuard, MAX_ATTEMPTS, WINDOW};
pub use types::{LoginAttempt, Site, SiteState, SiteStatus};

/// Fixed keys in the state store.
pub mod keys {
    /// JSON array of bare domain strings, in display order.
    pub const SITES: &str = "sites";
    /// Hex sha256 digest of the shared admin password.
    pub const CREDENTIAL: &str = "admin_credential";
    /// JSON array of [`crate::types::LoginAttempt`] records.
    pub const LOGIN_ATTEMPTS: &str = "login_attempts";
}
