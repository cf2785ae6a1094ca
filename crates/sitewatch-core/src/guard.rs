//! Login throttling.
//!
//! A sliding one-hour window over a persisted attempt list, capped at
//! five failed attempts per requester identity. Reads fail open: a
//! missing or unreadable list counts as no prior attempts. The
//! read-modify-write in `record_attempt` is last-write-wins by design;
//! the store offers no transactions and this is not a correctness-
//! critical path for a single-operator dashboard.

use std::time::Duration;

use sitewatch_state::{StateStore, epoch_ms};
use tracing::{debug, warn};

use crate::error::CoreResult;
use crate::keys;
use crate::types::LoginAttempt;

/// Failed attempts allowed inside the window before throttling.
pub const MAX_ATTEMPTS: usize = 5;

/// Sliding window length.
pub const WINDOW: Duration = Duration::from_secs(60 * 60);

/// Identity used when no client-IP header is present. All such requests
/// share one counter.
pub const FALLBACK_IDENTITY: &str = "unknown";

/// Throttles login attempts per requester identity.
#[derive(Clone)]
pub struct LoginGuard {
    store: StateStore,
}

impl LoginGuard {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Whether `identity` has exhausted its attempts inside the window.
    ///
    /// Read-only; never prunes or rewrites storage.
    pub fn is_rate_limited(&self, identity: &str) -> bool {
        let cutoff = cutoff_ms();
        let recent = self
            .load()
            .iter()
            .filter(|a| a.ip == identity && a.timestamp > cutoff)
            .count();
        recent >= MAX_ATTEMPTS
    }

    /// Record a failed attempt for `identity` and prune every stale
    /// entry (all identities) from the persisted list.
    pub fn record_attempt(&self, identity: &str) -> CoreResult<()> {
        let now = epoch_ms();
        let cutoff = cutoff_ms();

        let mut attempts = self.load();
        attempts.push(LoginAttempt {
            ip: identity.to_string(),
            timestamp: now,
        });
        attempts.retain(|a| a.timestamp > cutoff);

        let raw = serde_json::to_string(&attempts)?;
        self.store.put(keys::LOGIN_ATTEMPTS, &raw, Some(WINDOW))?;
        warn!(%identity, recent = attempts.len(), "failed login recorded");
        Ok(())
    }

    /// Drop the entire attempt list, all identities included.
    ///
    /// Called on any successful login; the throttle guards one shared
    /// password, so a success clears the slate globally.
    pub fn reset(&self) -> CoreResult<()> {
        self.store.delete(keys::LOGIN_ATTEMPTS)?;
        debug!("login attempts cleared");
        Ok(())
    }

    /// Load the persisted list, failing open on any read problem.
    fn load(&self) -> Vec<LoginAttempt> {
        match self.store.get(keys::LOGIN_ATTEMPTS) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                debug!(error = %e, "attempt list unreadable, treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "attempt list read failed, treating as empty");
                Vec::new()
            }
        }
    }
}

fn cutoff_ms() -> u64 {
    epoch_ms().saturating_sub(WINDOW.as_millis() as u64)
}
