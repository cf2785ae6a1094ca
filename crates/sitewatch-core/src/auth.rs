//! Credential handling for the admin surface.
//!
//! A single shared password, stored as a sha256 hex digest under a
//! fixed key. Set once on first run; there is no change-password path.

use sha2::{Digest, Sha256};
use sitewatch_state::StateStore;
use tracing::info;

use crate::error::CoreResult;
use crate::keys;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Why a proposed password was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    Mismatch,
}

impl PasswordIssue {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordIssue::TooShort => "password must be at least 8 characters",
            PasswordIssue::Mismatch => "passwords do not match",
        }
    }
}

/// One-way digest of a password, hex-encoded.
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Validate a first-run password against the policy.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), PasswordIssue> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PasswordIssue::TooShort);
    }
    if password != confirm {
        return Err(PasswordIssue::Mismatch);
    }
    Ok(())
}

/// Whether a credential has been stored.
pub fn credential_exists(store: &StateStore) -> CoreResult<bool> {
    Ok(store.get(keys::CREDENTIAL)?.is_some())
}

/// Store the digest of `password` as the admin credential.
pub fn set_credential(store: &StateStore, password: &str) -> CoreResult<()> {
    store.put(keys::CREDENTIAL, &digest_password(password), None)?;
    info!("admin credential set");
    Ok(())
}

/// Check `password` against the stored credential.
///
/// False when no credential is stored; the setup flow handles that case
/// before login is ever offered.
pub fn verify_password(store: &StateStore, password: &str) -> CoreResult<bool> {
    match store.get(keys::CREDENTIAL)? {
        Some(stored) => Ok(stored == digest_password(password)),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_hex() {
        let a = digest_password("hunter22");
        let b = digest_password("hunter22");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_passwords_different_digests() {
        assert_ne!(digest_password("hunter22"), digest_password("hunter23"));
    }

    #[test]
    fn policy_rejects_short_passwords() {
        assert_eq!(
            validate_new_password("short", "short"),
            Err(PasswordIssue::TooShort)
        );
    }

    #[test]
    fn policy_rejects_mismatched_confirmation() {
        assert_eq!(
            validate_new_password("longenough", "different1"),
            Err(PasswordIssue::Mismatch)
        );
    }

    #[test]
    fn policy_accepts_matching_long_password() {
        assert_eq!(validate_new_password("longenough", "longenough"), Ok(()));
    }

    #[test]
    fn set_and_verify() {
        let store = StateStore::open_in_memory().unwrap();
        assert!(!credential_exists(&store).unwrap());

        set_credential(&store, "correct horse").unwrap();
        assert!(credential_exists(&store).unwrap());
        assert!(verify_password(&store, "correct horse").unwrap());
        assert!(!verify_password(&store, "wrong").unwrap());
    }

    #[test]
    fn verify_without_credential_is_false() {
        let store = StateStore::open_in_memory().unwrap();
        assert!(!verify_password(&store, "anything").unwrap());
    }
}
