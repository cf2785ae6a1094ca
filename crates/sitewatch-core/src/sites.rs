//! Site-list configuration.
//!
//! The configured domains live under one fixed key as a JSON array of
//! bare domain strings. Saves replace the list wholesale; insertion
//! order is display order.

use sitewatch_state::StateStore;
use tracing::debug;

use crate::error::CoreResult;
use crate::keys;
use crate::types::Site;

/// Parse operator input (one domain per line) into a clean domain list.
///
/// Each line is trimmed, stripped of any scheme prefix and path, and
/// dropped if nothing remains.
pub fn parse_domains(input: &str) -> Vec<String> {
    input
        .lines()
        .map(normalize_domain)
        .filter(|d| !d.is_empty())
        .collect()
}

fn normalize_domain(line: &str) -> String {
    let s = line.trim();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);
    // Anything after the first slash is a path, not part of the domain.
    s.split('/').next().unwrap_or_default().trim().to_string()
}

/// Load the configured sites in stored order. A missing key is an empty
/// configuration, not an error.
pub fn load_sites(store: &StateStore) -> CoreResult<Vec<Site>> {
    let domains = load_domains(store)?;
    Ok(domains.iter().map(|d| Site::from_domain(d)).collect())
}

/// Load the raw domain list in stored order.
pub fn load_domains(store: &StateStore) -> CoreResult<Vec<String>> {
    match store.get(keys::SITES)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Normalize `input` and replace the stored domain list with the result.
///
/// Returns the persisted domains.
pub fn save_sites(store: &StateStore, input: &str) -> CoreResult<Vec<String>> {
    let domains = parse_domains(input);
    let raw = serde_json::to_string(&domains)?;
    store.put(keys::SITES, &raw, None)?;
    debug!(count = domains.len(), "site list saved");
    Ok(domains)
}
