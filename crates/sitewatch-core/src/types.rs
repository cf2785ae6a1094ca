//! Domain types shared across the sitewatch components.

use serde::{Deserialize, Serialize};

/// One configured site being monitored.
///
/// Built from a single persisted bare-domain string; immutable for the
/// duration of a request cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Display label derived from the domain.
    pub name: String,
    /// Absolute probe target, always scheme-prefixed.
    pub url: String,
    /// The bare domain as configured.
    pub display_url: String,
}

impl Site {
    /// Build a site from a bare domain string.
    pub fn from_domain(domain: &str) -> Self {
        let name = domain.strip_prefix("www.").unwrap_or(domain).to_string();
        Self {
            name,
            url: format!("https://{domain}"),
            display_url: domain.to_string(),
        }
    }

    /// The hostname this site is probed at.
    pub fn host(&self) -> &str {
        &self.display_url
    }
}

/// Reachability verdict for one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteState {
    Online,
    Offline,
}

impl SiteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteState::Online => "online",
            SiteState::Offline => "offline",
        }
    }
}

/// Result of probing one site. Never persisted; lives for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteStatus {
    pub site: Site,
    pub state: SiteState,
    /// HTTP status code, 0 when the site was unreachable.
    pub status_code: u16,
    /// Human-readable detail for the dashboard.
    pub status_text: String,
}

impl SiteStatus {
    pub fn is_online(&self) -> bool {
        self.state == SiteState::Online
    }
}

/// One failed login, persisted in the sliding-window attempt list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub ip: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_from_domain() {
        let site = Site::from_domain("example.com");
        assert_eq!(site.name, "example.com");
        assert_eq!(site.url, "https://example.com");
        assert_eq!(site.display_url, "example.com");
    }

    #[test]
    fn site_label_strips_www() {
        let site = Site::from_domain("www.example.com");
        assert_eq!(site.name, "example.com");
        assert_eq!(site.url, "https://www.example.com");
        assert_eq!(site.host(), "www.example.com");
    }

    #[test]
    fn site_state_strings() {
        assert_eq!(SiteState::Online.as_str(), "online");
        assert_eq!(SiteState::Offline.as_str(), "offline");
    }
}
