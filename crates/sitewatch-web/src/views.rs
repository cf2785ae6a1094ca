//! View types for template rendering.
//!
//! Purpose-built for askama: pre-formatted strings and computed fields
//! so templates stay simple.

use sitewatch_core::SiteStatus;

/// One row of the status dashboard.
pub struct SiteStatusView {
    pub name: String,
    pub display_url: String,
    pub url: String,
    pub state_label: &'static str,
    pub badge_class: &'static str,
    /// Status code as shown, `"-"` when the site was unreachable.
    pub code_display: String,
    pub status_text: String,
}

impl SiteStatusView {
    pub fn from_status(status: &SiteStatus) -> Self {
        Self {
            name: status.site.name.clone(),
            display_url: status.site.display_url.clone(),
            url: status.site.url.clone(),
            state_label: status.state.as_str(),
            badge_class: if status.is_online() {
                "badge-online"
            } else {
                "badge-offline"
            },
            code_display: if status.status_code == 0 {
                "-".to_string()
            } else {
                status.status_code.to_string()
            },
            status_text: status.status_text.clone(),
        }
    }
}
