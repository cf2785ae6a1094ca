//! Page handlers and shared template plumbing.
//!
//! Each GET handler reads the store, builds view types, and renders an
//! askama template. The admin POST actions in `actions.rs` reuse the
//! form templates defined here.

use askama::Template;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::error;

use sitewatch_core::{auth, sites};
use sitewatch_state::StateStore;

use crate::AppState;
use crate::views::SiteStatusView;

pub(crate) fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(
        tmpl.render()
            .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")),
    )
}

// ── Dashboard ───────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    online_count: usize,
    total: usize,
    sites: Vec<SiteStatusView>,
}

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let configured = match sites::load_sites(&state.store) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to load site configuration");
            return error_page("configuration storage is unavailable");
        }
    };

    if configured.is_empty() {
        return Redirect::to("/admin").into_response();
    }

    let self_host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let statuses = state.checker.check_sites(&configured, self_host).await;
    let views: Vec<SiteStatusView> = statuses.iter().map(SiteStatusView::from_status).collect();
    let online_count = statuses.iter().filter(|s| s.is_online()).count();

    render(DashboardTemplate {
        online_count,
        total: views.len(),
        sites: views,
    })
    .into_response()
}

// ── Admin forms ─────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin_setup.html")]
struct SetupTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "admin_login.html")]
struct LoginTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "admin_manage.html")]
struct ManageTemplate {
    domains: String,
    password: String,
    message: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

pub async fn admin(State(state): State<AppState>) -> Response {
    match auth::credential_exists(&state.store) {
        Ok(true) => login_page("").into_response(),
        Ok(false) => setup_page("").into_response(),
        Err(e) => {
            error!(error = %e, "failed to read credential");
            error_page("configuration storage is unavailable")
        }
    }
}

/// First-run password setup form.
pub(crate) fn setup_page(message: &str) -> Html<String> {
    render(SetupTemplate {
        message: message.to_string(),
    })
}

/// Login form, optionally with an error or throttle message.
pub(crate) fn login_page(message: &str) -> Html<String> {
    render(LoginTemplate {
        message: message.to_string(),
    })
}

/// Authenticated management form with the current domain list.
///
/// The password rides along as a hidden field; the admin surface is
/// stateless and `save` re-verifies it.
pub(crate) fn manage_page(store: &StateStore, password: &str, message: &str) -> Response {
    let domains = match sites::load_domains(store) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to load domains for management form");
            return error_page("configuration storage is unavailable");
        }
    };
    render(ManageTemplate {
        domains: domains.join("\n"),
        password: password.to_string(),
        message: message.to_string(),
    })
    .into_response()
}

/// Generic error page; no internal detail leaks into the body.
pub(crate) fn error_page(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        render(ErrorTemplate {
            message: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn test_state() -> AppState {
        AppState::new(StateStore::open_in_memory().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn dashboard_redirects_when_unconfigured() {
        let state = test_state();
        let resp = dashboard(State(state), HeaderMap::new()).await;
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers()[header::LOCATION], "/admin");
    }

    #[tokio::test]
    async fn dashboard_renders_configured_sites() {
        let state = test_state();
        // The only configured site is the dashboard host itself, so the
        // probe short-circuits and no network is touched.
        sites::save_sites(&state.store, "dash.example").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "dash.example".parse().unwrap());

        let resp = dashboard(State(state), headers).await;
        assert_eq!(resp.status(), 200);
        let body = body_of(resp).await;
        assert!(body.contains("dash.example"));
        assert!(body.contains("normal (self)"));
        assert!(body.contains("1 of 1"));
    }

    #[tokio::test]
    async fn admin_shows_setup_before_credential() {
        let state = test_state();
        let resp = admin(State(state)).await;
        assert_eq!(resp.status(), 200);
        let body = body_of(resp).await;
        assert!(body.contains("set_password"));
    }

    #[tokio::test]
    async fn admin_shows_login_after_credential() {
        let state = test_state();
        auth::set_credential(&state.store, "correct horse").unwrap();

        let resp = admin(State(state)).await;
        assert_eq!(resp.status(), 200);
        let body = body_of(resp).await;
        assert!(body.contains(r#"name="action" value="login""#));
    }

    #[tokio::test]
    async fn error_page_is_500() {
        let resp = error_page("configuration storage is unavailable");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
