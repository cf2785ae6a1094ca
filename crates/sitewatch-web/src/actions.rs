//! Admin form actions.
//!
//! One POST endpoint dispatching on the `action` field. The admin
//! surface is stateless: there is no session, so the management form
//! carries the password as a hidden field and `save` re-verifies it.

use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use sitewatch_core::{FALLBACK_IDENTITY, auth, sites};

use crate::AppState;
use crate::pages::{error_page, login_page, manage_page, setup_page};

/// Trusted proxy header carrying the client IP.
const CLIENT_IP_HEADER: &str = "cf-connecting-ip";

const THROTTLED_MESSAGE: &str = "too many failed attempts, try again later";
const LOGIN_FAILED_MESSAGE: &str = "login failed";

#[derive(serde::Deserialize)]
pub struct AdminForm {
    pub action: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub urls: String,
}

pub async fn admin_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AdminForm>,
) -> Response {
    let identity = client_identity(&headers);
    match form.action.as_str() {
        "set_password" => set_password(&state, &form),
        "login" => login(&state, &identity, &form),
        "save" => save(&state, &identity, &form),
        other => {
            warn!(action = %other, "unknown admin action");
            error_page("something went wrong")
        }
    }
}

/// Requester identity for the login throttle. Requests without the
/// proxy header all share one counter.
fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get(CLIENT_IP_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(FALLBACK_IDENTITY)
        .to_string()
}

// ── set_password ────────────────────────────────────────────────

fn set_password(state: &AppState, form: &AdminForm) -> Response {
    match auth::credential_exists(&state.store) {
        Ok(true) => {
            // The credential is set once; the setup action is not a
            // change-password path.
            warn!("set_password attempted with credential already present");
            return login_page("").into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "failed to read credential");
            return error_page("configuration storage is unavailable");
        }
    }

    if let Err(issue) = auth::validate_new_password(&form.new_password, &form.confirm_password) {
        return setup_page(issue.message()).into_response();
    }

    if let Err(e) = auth::set_credential(&state.store, &form.new_password) {
        error!(error = %e, "failed to store credential");
        return error_page("configuration storage is unavailable");
    }

    manage_page(&state.store, &form.new_password, "password set")
}

// ── login ───────────────────────────────────────────────────────

fn login(state: &AppState, identity: &str, form: &AdminForm) -> Response {
    if state.guard.is_rate_limited(identity) {
        warn!(%identity, "login throttled");
        return login_page(THROTTLED_MESSAGE).into_response();
    }

    match auth::verify_password(&state.store, &form.password) {
        Ok(true) => {
            if let Err(e) = state.guard.reset() {
                error!(error = %e, "failed to clear login attempts");
            }
            info!(%identity, "admin login");
            manage_page(&state.store, &form.password, "")
        }
        Ok(false) => {
            if let Err(e) = state.guard.record_attempt(identity) {
                error!(error = %e, "failed to record login attempt");
            }
            login_page(LOGIN_FAILED_MESSAGE).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to verify password");
            error_page("configuration storage is unavailable")
        }
    }
}

// ── save ────────────────────────────────────────────────────────

fn save(state: &AppState, identity: &str, form: &AdminForm) -> Response {
    if state.guard.is_rate_limited(identity) {
        warn!(%identity, "save throttled");
        return login_page(THROTTLED_MESSAGE).into_response();
    }

    match auth::verify_password(&state.store, &form.password) {
        Ok(true) => {}
        Ok(false) => {
            if let Err(e) = state.guard.record_attempt(identity) {
                error!(error = %e, "failed to record login attempt");
            }
            return login_page(LOGIN_FAILED_MESSAGE).into_response();
        }
        Err(e) => {
            error!(error = %e, "failed to verify password");
            return error_page("configuration storage is unavailable");
        }
    }

    match sites::save_sites(&state.store, &form.urls) {
        Ok(domains) => {
            info!(count = domains.len(), "site list updated");
            manage_page(&state.store, &form.password, "saved")
        }
        Err(e) => {
            error!(error = %e, "failed to save site list");
            error_page("configuration storage is unavailable")
        }
    }
}
