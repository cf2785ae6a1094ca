//! sitewatch-web — server-rendered web UI for sitewatch.
//!
//! Axum route handlers rendering askama templates. Handlers are
//! infallible at the type level: every internal failure becomes a
//! rendered error page, never a leaked error body.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | Status dashboard (redirects to `/admin` when unconfigured) |
//! | `GET /admin` | First-run setup form or login form |
//! | `POST /admin` | `set_password` / `login` / `save` actions |

pub mod actions;
pub mod pages;
pub mod views;

use axum::Router;
use axum::routing::get;
use sitewatch_core::{CoreResult, LoginGuard, StatusChecker};
use sitewatch_state::StateStore;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: StateStore,
    pub checker: StatusChecker,
    pub guard: LoginGuard,
}

impl AppState {
    pub fn new(store: StateStore) -> CoreResult<Self> {
        Ok(Self {
            checker: StatusChecker::new()?,
            guard: LoginGuard::new(store.clone()),
            store,
        })
    }
}

/// Build the complete router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/admin", get(pages::admin).post(actions::admin_action))
        .with_state(state)
}
