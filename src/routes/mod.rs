//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each handler opens a page scope, runs one page controller against a
//! per-request backend context, then turns the controller's final state into
//! a response: HTML for ready/error/loading pages, `303 See Other` for
//! redirects, plus any session cookie changes.

pub mod auth;
pub mod dashboard;
pub mod recovery;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::CookieJar;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::context::SessionChange;
use crate::pages::{PageState, Route};
use crate::state::AppState;
use crate::views;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_to_dashboard))
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/transfer", post(dashboard::transfer))
        .route("/dashboard/sale", post(dashboard::sale))
        .route("/dashboard/reset-password", post(dashboard::reset_password))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/reset-password", get(recovery::open).post(recovery::submit))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root_to_dashboard() -> Redirect {
    Redirect::to(Route::Dashboard.path())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Render a controller's final state, attaching session cookie changes.
pub(crate) fn respond<V>(
    state: &AppState,
    jar: CookieJar,
    (page, change): (PageState<V>, SessionChange),
    render: impl FnOnce(&V, Option<&str>) -> String,
) -> Response {
    let jar = session::apply_session_change(jar, &change, state.config.cookie_secure);
    match page {
        PageState::Loading => (jar, Html(views::loading())).into_response(),
        PageState::Redirecting(route) => (jar, Redirect::to(route.path())).into_response(),
        PageState::Ready(view) => (jar, Html(render(&view, None))).into_response(),
        PageState::ErrorDisplayed { view, message } => (jar, Html(render(&view, Some(&message)))).into_response(),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
