//! Dashboard routes: the balance view and the actions posted from it.

use axum::extract::{Form, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::respond;
use super::session::session_from_jar;
use crate::backend::RequestKind;
use crate::context::PageScope;
use crate::pages::dashboard::DashboardController;
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct AmountParams {
    #[serde(default)]
    amount: String,
}

/// Gate and load; every dashboard handler starts here.
async fn activated(state: &AppState, jar: &CookieJar, scope: PageScope) -> DashboardController {
    let mut page = DashboardController::new(state.context(session_from_jar(jar)), scope);
    page.activate().await;
    page
}

/// `GET /dashboard`
pub async fn show(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (scope, _guard) = PageScope::open();
    let page = activated(&state, &jar, scope).await;
    respond(&state, jar, page.into_parts(), |view, _| views::dashboard(view))
}

/// `POST /dashboard/transfer`
pub async fn transfer(State(state): State<AppState>, jar: CookieJar, Form(params): Form<AmountParams>) -> Response {
    submit(state, jar, RequestKind::Transfer, &params.amount).await
}

/// `POST /dashboard/sale`
pub async fn sale(State(state): State<AppState>, jar: CookieJar, Form(params): Form<AmountParams>) -> Response {
    submit(state, jar, RequestKind::Sale, &params.amount).await
}

async fn submit(state: AppState, jar: CookieJar, kind: RequestKind, amount: &str) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = activated(&state, &jar, scope).await;
    page.submit(kind, amount).await;
    respond(&state, jar, page.into_parts(), |view, _| views::dashboard(view))
}

/// `POST /dashboard/reset-password`
pub async fn reset_password(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = activated(&state, &jar, scope).await;
    page.reset_password().await;
    respond(&state, jar, page.into_parts(), |view, _| views::dashboard(view))
}
