//! Sign-up, password sign-in and logout routes.

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::respond;
use super::session::{apply_session_change, session_from_jar};
use crate::backend::SignUpRequest;
use crate::context::PageScope;
use crate::pages::account;
use crate::pages::login::LoginController;
use crate::pages::signup::SignupController;
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct SignupParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `GET /signup`
pub async fn signup_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = SignupController::new(state.context(None), scope);
    page.show();
    respond(&state, jar, page.into_parts(), views::signup)
}

/// `POST /signup`: create the account, then go straight to the dashboard.
pub async fn signup(State(state): State<AppState>, jar: CookieJar, Form(params): Form<SignupParams>) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = SignupController::new(state.context(None), scope);
    page.submit(SignUpRequest { name: params.name.trim().to_owned(), email: params.email.trim().to_owned(), password: params.password })
        .await;
    respond(&state, jar, page.into_parts(), views::signup)
}

/// `GET /login`
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(state.context(None), scope);
    page.show();
    respond(&state, jar, page.into_parts(), views::login)
}

/// `POST /login`
pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(params): Form<LoginParams>) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(state.context(None), scope);
    page.submit(params.email.trim(), &params.password).await;
    respond(&state, jar, page.into_parts(), views::login)
}

/// `POST /logout`: sign out and clear cookies. Always lands on `/login`.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut ctx = state.context(session_from_jar(&jar));
    let route = account::logout(&mut ctx).await;
    let jar = apply_session_change(jar, ctx.session_change(), state.config.cookie_secure);
    (jar, Redirect::to(route.path())).into_response()
}
