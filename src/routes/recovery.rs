//! `/reset-password` routes, the landing page of the reset email.

use axum::extract::{Form, Query, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::respond;
use super::session::session_from_jar;
use crate::context::PageScope;
use crate::pages::recovery::PasswordRecoveryController;
use crate::state::AppState;
use crate::views;

const RECOVERY_LINK_TYPE: &str = "recovery";

#[derive(Deserialize)]
pub struct RecoveryQuery {
    token_hash: Option<String>,
    #[serde(rename = "type")]
    link_type: Option<String>,
}

impl RecoveryQuery {
    /// Token hash of a recovery link. Links of any other type are ignored.
    fn recovery_token(&self) -> Option<&str> {
        match self.link_type.as_deref() {
            None | Some(RECOVERY_LINK_TYPE) => self.token_hash.as_deref(),
            Some(_) => None,
        }
    }
}

#[derive(Deserialize)]
pub struct PasswordParams {
    #[serde(default)]
    password: String,
}

/// `GET /reset-password?token_hash=…&type=recovery`
pub async fn open(State(state): State<AppState>, jar: CookieJar, Query(query): Query<RecoveryQuery>) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = PasswordRecoveryController::new(state.context(session_from_jar(&jar)), scope);
    page.open(query.recovery_token()).await;
    respond(&state, jar, page.into_parts(), views::recovery)
}

/// `POST /reset-password`
pub async fn submit(State(state): State<AppState>, jar: CookieJar, Form(params): Form<PasswordParams>) -> Response {
    let (scope, _guard) = PageScope::open();
    let mut page = PasswordRecoveryController::new(state.context(session_from_jar(&jar)), scope);
    page.submit(&params.password).await;
    respond(&state, jar, page.into_parts(), views::recovery)
}
