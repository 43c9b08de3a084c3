//! Supabase HTTP client for the GoTrue auth API and the PostgREST table API.
//!
//! Thin `reqwest` wrapper. Response parsing lives in free functions so the
//! wire shapes are testable without a server.

use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

use super::{AuthUser, Backend, BackendError, Session, SignUpRequest, TransactionRequest, UserProfile};
use crate::config::BackendTimeouts;

const PROFILE_TABLE: &str = "user_profiles";
const TRANSACTION_TABLE: &str = "transactions";
const SINGLE_OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Build a client for the project at `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: String, api_key: String, timeouts: BackendTimeouts) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::transport(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, base_url, api_key })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Attach the project key and a bearer token. Anonymous calls use the key as bearer.
    fn request(&self, method: reqwest::Method, url: String, access_token: Option<&str>) -> reqwest::RequestBuilder {
        let bearer = access_token.unwrap_or(&self.api_key);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Send and return the body text of a 2xx response, or the reduced error.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(BackendError::new(Some(status), error_message(status, &text)));
        }
        Ok(text)
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, BackendError> {
        let builder = self
            .request(reqwest::Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let text = self.send(builder).await?;
        parse_session(&text, now_unix())?.ok_or_else(|| BackendError::new(None, "backend returned no session"))
    }
}

#[async_trait::async_trait]
impl Backend for SupabaseClient {
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.token_grant("refresh_token", serde_json::json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, BackendError> {
        let builder = self.request(reqwest::Method::GET, self.auth_url("user"), Some(access_token));
        match self.send(builder).await {
            Ok(text) => parse_json::<AuthUser>(&text).map(Some),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Option<Session>, BackendError> {
        let builder = self
            .request(reqwest::Method::POST, self.auth_url("signup"), None)
            .json(&serde_json::json!({
                "email": request.email,
                "password": request.password,
                "data": { "name": request.name },
            }));
        let text = self.send(builder).await?;
        parse_session(&text, now_unix())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.token_grant("password", serde_json::json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let builder = self.request(reqwest::Method::POST, self.auth_url("logout"), Some(access_token));
        self.send(builder).await.map(|_| ())
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<(), BackendError> {
        let builder = self
            .request(reqwest::Method::POST, self.auth_url("recover"), None)
            .query(&[("redirect_to", redirect_to)])
            .json(&serde_json::json!({ "email": email }));
        self.send(builder).await.map(|_| ())
    }

    async fn verify_recovery(&self, token_hash: &str) -> Result<Session, BackendError> {
        let builder = self
            .request(reqwest::Method::POST, self.auth_url("verify"), None)
            .json(&serde_json::json!({ "type": "recovery", "token_hash": token_hash }));
        let text = self.send(builder).await?;
        parse_session(&text, now_unix())?.ok_or_else(|| BackendError::new(None, "backend returned no session"))
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<(), BackendError> {
        let builder = self
            .request(reqwest::Method::PUT, self.auth_url("user"), Some(access_token))
            .json(&serde_json::json!({ "password": password }));
        self.send(builder).await.map(|_| ())
    }

    async fn select_profile(&self, access_token: &str, user_id: Uuid) -> Result<UserProfile, BackendError> {
        let id_filter = format!("eq.{user_id}");
        let builder = self
            .request(reqwest::Method::GET, self.rest_url(PROFILE_TABLE), Some(access_token))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .header("Accept", SINGLE_OBJECT_ACCEPT);
        let text = self.send(builder).await?;
        parse_json::<UserProfile>(&text)
    }

    async fn insert_transaction_request(
        &self,
        access_token: &str,
        request: &TransactionRequest,
    ) -> Result<(), BackendError> {
        let builder = self
            .request(reqwest::Method::POST, self.rest_url(TRANSACTION_TABLE), Some(access_token))
            .header("Prefer", "return=minimal")
            .json(&[request]);
        self.send(builder).await.map(|_| ())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

fn parse_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::new(None, format!("unexpected backend response: {e}")))
}

/// Read a session out of a token/signup/verify response.
///
/// Sign-up answers with a bare user object when email confirmation is
/// pending; that maps to `Ok(None)`.
fn parse_session(text: &str, now: i64) -> Result<Option<Session>, BackendError> {
    let token: TokenResponse = parse_json(text)?;
    let (Some(access_token), Some(refresh_token)) = (token.access_token, token.refresh_token) else {
        return Ok(None);
    };
    let expires_at = token
        .expires_at
        .or_else(|| token.expires_in.map(|secs| now + secs))
        .unwrap_or(now);
    Ok(Some(Session { access_token, refresh_token, expires_at }))
}

/// Reduce an error body to the single message shown to users.
fn error_message(status: u16, text: &str) -> String {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    body.msg
        .or(body.message)
        .or(body.error_description)
        .or(body.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = text.trim();
            if trimmed.is_empty() { format!("request failed with status {status}") } else { trimmed.to_owned() }
        })
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
