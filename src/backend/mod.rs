//! Backend collaborator: the managed auth and table service.
//!
//! DESIGN
//! ======
//! Every persistence and identity concern is owned by the hosted backend.
//! `Backend` is the seam page controllers talk through; `SupabaseClient` is
//! the HTTP implementation and tests substitute a recording mock. Calls
//! take the access token explicitly so no process-wide session exists.

pub mod supabase;

#[cfg(test)]
pub mod mock;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub use supabase::SupabaseClient;

// =============================================================================
// ERROR
// =============================================================================

/// A failed backend call. `message` is shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    /// HTTP status of the failed response, `None` for transport failures.
    pub status: Option<u16>,
    pub message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Rejected credentials or an expired token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Token-backed identity issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token in unix seconds.
    pub expires_at: i64,
}

impl Session {
    /// True once the access token is past (or within `leeway_secs` of) expiry.
    #[must_use]
    pub fn is_expired(&self, now: i64, leeway_secs: i64) -> bool {
        self.expires_at <= now + leeway_secs
    }
}

/// Identity behind a session as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row of `user_profiles`. Owned and mutated by the backend only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Transfer,
    Sale,
}

impl RequestKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Sale => "sale",
        }
    }
}

/// Row inserted into `transactions`. Settlement happens out-of-band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub amount: f64,
}

/// Registration fields. `name` travels as account metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Operations the front end needs from the managed backend.
///
/// Implementations must be safe for concurrent independent calls.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Exchange a refresh token for a new session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError>;

    /// Resolve the user behind an access token. `Ok(None)` when the token is rejected.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, BackendError>;

    /// Create an account. Returns a session when the backend signs the user in
    /// right away, `None` when it waits for email confirmation.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Option<Session>, BackendError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<(), BackendError>;

    /// Redeem the token hash from a recovery email for a session.
    async fn verify_recovery(&self, token_hash: &str) -> Result<Session, BackendError>;

    async fn update_password(&self, access_token: &str, password: &str) -> Result<(), BackendError>;

    /// Fetch exactly one profile row by user id.
    async fn select_profile(&self, access_token: &str, user_id: Uuid) -> Result<UserProfile, BackendError>;

    async fn insert_transaction_request(
        &self,
        access_token: &str,
        request: &TransactionRequest,
    ) -> Result<(), BackendError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
