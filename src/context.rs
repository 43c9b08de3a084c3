//! Per-page backend context and page lifetime scope.
//!
//! DESIGN
//! ======
//! A `BackendContext` is built for every page activation from the shared
//! backend handle and the session carried by the request. Controllers only
//! ever see this object, never a process-wide client. Session changes made
//! through it (sign-in, refresh, sign-out) are recorded as a
//! `SessionChange` that the HTTP layer turns into cookies.
//!
//! `PageScope` is the page's lifetime. Its guard lives in the request
//! handler; dropping it (the handler finished or the client went away)
//! raises the cancellation flag that every page transition checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::backend::{AuthUser, Backend, BackendError, Session, SignUpRequest, TransactionRequest, UserProfile};

/// Refresh access tokens this many seconds before they actually expire.
const REFRESH_LEEWAY_SECS: i64 = 10;
const SESSION_MISSING: &str = "Auth session missing!";

// =============================================================================
// PAGE SCOPE
// =============================================================================

/// Cheap handle to a page's cancellation flag.
#[derive(Debug, Clone)]
pub struct PageScope {
    cancelled: Arc<AtomicBool>,
}

/// Owner of a page's lifetime. Dropping it tears the page down.
#[derive(Debug)]
pub struct PageGuard {
    cancelled: Arc<AtomicBool>,
}

impl PageScope {
    #[must_use]
    pub fn open() -> (Self, PageGuard) {
        let cancelled = Arc::new(AtomicBool::new(false));
        (Self { cancelled: Arc::clone(&cancelled) }, PageGuard { cancelled })
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

// =============================================================================
// BACKEND CONTEXT
// =============================================================================

/// What happened to the request's session while the page ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    Stored(Session),
    Cleared,
}

pub struct BackendContext {
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    change: SessionChange,
    reset_redirect: String,
}

impl BackendContext {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, session: Option<Session>, reset_redirect: String) -> Self {
        Self { backend, session, change: SessionChange::Unchanged, reset_redirect }
    }

    #[must_use]
    pub fn session_change(&self) -> &SessionChange {
        &self.change
    }

    #[must_use]
    pub fn into_session_change(self) -> SessionChange {
        self.change
    }

    fn store_session(&mut self, session: Session) {
        self.session = Some(session.clone());
        self.change = SessionChange::Stored(session);
    }

    fn clear_session(&mut self) {
        self.session = None;
        self.change = SessionChange::Cleared;
    }

    fn bearer(&self) -> Result<&str, BackendError> {
        self.session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .ok_or_else(|| BackendError::new(None, SESSION_MISSING))
    }

    /// Current session, refreshed first when the access token has expired.
    ///
    /// A failed refresh clears the local session and returns the error.
    pub async fn get_session(&mut self) -> Result<Option<Session>, BackendError> {
        let Some(session) = self.session.clone() else {
            return Ok(None);
        };
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        if !session.is_expired(now, REFRESH_LEEWAY_SECS) {
            return Ok(Some(session));
        }

        tracing::debug!("access token expired; refreshing session");
        match self.backend.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.store_session(fresh.clone());
                Ok(Some(fresh))
            }
            Err(e) => {
                self.clear_session();
                Err(e)
            }
        }
    }

    /// User behind the current session, `None` when signed out.
    pub async fn get_user(&mut self) -> Result<Option<AuthUser>, BackendError> {
        let Some(session) = self.get_session().await? else {
            return Ok(None);
        };
        self.backend.get_user(&session.access_token).await
    }

    /// Create an account. Any session the request carried belongs to someone
    /// else now, so it is replaced or, while confirmation is pending, cleared.
    pub async fn sign_up(&mut self, request: &SignUpRequest) -> Result<(), BackendError> {
        match self.backend.sign_up(request).await? {
            Some(session) => self.store_session(session),
            None => self.clear_session(),
        }
        Ok(())
    }

    pub async fn sign_in_with_password(&mut self, email: &str, password: &str) -> Result<(), BackendError> {
        let session = self.backend.sign_in_with_password(email, password).await?;
        self.store_session(session);
        Ok(())
    }

    /// Revoke the session remotely. The local session is cleared either way.
    pub async fn sign_out(&mut self) -> Result<(), BackendError> {
        let result = match &self.session {
            Some(session) => self.backend.sign_out(&session.access_token).await,
            None => Ok(()),
        };
        self.clear_session();
        result
    }

    pub async fn reset_password_for_email(&self, email: &str) -> Result<(), BackendError> {
        self.backend
            .reset_password_for_email(email, &self.reset_redirect)
            .await
    }

    pub async fn verify_recovery(&mut self, token_hash: &str) -> Result<(), BackendError> {
        let session = self.backend.verify_recovery(token_hash).await?;
        self.store_session(session);
        Ok(())
    }

    pub async fn update_password(&self, password: &str) -> Result<(), BackendError> {
        self.backend
            .update_password(self.bearer()?, password)
            .await
    }

    pub async fn select_profile(&self, user_id: Uuid) -> Result<UserProfile, BackendError> {
        self.backend.select_profile(self.bearer()?, user_id).await
    }

    pub async fn insert_transaction_request(&self, request: &TransactionRequest) -> Result<(), BackendError> {
        self.backend
            .insert_transaction_request(self.bearer()?, request)
            .await
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
