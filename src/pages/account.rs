//! Account actions: logout and password-reset email.

use super::{Notice, Route};
use crate::context::BackendContext;

pub const EMAIL_UNAVAILABLE: &str = "Unable to retrieve user email.";
pub const RESET_EMAIL_SENT: &str = "Password reset email sent.";

/// Sign out and go to `/login`. The backend result never changes the outcome.
pub async fn logout(ctx: &mut BackendContext) -> Route {
    if let Err(e) = ctx.sign_out().await {
        tracing::warn!(error = %e, "backend sign-out failed; local session cleared anyway");
    }
    Route::Login
}

/// Trigger the reset email for the signed-in user's address.
pub async fn reset_password(ctx: &mut BackendContext) -> Notice {
    let email = match ctx.get_user().await {
        Ok(user) => user.and_then(|u| u.email).filter(|e| !e.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "user lookup for password reset failed");
            None
        }
    };
    let Some(email) = email else {
        return Notice::error(EMAIL_UNAVAILABLE);
    };

    match ctx.reset_password_for_email(&email).await {
        Ok(()) => Notice::success(RESET_EMAIL_SENT),
        Err(e) => Notice::error(e.message),
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
