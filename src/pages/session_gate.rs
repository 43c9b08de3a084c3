//! Session gate run at the start of every protected page.

use super::{Page, Route};
use crate::context::BackendContext;

/// Returns `true` when an active session exists. Otherwise the page is sent
/// to `/login`; a failed session query counts as no session.
pub async fn check<V>(ctx: &mut BackendContext, page: &mut Page<V>) -> bool {
    match ctx.get_session().await {
        Ok(Some(_)) => true,
        Ok(None) => {
            page.redirect(Route::Login);
            false
        }
        Err(e) => {
            tracing::info!(error = %e, "session query failed; sending to login");
            page.redirect(Route::Login);
            false
        }
    }
}

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod tests;
