//! Profile loader for the signed-in user.
//!
//! A failed fetch leaves the page without data; callers keep it in the
//! `Loading` state. The failure is logged but never shown.

use crate::backend::{AuthUser, UserProfile};
use crate::context::BackendContext;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub user: AuthUser,
    pub profile: UserProfile,
}

/// Fetch the single profile row keyed by the session user's id.
pub async fn load(ctx: &mut BackendContext) -> Option<LoadedProfile> {
    let user = match ctx.get_user().await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("session has no user; profile not loaded");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "user lookup failed; profile not loaded");
            return None;
        }
    };

    match ctx.select_profile(user.id).await {
        Ok(profile) => Some(LoadedProfile { user, profile }),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "profile fetch failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
