//! `/reset-password` landing page reached from the reset email.
//!
//! The email link carries a one-time token hash. Redeeming it yields a
//! short-lived recovery session, which is all `update_password` needs.

use super::{Notice, Page, PageState, session_gate};
use crate::context::{BackendContext, PageScope, SessionChange};

pub const INVALID_LINK: &str = "Reset link is invalid or has expired.";
pub const PASSWORD_UPDATED: &str = "Password updated.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryView {
    pub notice: Option<Notice>,
    /// Whether the new-password form is shown.
    pub show_form: bool,
}

impl RecoveryView {
    fn form() -> Self {
        Self { notice: None, show_form: true }
    }

    fn closed() -> Self {
        Self { notice: None, show_form: false }
    }
}

pub struct PasswordRecoveryController {
    ctx: BackendContext,
    page: Page<RecoveryView>,
}

impl PasswordRecoveryController {
    #[must_use]
    pub fn new(ctx: BackendContext, scope: PageScope) -> Self {
        Self { ctx, page: Page::new(scope) }
    }

    #[must_use]
    pub fn state(&self) -> &PageState<RecoveryView> {
        self.page.state()
    }

    /// Redeem the link's token hash, or fall back to an existing session.
    pub async fn open(&mut self, token_hash: Option<&str>) {
        if let Some(token_hash) = token_hash.filter(|t| !t.is_empty()) {
            match self.ctx.verify_recovery(token_hash).await {
                Ok(()) => {
                    self.page.ready(RecoveryView::form());
                }
                Err(e) => {
                    tracing::info!(error = %e, "recovery link rejected");
                    self.page.show_error(RecoveryView::closed(), e.message);
                }
            }
            return;
        }

        match self.ctx.get_session().await {
            Ok(Some(_)) => {
                self.page.ready(RecoveryView::form());
            }
            Ok(None) | Err(_) => {
                self.page.show_error(RecoveryView::closed(), INVALID_LINK);
            }
        }
    }

    /// Set the new password on the current (recovery) session.
    pub async fn submit(&mut self, password: &str) {
        if !session_gate::check(&mut self.ctx, &mut self.page).await {
            return;
        }
        match self.ctx.update_password(password).await {
            Ok(()) => {
                self.page.ready(RecoveryView { notice: Some(Notice::success(PASSWORD_UPDATED)), show_form: false });
            }
            Err(e) => {
                self.page.show_error(RecoveryView::form(), e.message);
            }
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (PageState<RecoveryView>, SessionChange) {
        (self.page.into_state(), self.ctx.into_session_change())
    }
}

#[cfg(test)]
#[path = "recovery_test.rs"]
mod tests;
