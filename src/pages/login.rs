//! Password sign-in page, the target of every unauthenticated redirect.

use super::{Page, PageState, Route};
use crate::context::{BackendContext, PageScope, SessionChange};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
}

pub struct LoginController {
    ctx: BackendContext,
    page: Page<LoginForm>,
}

impl LoginController {
    #[must_use]
    pub fn new(ctx: BackendContext, scope: PageScope) -> Self {
        Self { ctx, page: Page::new(scope) }
    }

    #[must_use]
    pub fn state(&self) -> &PageState<LoginForm> {
        self.page.state()
    }

    pub fn show(&mut self) {
        self.page.ready(LoginForm::default());
    }

    pub async fn submit(&mut self, email: &str, password: &str) {
        match self.ctx.sign_in_with_password(email, password).await {
            Ok(()) => {
                self.page.redirect(Route::Dashboard);
            }
            Err(e) => {
                tracing::info!(error = %e, "sign-in rejected");
                tracing::debug!(%email, "rejected sign-in address");
                self.page.show_error(LoginForm { email: email.to_owned() }, e.message);
            }
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (PageState<LoginForm>, SessionChange) {
        (self.page.into_state(), self.ctx.into_session_change())
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
