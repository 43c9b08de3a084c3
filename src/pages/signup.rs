//! Sign-up page.
//!
//! Success navigates to the dashboard right away. When the backend wants the
//! email confirmed first there is no session, and the dashboard gate sends
//! the user on to `/login`.

use super::{Page, PageState, Route};
use crate::backend::SignUpRequest;
use crate::context::{BackendContext, PageScope, SessionChange};

/// Values echoed back into the form. The password never is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
}

pub struct SignupController {
    ctx: BackendContext,
    page: Page<SignupForm>,
}

impl SignupController {
    #[must_use]
    pub fn new(ctx: BackendContext, scope: PageScope) -> Self {
        Self { ctx, page: Page::new(scope) }
    }

    #[must_use]
    pub fn state(&self) -> &PageState<SignupForm> {
        self.page.state()
    }

    /// Show the empty form.
    pub fn show(&mut self) {
        self.page.ready(SignupForm::default());
    }

    pub async fn submit(&mut self, request: SignUpRequest) {
        let form = SignupForm { name: request.name.clone(), email: request.email.clone() };
        match self.ctx.sign_up(&request).await {
            Ok(()) => {
                tracing::info!("account created");
                tracing::debug!(email = %request.email, "sign-up accepted");
                self.page.redirect(Route::Dashboard);
            }
            Err(e) => {
                self.page.show_error(form, e.message);
            }
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (PageState<SignupForm>, SessionChange) {
        (self.page.into_state(), self.ctx.into_session_change())
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;
