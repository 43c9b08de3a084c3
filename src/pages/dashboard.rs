//! Dashboard page: gate, profile, request forms and account actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dashboard request re-runs the gate and the profile load before any
//! action, so forms are only ever submitted from a page that has data. The
//! profile's id is the `user_id` written into request rows.

use super::request::RequestSubmitter;
use super::{Notice, Page, PageState, account, profile, session_gate};
use crate::backend::{RequestKind, UserProfile};
use crate::context::{BackendContext, PageScope, SessionChange};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub profile: UserProfile,
    /// Single message line shared by all forms.
    pub notice: Option<Notice>,
    pub transfer_amount: String,
    pub sale_amount: String,
}

impl DashboardView {
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self { profile, notice: None, transfer_amount: String::new(), sale_amount: String::new() }
    }

    fn amount_field(&mut self, kind: RequestKind) -> &mut String {
        match kind {
            RequestKind::Transfer => &mut self.transfer_amount,
            RequestKind::Sale => &mut self.sale_amount,
        }
    }
}

pub struct DashboardController {
    ctx: BackendContext,
    page: Page<DashboardView>,
}

impl DashboardController {
    #[must_use]
    pub fn new(ctx: BackendContext, scope: PageScope) -> Self {
        Self { ctx, page: Page::new(scope) }
    }

    #[must_use]
    pub fn state(&self) -> &PageState<DashboardView> {
        self.page.state()
    }

    /// Gate on the session, then load the profile. A failed load leaves the
    /// page `Loading`.
    pub async fn activate(&mut self) {
        if !session_gate::check(&mut self.ctx, &mut self.page).await {
            return;
        }
        if let Some(loaded) = profile::load(&mut self.ctx).await {
            self.page.ready(DashboardView::new(loaded.profile));
        }
    }

    /// Submit a transfer or sale request from a ready page.
    pub async fn submit(&mut self, kind: RequestKind, raw_amount: &str) {
        let Some(mut view) = self.page.view().cloned() else {
            return;
        };
        let outcome = RequestSubmitter::new(kind)
            .submit(&self.ctx, view.profile.id, raw_amount)
            .await;

        *view.amount_field(kind) = if outcome.clear_input { String::new() } else { raw_amount.to_owned() };
        view.notice = Some(outcome.notice);
        self.page.ready(view);
    }

    /// Trigger the reset email from a ready page.
    pub async fn reset_password(&mut self) {
        let Some(mut view) = self.page.view().cloned() else {
            return;
        };
        view.notice = Some(account::reset_password(&mut self.ctx).await);
        self.page.ready(view);
    }

    #[must_use]
    pub fn into_parts(self) -> (PageState<DashboardView>, SessionChange) {
        (self.page.into_state(), self.ctx.into_session_change())
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
