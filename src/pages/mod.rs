//! Page controllers.
//!
//! DESIGN
//! ======
//! Every page is a `Page<V>`: an explicit `PageState<V>` changed only by the
//! named transitions below. A page starts in `Loading` and moves to
//! `Redirecting`, `Ready` or `ErrorDisplayed`. Ready and error states may be
//! replaced again (the user resubmits); a redirect is final.
//!
//! Transitions check the page's `PageScope` first, so a result that arrives
//! after the page was torn down is discarded instead of applied.

pub mod account;
pub mod dashboard;
pub mod login;
pub mod profile;
pub mod recovery;
pub mod request;
pub mod session_gate;
pub mod signup;

use crate::context::PageScope;

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    ResetPassword,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::ResetPassword => "/reset-password",
        }
    }
}

// =============================================================================
// NOTICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

// =============================================================================
// PAGE STATE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<V> {
    Loading,
    Redirecting(Route),
    Ready(V),
    ErrorDisplayed { view: V, message: String },
}

pub struct Page<V> {
    state: PageState<V>,
    scope: PageScope,
}

impl<V> Page<V> {
    #[must_use]
    pub fn new(scope: PageScope) -> Self {
        Self { state: PageState::Loading, scope }
    }

    #[must_use]
    pub fn state(&self) -> &PageState<V> {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> PageState<V> {
        self.state
    }

    /// View of a `Ready` or `ErrorDisplayed` page.
    #[must_use]
    pub fn view(&self) -> Option<&V> {
        match &self.state {
            PageState::Ready(view) | PageState::ErrorDisplayed { view, .. } => Some(view),
            PageState::Loading | PageState::Redirecting(_) => None,
        }
    }

    pub fn redirect(&mut self, route: Route) -> bool {
        self.apply(PageState::Redirecting(route))
    }

    pub fn ready(&mut self, view: V) -> bool {
        self.apply(PageState::Ready(view))
    }

    pub fn show_error(&mut self, view: V, message: impl Into<String>) -> bool {
        self.apply(PageState::ErrorDisplayed { view, message: message.into() })
    }

    fn apply(&mut self, next: PageState<V>) -> bool {
        if self.scope.is_cancelled() {
            tracing::debug!("page torn down; discarding late result");
            return false;
        }
        if let PageState::Redirecting(route) = &self.state {
            tracing::debug!(route = route.path(), "page already navigating away");
            return false;
        }
        self.state = next;
        true
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
