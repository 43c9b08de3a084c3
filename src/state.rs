//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the backend handle and the parsed config, both read-only after
//! start. Handlers never call the backend directly; they build a
//! per-page `BackendContext` from the request's session.

use std::sync::Arc;

use crate::backend::{Backend, Session};
use crate::config::AppConfig;
use crate::context::BackendContext;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, config: AppConfig) -> Self {
        Self { backend, config: Arc::new(config) }
    }

    /// Context for one page activation carrying the request's session.
    #[must_use]
    pub fn context(&self, session: Option<Session>) -> BackendContext {
        BackendContext::new(Arc::clone(&self.backend), session, self.config.reset_password_redirect())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
