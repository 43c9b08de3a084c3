use std::sync::Arc;

use super::*;
use crate::backend::BackendError;
use crate::backend::mock::{Call, MockBackend};
use crate::state::test_helpers::{LogBuffer, info_subscriber};

#[tokio::test]
async fn valid_credentials_store_session_and_navigate() {
    let backend = Arc::new(MockBackend::signed_in());
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(BackendContext::new(backend.clone(), None, String::new()), scope);
    page.submit("ada@example.com", "hunter22").await;

    assert_eq!(backend.calls(), vec![Call::SignIn { email: "ada@example.com".into() }]);
    let (state, change) = page.into_parts();
    assert_eq!(state, PageState::Redirecting(Route::Dashboard));
    assert!(matches!(change, SessionChange::Stored(_)));
}

#[tokio::test]
async fn bad_credentials_redisplay_form_with_message() {
    let backend = Arc::new(MockBackend::signed_in());
    MockBackend::set(&backend.sign_in, Err(BackendError::new(Some(400), "Invalid login credentials")));
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(BackendContext::new(backend.clone(), None, String::new()), scope);
    page.submit("ada@example.com", "wrong").await;

    assert_eq!(
        page.state(),
        &PageState::ErrorDisplayed {
            view: LoginForm { email: "ada@example.com".into() },
            message: "Invalid login credentials".into(),
        }
    );
}

#[test]
fn show_is_ready_with_blank_email() {
    let backend = Arc::new(MockBackend::signed_in());
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(BackendContext::new(backend, None, String::new()), scope);
    page.show();
    assert_eq!(page.state(), &PageState::Ready(LoginForm::default()));
}

#[tokio::test]
async fn rejected_sign_in_keeps_email_out_of_info_logs() {
    let logs = LogBuffer::default();
    let _subscriber = tracing::subscriber::set_default(info_subscriber(&logs));
    let backend = Arc::new(MockBackend::signed_in());
    MockBackend::set(&backend.sign_in, Err(BackendError::new(Some(400), "Invalid login credentials")));
    let (scope, _guard) = PageScope::open();
    let mut page = LoginController::new(BackendContext::new(backend, None, String::new()), scope);
    page.submit("ada@example.com", "wrong").await;

    let output = logs.contents();
    assert!(output.contains("sign-in rejected"));
    assert!(!output.contains("ada@example.com"));
}
