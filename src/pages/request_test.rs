use std::sync::Arc;

use super::*;
use crate::backend::BackendError;
use crate::backend::mock::{self, Call, MockBackend};
use crate::pages::NoticeKind;

fn context(backend: &Arc<MockBackend>) -> BackendContext {
    BackendContext::new(backend.clone(), Some(mock::fresh_session()), String::new())
}

// =============================================================================
// parse_amount
// =============================================================================

#[test]
fn parse_amount_accepts_decimals() {
    assert_eq!(parse_amount("12.5"), Some(12.5));
    assert_eq!(parse_amount(" 3 "), Some(3.0));
    assert_eq!(parse_amount("1e-3"), Some(0.001));
}

#[test]
fn parse_amount_rejects_non_numbers() {
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("12.5abc"), None);
}

#[test]
fn parse_amount_rejects_non_positive_and_non_finite() {
    assert_eq!(parse_amount("0"), None);
    assert_eq!(parse_amount("-4"), None);
    assert_eq!(parse_amount("inf"), None);
    assert_eq!(parse_amount("NaN"), None);
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn transfer_inserts_one_row_and_clears_input() {
    let backend = Arc::new(MockBackend::signed_in());
    let outcome = RequestSubmitter::new(RequestKind::Transfer)
        .submit(&context(&backend), mock::user_id(), "12.5")
        .await;

    assert!(outcome.clear_input);
    assert_eq!(outcome.notice, Notice::success("Transfer request submitted. Await manual processing."));
    assert_eq!(
        backend.calls(),
        vec![Call::InsertTransaction(TransactionRequest {
            user_id: mock::user_id(),
            kind: RequestKind::Transfer,
            amount: 12.5,
        })]
    );
}

#[tokio::test]
async fn sale_with_non_numeric_amount_never_calls_backend() {
    let backend = Arc::new(MockBackend::signed_in());
    let outcome = RequestSubmitter::new(RequestKind::Sale)
        .submit(&context(&backend), mock::user_id(), "abc")
        .await;

    assert!(!outcome.clear_input);
    assert_eq!(outcome.notice.text, INVALID_AMOUNT);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn backend_error_is_shown_verbatim_and_input_kept() {
    let backend = Arc::new(MockBackend::signed_in());
    MockBackend::set(
        &backend.insert,
        Err(BackendError::new(Some(403), "new row violates row-level security policy")),
    );
    let outcome = RequestSubmitter::new(RequestKind::Sale)
        .submit(&context(&backend), mock::user_id(), "2")
        .await;

    assert!(!outcome.clear_input);
    assert_eq!(outcome.notice.kind, NoticeKind::Error);
    assert_eq!(outcome.notice.text, "new row violates row-level security policy");
}

#[tokio::test]
async fn double_submit_writes_two_rows() {
    let backend = Arc::new(MockBackend::signed_in());
    let ctx = context(&backend);
    let submitter = RequestSubmitter::new(RequestKind::Sale);
    submitter.submit(&ctx, mock::user_id(), "1").await;
    submitter.submit(&ctx, mock::user_id(), "1").await;
    assert_eq!(backend.count(|c| matches!(c, Call::InsertTransaction(_))), 2);
}

#[test]
fn confirmation_names_the_kind() {
    assert!(RequestSubmitter::new(RequestKind::Sale).confirmation().starts_with("Sale"));
    assert_eq!(RequestSubmitter::new(RequestKind::Transfer).kind(), RequestKind::Transfer);
}
