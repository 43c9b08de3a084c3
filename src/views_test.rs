use super::*;
use crate::backend::mock;

#[test]
fn loading_view_is_terminal_placeholder() {
    let html = loading();
    assert!(html.contains("<p>Loading...</p>"));
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains(TAILWIND_CDN));
}

#[test]
fn dashboard_renders_balance_verbatim() {
    let view = DashboardView::new(mock::profile(0.1 + 0.2));
    let html = dashboard(&view);
    assert!(html.contains(r#"<span class="font-bold">0.30000000000000004</span>"#));
    assert!(html.contains("Hello, Ada!"));
}

#[test]
fn dashboard_renders_whole_balance_without_decimals() {
    let html = dashboard(&DashboardView::new(mock::profile(100.0)));
    assert!(html.contains(r#"<span class="font-bold">100</span>"#));
}

#[test]
fn dashboard_escapes_profile_name() {
    let mut profile = mock::profile(1.0);
    profile.name = "<script>alert(1)</script>".into();
    let html = dashboard(&DashboardView::new(profile));
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn dashboard_amount_inputs_are_numeric_and_required() {
    let html = dashboard(&DashboardView::new(mock::profile(1.0)));
    assert_eq!(html.matches(r#"type="number""#).count(), 2);
    assert_eq!(html.matches(r#"step="any""#).count(), 2);
    assert_eq!(html.matches("required").count(), 2);
    assert!(html.contains(r#"action="/dashboard/transfer""#));
    assert!(html.contains(r#"action="/dashboard/sale""#));
}

#[test]
fn dashboard_amount_inputs_accept_what_the_server_accepts() {
    // A `min` bound would let the browser submit 0, which the server rejects.
    let html = dashboard(&DashboardView::new(mock::profile(1.0)));
    assert!(!html.contains("min="));
}

#[test]
fn dashboard_notice_colors_by_kind() {
    let mut view = DashboardView::new(mock::profile(1.0));
    view.notice = Some(Notice::success("Sale request submitted. Await manual processing."));
    let html = dashboard(&view);
    assert!(html.contains("text-green-600"));
    assert!(html.contains("Sale request submitted. Await manual processing."));

    view.notice = Some(Notice::error("nope"));
    let html = dashboard(&view);
    assert!(html.contains(r#"class="text-red-500 mb-4""#));
    assert!(html.contains(r#"role="status">nope</p>"#));
}

#[test]
fn dashboard_keeps_typed_amount() {
    let mut view = DashboardView::new(mock::profile(1.0));
    view.sale_amount = "7".into();
    assert!(dashboard(&view).contains(r#"value="7""#));
}

#[test]
fn signup_echoes_fields_but_not_password() {
    let form = SignupForm { name: "Ada".into(), email: "ada@example.com".into() };
    let html = signup(&form, Some("User already registered"));
    assert!(html.contains(r#"value="Ada""#));
    assert!(html.contains(r#"value="ada@example.com""#));
    assert!(html.contains("User already registered"));
    assert_eq!(html.matches("value=").count(), 2);
}

#[test]
fn signup_escapes_echoed_attribute_values() {
    let form = SignupForm { name: r#"Ada" onfocus="x"#.into(), email: String::new() };
    let html = signup(&form, None);
    assert!(!html.contains(r#"onfocus="x""#));
}

#[test]
fn login_without_error_has_no_notice() {
    let html = login(&LoginForm::default(), None);
    assert!(!html.contains("role=\"status\""));
    assert!(html.contains(r#"action="/login""#));
    assert!(html.contains(r#"href="/signup""#));
}

#[test]
fn login_error_is_escaped() {
    let html = login(&LoginForm::default(), Some("<b>bad</b>"));
    assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
}

#[test]
fn recovery_form_and_closed_states() {
    let open = recovery(&RecoveryView { notice: None, show_form: true }, None);
    assert!(open.contains(r#"name="password""#));

    let closed = recovery(&RecoveryView { notice: None, show_form: false }, Some("Reset link is invalid or has expired."));
    assert!(!closed.contains(r#"name="password""#));
    assert!(closed.contains("Reset link is invalid or has expired."));
    assert!(closed.contains(r#"href="/dashboard""#));
}

#[test]
fn recovery_success_notice_is_green() {
    let html = recovery(&RecoveryView { notice: Some(Notice::success("Password updated.")), show_form: false }, None);
    assert!(html.contains("text-green-600"));
    assert!(html.contains("Password updated."));
}
