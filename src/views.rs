//! Server-rendered HTML for each page state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are leptos components rendered once on the server with `to_html`.
//! There is no hydration: every interaction is a plain form post handled by
//! the router. Text and attribute values are escaped by leptos.

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use crate::pages::dashboard::DashboardView;
use crate::pages::login::LoginForm;
use crate::pages::recovery::RecoveryView;
use crate::pages::signup::SignupForm;
use crate::pages::{Notice, NoticeKind};

const APP_TITLE: &str = "Synthwave Dashboard";
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

// =============================================================================
// DOCUMENT
// =============================================================================

/// Render a full document around the view built by `body`.
fn document(title: &'static str, body: impl FnOnce() -> AnyView) -> String {
    Owner::new().with(move || {
        let body = body();
        view! {
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>{title}</title>
                    <script src=TAILWIND_CDN></script>
                </head>
                <body class="antialiased">{body}</body>
            </html>
        }
        .to_html()
    })
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "text-green-600",
        NoticeKind::Error => "text-red-500",
    }
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
fn NoticeLine(notice: Notice, extra_class: &'static str) -> impl IntoView {
    let class = format!("{} {extra_class}", notice_class(notice.kind));
    view! { <p class=class role="status">{notice.text}</p> }
}

/// One amount form. No `min`: the server is the only judge of positivity.
#[component]
fn AmountForm(
    action: &'static str,
    heading: &'static str,
    value: String,
    button_class: &'static str,
    button_label: &'static str,
) -> impl IntoView {
    let button_class = format!("{button_class} text-white py-2 w-full rounded");
    view! {
        <form method="post" action=action class="bg-white p-4 rounded shadow">
            <h3 class="text-lg font-semibold mb-4">{heading}</h3>
            <input
                type="number"
                name="amount"
                step="any"
                placeholder="Amount"
                value=value
                class="border p-2 mb-4 w-full"
                required=true
            />
            <button type="submit" class=button_class>{button_label}</button>
        </form>
    }
}

/// Footer link under an auth card.
struct CardLink {
    lead: &'static str,
    href: &'static str,
    label: &'static str,
}

/// Centered form card shared by the auth pages.
#[component]
fn Card(
    heading: &'static str,
    error: Option<String>,
    action: &'static str,
    button: &'static str,
    link: Option<CardLink>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 p-4">
            <form method="post" action=action class="bg-white p-6 rounded shadow-md w-full max-w-sm">
                <h2 class="text-xl mb-4 text-center">{heading}</h2>
                {error.map(|message| view! { <NoticeLine notice=Notice::error(message) extra_class="mb-2"/> })}
                {children()}
                <button type="submit" class="bg-blue-500 text-white py-2 w-full rounded">{button}</button>
                {link.map(|link| view! {
                    <p class="mt-4 text-center text-sm">
                        {link.lead}
                        <a class="text-blue-500" href=link.href>{link.label}</a>
                    </p>
                })}
            </form>
        </div>
    }
}

// =============================================================================
// PAGES
// =============================================================================

/// Terminal view while (or when) the page has no data.
#[must_use]
pub fn loading() -> String {
    document(APP_TITLE, || view! { <p>"Loading..."</p> }.into_any())
}

#[must_use]
pub fn dashboard(view: &DashboardView) -> String {
    let greeting = format!("Hello, {}!", view.profile.name);
    let balance = view.profile.balance.to_string();
    let notice = view.notice.clone();
    let transfer_amount = view.transfer_amount.clone();
    let sale_amount = view.sale_amount.clone();

    document(APP_TITLE, move || view! {
        <div class="min-h-screen p-4 bg-gray-50">
            <header class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold">{APP_TITLE}</h1>
                <div class="space-x-2 flex">
                    <form method="post" action="/dashboard/reset-password">
                        <button type="submit" class="bg-yellow-500 text-white px-4 py-2 rounded">"Reset Password"</button>
                    </form>
                    <form method="post" action="/logout">
                        <button type="submit" class="bg-red-500 text-white px-4 py-2 rounded">"Logout"</button>
                    </form>
                </div>
            </header>
            <section class="mb-8">
                <h2 class="text-xl">{greeting}</h2>
                <p class="mt-2">
                    "Your current crypto balance: "
                    <span class="font-bold">{balance}</span>
                </p>
            </section>
            {notice.map(|notice| view! { <NoticeLine notice=notice extra_class="mb-4"/> })}
            <section class="grid md:grid-cols-2 gap-8">
                <AmountForm
                    action="/dashboard/transfer"
                    heading="Transfer Crypto"
                    value=transfer_amount
                    button_class="bg-blue-500"
                    button_label="Request Transfer"
                />
                <AmountForm
                    action="/dashboard/sale"
                    heading="Sell Crypto"
                    value=sale_amount
                    button_class="bg-green-500"
                    button_label="Request Sale"
                />
            </section>
        </div>
    }
    .into_any())
}

#[must_use]
pub fn signup(form: &SignupForm, error: Option<&str>) -> String {
    let name = form.name.clone();
    let email = form.email.clone();
    let link = CardLink { lead: "Already have an account? ", href: "/login", label: "Log in" };
    document("Sign Up", move || view! {
        <Card heading="Sign Up" error=error.map(str::to_owned) action="/signup" button="Sign Up" link=Some(link)>
            <input type="text" name="name" placeholder="Name" value=name class="border p-2 mb-4 w-full" required=true/>
            <input type="email" name="email" placeholder="Email" value=email class="border p-2 mb-4 w-full" required=true/>
            <input type="password" name="password" placeholder="Password" class="border p-2 mb-4 w-full" required=true/>
        </Card>
    }
    .into_any())
}

#[must_use]
pub fn login(form: &LoginForm, error: Option<&str>) -> String {
    let email = form.email.clone();
    let link = CardLink { lead: "New here? ", href: "/signup", label: "Create an account" };
    document("Log In", move || view! {
        <Card heading="Log In" error=error.map(str::to_owned) action="/login" button="Log In" link=Some(link)>
            <input type="email" name="email" placeholder="Email" value=email class="border p-2 mb-4 w-full" required=true/>
            <input type="password" name="password" placeholder="Password" class="border p-2 mb-4 w-full" required=true/>
        </Card>
    }
    .into_any())
}

#[must_use]
pub fn recovery(view: &RecoveryView, error: Option<&str>) -> String {
    let notice = view.notice.clone();
    let error = error.map(str::to_owned);

    if view.show_form {
        return document("Reset Password", move || view! {
            <Card heading="Reset Password" error=error action="/reset-password" button="Update Password" link=None>
                {notice.map(|notice| view! { <NoticeLine notice=notice extra_class="mb-2"/> })}
                <input type="password" name="password" placeholder="New password" class="border p-2 mb-4 w-full" required=true/>
            </Card>
        }
        .into_any());
    }

    document("Reset Password", move || view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 p-4">
            <div class="bg-white p-6 rounded shadow-md w-full max-w-sm text-center">
                <h2 class="text-xl mb-4">"Reset Password"</h2>
                {error.map(|message| view! { <NoticeLine notice=Notice::error(message) extra_class="mb-2"/> })}
                {notice.map(|notice| view! { <NoticeLine notice=notice extra_class="mb-2"/> })}
                <a class="text-blue-500" href="/dashboard">"Back to dashboard"</a>
            </div>
        </div>
    }
    .into_any())
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
