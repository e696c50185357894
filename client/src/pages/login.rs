//! Email + password sign-in.
//!
//! Query parameters (see `access::LoginQuery`): `logout=true` shows a
//! neutral signed-out notice, `profile=<role>` labels the form for that
//! account type, `redirect=<path>` is where a successful sign-in lands.
//! A visitor who is already signed in is forwarded immediately.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use access::{Credentials, LoginQuery, Phase};

use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Trim and validate the form; the error is shown inline.
fn validate_login_input(email: &str, password: &str) -> Result<Credentials, String> {
    Credentials::validate(email, password).map_err(|e| e.user_message())
}

fn heading(query: &LoginQuery) -> String {
    match query.profile {
        Some(role) => format!("Sign in as {}", role.label()),
        None => "Sign in".to_owned(),
    }
}

fn notice(query: &LoginQuery) -> Option<&'static str> {
    query.logout.then_some("You have been signed out.")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let location = use_location();
    let query = Memo::new(move |_| LoginQuery::parse(&location.search.get()));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Covers both a returning visitor and a fresh sign-in.
    let session = auth.session;
    Effect::new(move || {
        if session.with(|s| s.phase() == Phase::Authenticated) {
            navigate(&query.get().destination(), NavigateOptions { replace: true, ..Default::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = auth.login(credentials).await {
                let _ = error.try_set(Some(e.user_message()));
                notify(toasts, ToastKind::Error, e.user_message());
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || heading(&query.get())}</h1>
                {move || notice(&query.get()).map(|text| view! { <p class="login-notice">{text}</p> })}
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <a href="/forgot-password" class="login-card__link">"Forgot your password?"</a>
                <a href="/account-type" class="login-card__link">"New here? Choose an account type"</a>
            </div>
        </div>
    }
}
