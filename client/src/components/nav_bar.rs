//! Top bar of the dashboard with the signed-in user and the sign-out button.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use access::{LogoutOutcome, LoginQuery};

use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, ToastState, notify};

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let label = {
        let auth = auth.clone();
        move || auth.user().map(|u| u.display_label().to_owned()).unwrap_or_default()
    };
    let session = auth.session;
    let logging_out = move || session.with(access::Session::is_logging_out);

    let on_logout = move |_| {
        let auth = auth.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let done = move || {
                navigate(&LoginQuery::forced_logout().to_href(), NavigateOptions { replace: true, ..Default::default() });
            };
            match auth.logout(done).await {
                Ok(LogoutOutcome::Completed | LogoutOutcome::Ignored) => {}
                Err(e) => notify(toasts, ToastKind::Error, format!("Sign-out failed. {}", e.user_message())),
            }
        });
    };

    view! {
        <header class="nav-bar">
            <a href="/dashboard" class="nav-bar__brand">"Schoolier"</a>
            <span class="nav-bar__user">{label}</span>
            <button class="btn nav-bar__logout" on:click=on_logout disabled=logging_out>
                {move || if logging_out() { "Signing out..." } else { "Sign out" }}
            </button>
        </header>
    }
}
