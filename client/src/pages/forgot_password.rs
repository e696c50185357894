//! Password reset request.

use leptos::prelude::*;

use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, ToastState, notify};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let sent = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let auth = auth.clone();
        let address = email.get_untracked();
        leptos::task::spawn_local(async move {
            match auth.reset_password(address).await {
                Ok(()) => {
                    let _ = sent.try_set(true);
                    notify(toasts, ToastKind::Success, "Check your inbox for a reset link.");
                }
                Err(e) => notify(toasts, ToastKind::Error, e.user_message()),
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset your password"</h1>
                <Show
                    when=move || sent.get()
                    fallback=move || {
                        view! {
                            <form class="login-form" on:submit=on_submit.clone()>
                                <input
                                    class="login-input"
                                    type="email"
                                    placeholder="you@example.com"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <button class="login-button" type="submit" disabled=move || busy.get()>
                                    "Send reset link"
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="login-notice">
                        "If an account exists for " {move || email.get()} ", a reset link is on its way."
                    </p>
                </Show>
                <a href="/login" class="login-card__link">"Back to sign in"</a>
            </div>
        </div>
    }
}
