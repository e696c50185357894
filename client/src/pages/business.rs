//! Business area: team seats and training progress.
//!
//! Open to business administrators and, through the access policy, to demo
//! accounts.

use leptos::prelude::*;

use crate::state::auth::use_auth;

#[component]
pub fn BusinessPage() -> impl IntoView {
    let auth = use_auth();
    let is_demo = move || auth.user().is_some_and(|u| u.is_demo);

    view! {
        <section class="area area--business">
            <h1>"Business"</h1>
            <Show when=is_demo>
                <p class="area__banner">"Demo account: changes here are not saved."</p>
            </Show>
            <p>"Manage seats, assign courses and follow your team's progress."</p>
        </section>
    }
}
