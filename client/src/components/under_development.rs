//! Notice for admin tools that have no screen yet.

use leptos::prelude::*;

#[component]
pub fn UnderDevelopment(feature: &'static str) -> impl IntoView {
    view! {
        <section class="under-development">
            <h2>{feature}</h2>
            <p>"This feature is under development."</p>
            <a href="/dashboard" class="btn">"Back to dashboard"</a>
        </section>
    }
}
