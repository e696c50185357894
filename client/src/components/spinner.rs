//! Loading indicator shown while the session is being checked.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_owned());
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner__ring" aria-hidden="true"></span>
            <span class="spinner__label">{label}</span>
        </div>
    }
}
