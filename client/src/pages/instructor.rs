//! Instructor area: published courses.

use leptos::prelude::*;

#[component]
pub fn InstructorPage() -> impl IntoView {
    view! {
        <section class="area area--instructor">
            <h1>"Teaching"</h1>
            <p>"Your published courses and learner questions appear here."</p>
            <a href="/dashboard/messages" class="btn">"Open messages"</a>
        </section>
    }
}
