//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Learn from people who do the work"</h1>
                <p>"Courses for students, tools for instructors, training for teams."</p>
                <div class="hero__actions">
                    <a href="/courses" class="btn btn--primary">"Browse courses"</a>
                    <a href="/account-type" class="btn">"Get started"</a>
                </div>
            </section>
        </div>
    }
}
