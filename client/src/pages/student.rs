//! Student area: enrolled courses.

use leptos::prelude::*;

use super::courses::CATALOG;

#[component]
pub fn StudentPage() -> impl IntoView {
    view! {
        <section class="area area--student">
            <h1>"My learning"</h1>
            <ul class="area__list">
                {CATALOG
                    .iter()
                    .take(2)
                    .map(|course| {
                        view! {
                            <li>
                                <a href=format!("/courses/{}", course.id)>{course.title}</a>
                                <span class="area__meta">{course.instructor}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </section>
    }
}
