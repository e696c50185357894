//! Messaging inbox.

use leptos::prelude::*;

const THREADS: [(&str, &str); 3] = [
    ("Maya Chen", "Week 3 exercises are up."),
    ("Support", "Your certificate is ready to download."),
    ("Daniel Osei", "Thanks for the feedback on module 2!"),
];

#[component]
pub fn MessagesPage() -> impl IntoView {
    let selected = RwSignal::new(None::<usize>);

    view! {
        <section class="area area--messages">
            <h1>"Messages"</h1>
            <ul class="thread-list">
                {THREADS
                    .iter()
                    .enumerate()
                    .map(|(i, (from, preview))| {
                        view! {
                            <li
                                class="thread"
                                class:thread--active=move || selected.get() == Some(i)
                                on:click=move |_| selected.set(Some(i))
                            >
                                <strong>{*from}</strong>
                                <span class="thread__preview">{*preview}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </section>
    }
}
