//! Account-type selector: links to the login screen with a pre-selected
//! profile.

use leptos::prelude::*;

use access::{LoginQuery, Role};

const CHOICES: [(Role, &str); 3] = [
    (Role::Student, "Take courses and track your progress."),
    (Role::Instructor, "Publish courses and follow your learners."),
    (Role::BusinessAdmin, "Train your team and manage seats."),
];

#[component]
pub fn AccountTypePage() -> impl IntoView {
    view! {
        <div class="account-type-page">
            <h1>"How will you use Schoolier?"</h1>
            <div class="account-type-page__choices">
                {CHOICES
                    .into_iter()
                    .map(|(role, blurb)| {
                        let href = LoginQuery { profile: Some(role), ..LoginQuery::default() }.to_href();
                        view! {
                            <a class="account-type-card" href=href>
                                <h2>{role.label()}</h2>
                                <p>{blurb}</p>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
