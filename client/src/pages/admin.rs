//! Administration area index.

use leptos::prelude::*;

use access::Role;

use crate::state::auth::use_auth;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let is_super_admin = move || auth.user().is_some_and(|u| u.roles.contains(Role::SuperAdmin));

    view! {
        <section class="area area--admin">
            <h1>"Administration"</h1>
            <ul class="area__list">
                <li><a href="/dashboard/admin/users">"User management"</a></li>
                <li><a href="/dashboard/admin/reports">"Reports"</a></li>
                <Show when=is_super_admin>
                    <li><a href="/dashboard/admin/settings">"Platform settings"</a></li>
                </Show>
            </ul>
        </section>
    }
}
