//! Dashboard layout and landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/dashboard` is the protected parent of every role area. The layout shows
//! the navigation bar and the areas the user's effective roles open (demo
//! bypasses included); the guard still checks each area on its own.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use access::{Role, RoleSet};

use crate::components::nav_bar::NavBar;
use crate::state::auth::use_auth;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Sidebar entry: label, href, roles that open it (empty = everyone).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaLink {
    pub label: &'static str,
    pub href: &'static str,
    pub roles: &'static [Role],
}

pub const AREAS: &[AreaLink] = &[
    AreaLink { label: "Overview", href: "/dashboard", roles: &[] },
    AreaLink { label: "My learning", href: "/dashboard/student", roles: &[Role::Student] },
    AreaLink { label: "Teaching", href: "/dashboard/instructor", roles: &[Role::Instructor] },
    AreaLink { label: "Business", href: "/dashboard/business", roles: &[Role::BusinessAdmin] },
    AreaLink { label: "Administration", href: "/dashboard/admin", roles: &[Role::Admin, Role::SuperAdmin] },
    AreaLink {
        label: "Staff tools",
        href: "/dashboard/staff",
        roles: &[Role::Employee, Role::Admin, Role::SuperAdmin],
    },
    AreaLink { label: "Messages", href: "/dashboard/messages", roles: &[] },
];

/// Areas open to `roles`, in sidebar order.
pub fn visible_areas(roles: &RoleSet) -> Vec<AreaLink> {
    AREAS.iter().copied().filter(|area| area.roles.is_empty() || roles.contains_any(area.roles)).collect()
}

fn effective_roles() -> impl Fn() -> RoleSet + Copy + Send + Sync + 'static {
    let auth = use_auth();
    let session = auth.session;
    let policy = StoredValue::new(auth.policy().clone());
    move || {
        session.with(|s| {
            s.current_user().map_or_else(RoleSet::new, |user| policy.with_value(|p| p.effective_roles(user)))
        })
    }
}

#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    let roles = effective_roles();

    view! {
        <div class="dashboard">
            <NavBar/>
            <div class="dashboard__body">
                <nav class="dashboard__sidebar">
                    {move || {
                        visible_areas(&roles())
                            .into_iter()
                            .map(|area| view! { <a href=area.href class="dashboard__link">{area.label}</a> })
                            .collect::<Vec<_>>()
                    }}
                </nav>
                <main class="dashboard__content">{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardHome() -> impl IntoView {
    let auth = use_auth();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let roles = effective_roles();
    let greeting = {
        let auth = auth.clone();
        move || auth.user().map(|u| format!("Welcome back, {}", u.display_label())).unwrap_or_default()
    };

    // Re-reads the profile so newly granted roles open their areas.
    let on_refresh = move |_| {
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            match auth.refresh().await {
                Ok(()) => notify(toasts, ToastKind::Info, "Access refreshed."),
                Err(e) => notify(toasts, ToastKind::Error, e.user_message()),
            }
        });
    };

    view! {
        <section class="dashboard-home">
            <h1>{greeting}</h1>
            <button class="btn dashboard-home__refresh" on:click=on_refresh>
                "Refresh access"
            </button>
            <div class="dashboard-home__tiles">
                {move || {
                    visible_areas(&roles())
                        .into_iter()
                        .filter(|area| area.href != "/dashboard")
                        .map(|area| view! { <a href=area.href class="tile">{area.label}</a> })
                        .collect::<Vec<_>>()
                }}
            </div>
        </section>
    }
}
