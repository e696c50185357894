//! Guard wrapper for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`RouteOutlet`](super::route_outlet::RouteOutlet) wraps every matched
//! chain containing a protected level in [`PrivateRoute`]. The decision is
//! a memo over the session signal, so content, spinner and redirects follow
//! session transitions without remounting the route.
//!
//! Redirects replace the history entry: the back button must not return to
//! a screen that immediately bounces again.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use access::{Decision, Location, RouteMatch};

use crate::components::spinner::Spinner;
use crate::routes::Screen;
use crate::state::auth::use_auth;

#[component]
pub fn PrivateRoute(route: RouteMatch<Screen>, location: Location, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| auth.decide(&route, &location));

    Effect::new(move || {
        if let Some(target) = decision.get().redirect_target() {
            navigate(&target, NavigateOptions { replace: true, ..Default::default() });
        }
    });

    move || match decision.get() {
        Decision::Render => children().into_any(),
        Decision::Loading => view! { <Spinner/> }.into_any(),
        Decision::RedirectLogin { .. } | Decision::RedirectDashboard => {
            view! { <Spinner label="Redirecting..."/> }.into_any()
        }
    }
}
