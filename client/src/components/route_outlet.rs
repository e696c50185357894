//! Renders the screen chain matched for the current URL.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Leptos router only supplies the current location here; matching,
//! nesting and guarding follow [`ROUTES`](crate::routes::ROUTES). Levels
//! are rendered innermost first so each layout receives its child as the
//! outlet.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use access::route::Params;
use access::{Gate, Location, RouteMatch};

use crate::components::private_route::PrivateRoute;
use crate::pages::not_found::NotFoundPage;
use crate::routes::{ROUTES, Screen};

#[component]
pub fn RouteOutlet() -> impl IntoView {
    let location = use_location();

    move || {
        let path = location.pathname.get();
        let here = Location::new(path.clone(), location.search.get());
        match ROUTES.match_path(&path) {
            Some(matched) => render_match(matched, here),
            None => view! { <NotFoundPage/> }.into_any(),
        }
    }
}

fn render_match(matched: RouteMatch<Screen>, here: Location) -> AnyView {
    let guarded = matched.levels.iter().any(|level| matches!(level.gate, Gate::Guarded { .. }));
    if !guarded {
        return render_levels(&matched);
    }
    let chain = matched.clone();
    view! {
        <PrivateRoute route=matched location=here>
            {render_levels(&chain)}
        </PrivateRoute>
    }
    .into_any()
}

fn render_levels(matched: &RouteMatch<Screen>) -> AnyView {
    let params: &Params = &matched.params;
    matched
        .levels
        .iter()
        .rev()
        .fold(().into_any(), |outlet, level| level.element.render(params, outlet))
}
